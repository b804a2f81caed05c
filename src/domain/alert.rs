// ==========================================
// 奶牛生命周期引擎 - 预警模型
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 5. Alert Engine
// 红线: 预警统一为单一值类型,每个触发条件一个构造函数
// 红线: code 为稳定条件码,协作方据 (ear_tag, code, due_date) 去重
// ==========================================

use crate::domain::types::{AlertPriority, AlertSource};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Alert - 预警
// ==========================================
// 生命周期: 引擎生成 → 协作方持久化/推送; 除已读标志外不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    // ===== 主键与关联 =====
    pub id: Uuid,        // 预警 ID
    pub ear_tag: String, // 关联 cattle_master（FK）

    // ===== 内容 =====
    pub code: &'static str,      // 条件码（稳定,英文大写下划线）
    pub message: String,         // 提示文本
    pub due_date: NaiveDate,     // 预警对应的业务到期日
    pub priority: AlertPriority, // 优先级
    pub source: AlertSource,     // 来源分类

    // ===== 状态 =====
    pub is_read: bool, // 已读标志（唯一可变字段）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 生成时间
}

impl Alert {
    fn build(
        ear_tag: &str,
        code: &'static str,
        message: String,
        due_date: NaiveDate,
        priority: AlertPriority,
        source: AlertSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ear_tag: ear_tag.to_string(),
            code,
            message,
            due_date,
            priority,
            source,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// 育成牛适配提醒（15-18月龄）
    pub fn heifer_breeding_ready(ear_tag: &str, age_in_months: i64, today: NaiveDate) -> Self {
        Self::build(
            ear_tag,
            "HEIFER_BREEDING_READY",
            format!("育成牛已达适配月龄（{}月龄）,建议安排配种", age_in_months),
            today,
            AlertPriority::Medium,
            AlertSource::Reproduction,
        )
    }

    /// 孕检提醒（配种后30天）
    pub fn pregnancy_check_due(ear_tag: &str, check_due_date: NaiveDate) -> Self {
        Self::build(
            ear_tag,
            "PREGNANCY_CHECK_DUE",
            format!("孕检窗口: 应于 {} 前后完成孕检", check_due_date),
            check_due_date,
            AlertPriority::High,
            AlertSource::Reproduction,
        )
    }

    /// 预产期临近（预产期前14天起）
    pub fn calving_imminent(ear_tag: &str, expected_calving_date: NaiveDate) -> Self {
        Self::build(
            ear_tag,
            "CALVING_IMMINENT",
            format!("预产期临近: 预计 {} 产犊,请安排产房", expected_calving_date),
            expected_calving_date,
            AlertPriority::Emergency,
            AlertSource::Reproduction,
        )
    }

    /// 建议配种临近（建议配种日前14天起）
    pub fn insemination_due(ear_tag: &str, expected_insemination_date: NaiveDate) -> Self {
        Self::build(
            ear_tag,
            "INSEMINATION_DUE",
            format!("建议配种日期临近: {}", expected_insemination_date),
            expected_insemination_date,
            AlertPriority::Medium,
            AlertSource::Reproduction,
        )
    }

    /// 周期性护理到期
    pub fn care_due(ear_tag: &str, care_name: &str, next_due_date: NaiveDate) -> Self {
        Self::build(
            ear_tag,
            "CARE_DUE",
            format!("护理项到期: {}（应于 {} 执行）", care_name, next_due_date),
            next_due_date,
            AlertPriority::High,
            AlertSource::Health,
        )
    }

    /// 产犊成功通报
    pub fn birth_success(ear_tag: &str, calving_date: NaiveDate, calf_count: u32) -> Self {
        Self::build(
            ear_tag,
            "BIRTH_SUCCESS",
            format!("产犊完成: {} 产犊 {} 头", calving_date, calf_count),
            calving_date,
            AlertPriority::Low,
            AlertSource::General,
        )
    }

    /// 产犊异常通报（难产/死胎等）
    pub fn birth_complication(ear_tag: &str, calving_date: NaiveDate, detail: &str) -> Self {
        Self::build(
            ear_tag,
            "BIRTH_COMPLICATION",
            format!("产犊异常（{}）: 请兽医跟进", detail),
            calving_date,
            AlertPriority::High,
            AlertSource::Health,
        )
    }

    /// 产后检查提醒（产犊后7天）
    pub fn post_calving_checkup(ear_tag: &str, checkup_date: NaiveDate) -> Self {
        Self::build(
            ear_tag,
            "POST_CALVING_CHECKUP",
            format!("产后检查: 应于 {} 完成产后体况检查", checkup_date),
            checkup_date,
            AlertPriority::Medium,
            AlertSource::Health,
        )
    }
}
