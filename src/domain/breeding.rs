// ==========================================
// 奶牛生命周期引擎 - 繁殖事件模型
// ==========================================
// 依据: Herd_Master_Spec.md - PART C 数据与状态体系
// 依据: Lifecycle_Engine_Specs_v1.2.md - insemination/birth_record
// ==========================================
// 红线: 事件记录不可变（终态后仅允许修改备注）
// ==========================================

use crate::domain::types::{BirthOutcomeKind, Gender, InseminationMethod, PregnancyCheckStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Insemination - 配种记录
// ==========================================
// 状态转换: PENDING → CONFIRMED（终态）/ PENDING → NEGATIVE（终态）
// 转换校验由 LifecycleCoordinator 执行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insemination {
    // ===== 主键与关联 =====
    pub id: Uuid,        // 记录 ID
    pub ear_tag: String, // 关联 cattle_master（FK）

    // ===== 配种信息 =====
    pub date: NaiveDate,              // 配种日期
    pub method: InseminationMethod,   // 配种方式

    // ===== 孕检信息 =====
    pub check_status: PregnancyCheckStatus, // 孕检结果状态
    pub check_date: Option<NaiveDate>,      // 孕检日期

    // ===== 派生字段 =====
    pub expected_calving_date: NaiveDate, // 预产期（配种日+孕期长度,记录时落盘）

    // ===== 备注 =====
    pub notes: Option<String>, // 备注（终态后仍可修改）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
}

impl Insemination {
    /// 创建待检配种记录
    ///
    /// # 参数
    /// - gestation_length_days: 孕期长度（默认280天,见配置）
    pub fn new(
        ear_tag: &str,
        date: NaiveDate,
        method: InseminationMethod,
        gestation_length_days: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ear_tag: ear_tag.to_string(),
            date,
            method,
            check_status: PregnancyCheckStatus::Pending,
            check_date: None,
            expected_calving_date: date + chrono::Duration::days(gestation_length_days),
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// 写入孕检结果（终态校验由 LifecycleCoordinator 前置执行）
    pub fn apply_check(&mut self, result: PregnancyCheckStatus, check_date: NaiveDate) {
        self.check_status = result;
        self.check_date = Some(check_date);
    }
}

// ==========================================
// CalfDetail - 犊牛明细
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalfDetail {
    pub ear_tag: String,        // 犊牛耳标
    pub gender: Gender,         // 性别
    pub weight_kg: Option<f64>, // 出生体重（kg）
}

impl CalfDetail {
    /// 解析旧接口的逗号分隔犊牛串
    ///
    /// # 格式
    /// - 每条: "耳标:性别[:体重]"，多条以逗号分隔
    /// - 性别: M/F（大小写不敏感）
    ///
    /// # 示例
    /// - "CN-101:F:38.5,CN-102:M" → 两条明细
    pub fn parse_delimited(raw: &str) -> Result<Vec<CalfDetail>, String> {
        let mut details = Vec::new();
        for (idx, entry) in raw.split(',').enumerate() {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let parts: Vec<&str> = entry.split(':').map(|p| p.trim()).collect();
            if parts.len() < 2 || parts[0].is_empty() {
                return Err(format!("第{}条犊牛明细格式错误: {}", idx + 1, entry));
            }
            let gender = match parts[1].to_uppercase().as_str() {
                "M" | "MALE" => Gender::Male,
                "F" | "FEMALE" => Gender::Female,
                other => return Err(format!("第{}条犊牛性别无法识别: {}", idx + 1, other)),
            };
            let weight_kg = match parts.get(2) {
                Some(w) if !w.is_empty() => Some(
                    w.parse::<f64>()
                        .map_err(|_| format!("第{}条犊牛体重无法解析: {}", idx + 1, w))?,
                ),
                _ => None,
            };
            details.push(CalfDetail {
                ear_tag: parts[0].to_string(),
                gender,
                weight_kg,
            });
        }
        Ok(details)
    }
}

// ==========================================
// BirthRecord - 产犊记录
// ==========================================
// 用途: 触发犊牛建档 + 母牛状态重置（见 Gestation Engine 产犊规则）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthRecord {
    // ===== 主键与关联 =====
    pub id: Uuid,            // 记录 ID
    pub dam_ear_tag: String, // 母牛耳标（FK）

    // ===== 产犊信息 =====
    pub calving_date: NaiveDate,     // 产犊日期
    pub outcome: BirthOutcomeKind,   // 产犊结局
    pub calf_count: u32,             // 犊牛数量（须与明细条数一致）
    pub calves: Vec<CalfDetail>,     // 犊牛明细
    pub complications: Option<String>, // 并发症描述
    pub vet_assisted: bool,          // 兽医助产标志

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
}

impl BirthRecord {
    /// 创建产犊记录
    pub fn new(
        dam_ear_tag: &str,
        calving_date: NaiveDate,
        outcome: BirthOutcomeKind,
        calves: Vec<CalfDetail>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            dam_ear_tag: dam_ear_tag.to_string(),
            calving_date,
            outcome,
            calf_count: calves.len() as u32,
            calves,
            complications: None,
            vet_assisted: false,
            created_at: Utc::now(),
        }
    }
}
