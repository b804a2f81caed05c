// ==========================================
// 奶牛生命周期引擎 - 产奶记录模型
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - milk_record
// 红线: (ear_tag, date, shift) 唯一,重复录入在引擎层拒绝
// ==========================================

use crate::domain::types::MilkShift;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// MilkRecord - 单班次产奶记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilkRecord {
    // ===== 关联 =====
    pub ear_tag: String, // 关联 cattle_master（FK）

    // ===== 记录维度 =====
    pub date: NaiveDate,                  // 挤奶日期
    pub shift: MilkShift,                 // 班次
    pub recorded_time: Option<NaiveTime>, // 实际挤奶时间（CUSTOM 班次必填）

    // ===== 产量 =====
    pub quantity_l: f64, // 产奶量（升）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
}

impl MilkRecord {
    /// 创建班次产奶记录
    pub fn new(ear_tag: &str, date: NaiveDate, shift: MilkShift, quantity_l: f64) -> Self {
        Self {
            ear_tag: ear_tag.to_string(),
            date,
            shift,
            recorded_time: None,
            quantity_l,
            created_at: Utc::now(),
        }
    }

    /// 附带实际挤奶时间
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.recorded_time = Some(time);
        self
    }
}

// ==========================================
// DailyProduction - 按日汇总产量
// ==========================================
// 用途: 产量窗口汇总（7/30/90/300天）,最新日期在前
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyProduction {
    pub date: NaiveDate,    // 日期
    pub total_l: f64,       // 当日总产量（升）
    pub record_count: u32,  // 当日记录条数
}
