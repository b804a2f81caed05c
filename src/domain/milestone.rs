// ==========================================
// 奶牛生命周期引擎 - 妊娠里程碑模型
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 4. Milestone Generator
// 红线: 重建采用"删除未完成+重建"策略,已完成里程碑永不删除
// ==========================================

use crate::domain::types::MilestoneType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Milestone - 妊娠里程碑
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    // ===== 主键与关联 =====
    pub id: Uuid,        // 里程碑 ID
    pub ear_tag: String, // 关联 cattle_master（FK）

    // ===== 内容 =====
    pub milestone_type: MilestoneType, // 类型
    pub due_date: NaiveDate,           // 到期日（配种日+偏移）
    pub description: String,           // 描述

    // ===== 完成状态 =====
    pub completed: bool,                  // 完成标志
    pub completed_date: Option<NaiveDate>, // 完成日期

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 生成时间
}

impl Milestone {
    /// 创建未完成里程碑
    pub fn new(
        ear_tag: &str,
        milestone_type: MilestoneType,
        due_date: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ear_tag: ear_tag.to_string(),
            milestone_type,
            due_date,
            description,
            completed: false,
            completed_date: None,
            created_at: Utc::now(),
        }
    }

    /// 标记完成
    pub fn complete(&mut self, date: NaiveDate) {
        self.completed = true;
        self.completed_date = Some(date);
    }
}

// ==========================================
// MilestonePlan - 里程碑重建计划
// ==========================================
// 用途: 生成器输出值对象,协作方据此删除/落盘
#[derive(Debug, Clone, Default)]
pub struct MilestonePlan {
    pub remove_ids: Vec<Uuid>,    // 应删除的未完成里程碑 ID
    pub created: Vec<Milestone>,  // 新生成批次
    pub skipped_past: usize,      // 因到期日已过被跳过的条目数
}

impl MilestonePlan {
    /// 空计划（无删除、无新建）
    pub fn empty() -> Self {
        Self::default()
    }
}
