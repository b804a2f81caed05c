// ==========================================
// 奶牛生命周期引擎 - 牛只领域模型
// ==========================================
// 依据: Herd_Master_Spec.md - PART C 数据与状态体系
// 依据: Lifecycle_Engine_Specs_v1.2.md - cattle_master/cattle_state
// 依据: herd_data_dictionary_v0.1.md - 数据字典
// ==========================================

use crate::domain::types::{Gender, GestationStage, GestationStatus, LifeStage, MilkingFrequency};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// CattleMaster - 牛只主数据
// ==========================================
// 红线: 登记事实层,引擎层只读
// 用途: 登记/采购入栏时写入,之后仅协作方修正
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CattleMaster {
    // ===== 主键 =====
    pub ear_tag: String, // 耳标号（唯一标识）

    // ===== 基础信息 =====
    pub breed: Option<String>,          // 品种（如 Holstein）
    pub birth_date: Option<NaiveDate>,  // 出生日期（可能缺失：收购牛）
    pub gender: Gender,                 // 性别

    // ===== 谱系信息（按耳标引用，不做外键校验）=====
    pub dam_ear_tag: Option<String>,  // 母本耳标
    pub sire_ear_tag: Option<String>, // 父本耳标

    // ===== 来源信息 =====
    pub purchase_source: Option<String>,    // 收购来源（自繁为 None）
    pub purchase_date: Option<NaiveDate>,   // 收购日期

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl CattleMaster {
    /// 创建登记主数据（自繁犊牛/新登记）
    pub fn new(ear_tag: &str, gender: Gender, birth_date: Option<NaiveDate>) -> Self {
        let now = Utc::now();
        Self {
            ear_tag: ear_tag.to_string(),
            breed: None,
            birth_date,
            gender,
            dam_ear_tag: None,
            sire_ear_tag: None,
            purchase_source: None,
            purchase_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// ==========================================
// CattleState - 牛只系统状态
// ==========================================
// 红线: 唯一事实层,全部派生字段只能经 LifecycleCoordinator 写入
// 用途: 引擎写入,预警/排班依据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CattleState {
    // ===== 主键与关联 =====
    pub ear_tag: String, // 关联 cattle_master（FK）

    // ===== 生命阶段（Life Stage Classifier 输出）=====
    pub life_stage: LifeStage, // 生命阶段（CALF/HEIFER/COW/BULL）

    // ===== 妊娠状态（Gestation Engine 输出）=====
    pub gestation_status: GestationStatus, // 妊娠状态（粗粒度）
    pub gestation_stage: GestationStage,   // 妊娠阶段（细粒度,分段边界95/190/269）
    pub last_insemination_date: Option<NaiveDate>, // 最近配种日期（状态机唯一输入）
    pub pregnancy_confirmed: bool,         // 孕检已确认标志（抑制孕检提醒）
    pub expected_calving_date: Option<NaiveDate>, // 预产期（配种日+280,空怀为 None）
    pub expected_insemination_date: Option<NaiveDate>, // 建议下次配种日期

    // ===== 产犊履历 =====
    pub last_calving_date: Option<NaiveDate>, // 最近产犊日期
    pub calving_count: u32,                   // 产犊次数
    pub lactation_number: u32,                // 当前泌乳胎次
    pub avg_calving_interval_days: Option<f64>, // 平均产犊间隔（天,不足两次产犊为 None）

    // ===== 挤奶排班（Milk Schedule Engine 输出）=====
    pub milking_frequency: MilkingFrequency,  // 挤奶频次
    pub custom_milking_times: Vec<NaiveTime>, // 人工排班时间（升序,空表示无覆盖）
    pub avg_daily_yield_l: Option<f64>,       // 近30日平均日产奶量（升）

    // ===== 审计字段 =====
    pub updated_at: DateTime<Utc>,  // 最后更新时间
    pub updated_by: Option<String>, // 操作人/系统标识
}

impl CattleState {
    /// 创建初始状态（登记/犊牛出生时）
    pub fn initial(ear_tag: &str, life_stage: LifeStage) -> Self {
        Self {
            ear_tag: ear_tag.to_string(),
            life_stage,
            gestation_status: GestationStatus::NotPregnant,
            gestation_stage: GestationStage::NotPregnant,
            last_insemination_date: None,
            pregnancy_confirmed: false,
            expected_calving_date: None,
            expected_insemination_date: None,
            last_calving_date: None,
            calving_count: 0,
            lactation_number: 0,
            avg_calving_interval_days: None,
            milking_frequency: MilkingFrequency::Once,
            custom_milking_times: Vec::new(),
            avg_daily_yield_l: None,
            updated_at: Utc::now(),
            updated_by: None,
        }
    }

    /// 是否有产犊记录（生命阶段判定输入）
    pub fn has_calved(&self) -> bool {
        self.calving_count > 0 || self.last_calving_date.is_some()
    }

    /// 更新审计字段
    pub fn touch(&mut self, updated_by: &str) {
        self.updated_at = Utc::now();
        self.updated_by = Some(updated_by.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_open() {
        // 初始状态: 空怀、无履历
        let state = CattleState::initial("CN-0001", LifeStage::Calf);
        assert_eq!(state.gestation_status, GestationStatus::NotPregnant);
        assert_eq!(state.gestation_stage, GestationStage::NotPregnant);
        assert!(state.expected_calving_date.is_none());
        assert!(!state.has_calved());
    }

    #[test]
    fn test_has_calved_by_count_or_date() {
        let mut state = CattleState::initial("CN-0001", LifeStage::Cow);
        state.calving_count = 1;
        assert!(state.has_calved(), "产犊次数>0 应视为已产犊");

        let mut state2 = CattleState::initial("CN-0002", LifeStage::Cow);
        state2.last_calving_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        assert!(state2.has_calved(), "有产犊日期应视为已产犊");
    }
}
