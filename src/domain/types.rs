// ==========================================
// 奶牛生命周期引擎 - 领域类型定义
// ==========================================
// 依据: Herd_Master_Spec.md - PART A2 红线
// 依据: Lifecycle_Engine_Specs_v1.2.md - 0.2 等级体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,   // 公牛
    Female, // 母牛
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
        }
    }
}

// ==========================================
// 生命阶段 (Life Stage)
// ==========================================
// 依据: Lifecycle_Engine_Specs 2. Life Stage Classifier
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifeStage {
    Calf,   // 犊牛（<12月龄）
    Heifer, // 育成牛（12月龄以上、未产犊）
    Cow,    // 成母牛（≥24月龄且有产犊记录）
    Bull,   // 公牛（≥12月龄）
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeStage::Calf => write!(f, "CALF"),
            LifeStage::Heifer => write!(f, "HEIFER"),
            LifeStage::Cow => write!(f, "COW"),
            LifeStage::Bull => write!(f, "BULL"),
        }
    }
}

impl LifeStage {
    /// 从字符串解析生命阶段
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "HEIFER" => LifeStage::Heifer,
            "COW" => LifeStage::Cow,
            "BULL" => LifeStage::Bull,
            _ => LifeStage::Calf, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LifeStage::Calf => "CALF",
            LifeStage::Heifer => "HEIFER",
            LifeStage::Cow => "COW",
            LifeStage::Bull => "BULL",
        }
    }
}

// ==========================================
// 妊娠状态 (Gestation Status)
// ==========================================
// 依据: Lifecycle_Engine_Specs 3.1 妊娠状态机
// 红线: 状态由 (last_insemination_date, today) 推导,引擎外不得直接改写
// 说明: IN_OESTRUS/DRY_OFF 为协作方设置的展示状态,推导只产出
//       NOT_PREGNANT/PREGNANT/CALVING 三种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestationStatus {
    NotPregnant, // 空怀
    InOestrus,   // 发情期
    Pregnant,    // 妊娠
    Calving,     // 临产
    DryOff,      // 干奶期
}

impl fmt::Display for GestationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestationStatus::NotPregnant => write!(f, "NOT_PREGNANT"),
            GestationStatus::InOestrus => write!(f, "IN_OESTRUS"),
            GestationStatus::Pregnant => write!(f, "PREGNANT"),
            GestationStatus::Calving => write!(f, "CALVING"),
            GestationStatus::DryOff => write!(f, "DRY_OFF"),
        }
    }
}

impl GestationStatus {
    /// 从字符串解析妊娠状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "IN_OESTRUS" => GestationStatus::InOestrus,
            "PREGNANT" => GestationStatus::Pregnant,
            "CALVING" => GestationStatus::Calving,
            "DRY_OFF" => GestationStatus::DryOff,
            _ => GestationStatus::NotPregnant, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            GestationStatus::NotPregnant => "NOT_PREGNANT",
            GestationStatus::InOestrus => "IN_OESTRUS",
            GestationStatus::Pregnant => "PREGNANT",
            GestationStatus::Calving => "CALVING",
            GestationStatus::DryOff => "DRY_OFF",
        }
    }
}

// ==========================================
// 妊娠阶段 (Gestation Stage)
// ==========================================
// 依据: Lifecycle_Engine_Specs 3.2 孕期分段
// 分段边界: 95/190/269 天,≥270 天进入 CALVING
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestationStage {
    NotPregnant,     // 空怀
    FirstTrimester,  // 妊娠初期（0-95天）
    SecondTrimester, // 妊娠中期（96-190天）
    ThirdTrimester,  // 妊娠后期（191-269天）
    Calving,         // 临产（≥270天）
}

impl fmt::Display for GestationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestationStage::NotPregnant => write!(f, "NOT_PREGNANT"),
            GestationStage::FirstTrimester => write!(f, "FIRST_TRIMESTER"),
            GestationStage::SecondTrimester => write!(f, "SECOND_TRIMESTER"),
            GestationStage::ThirdTrimester => write!(f, "THIRD_TRIMESTER"),
            GestationStage::Calving => write!(f, "CALVING"),
        }
    }
}

// ==========================================
// 配种方式 (Insemination Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InseminationMethod {
    Natural,    // 自然交配
    Artificial, // 人工授精
}

impl fmt::Display for InseminationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InseminationMethod::Natural => write!(f, "NATURAL"),
            InseminationMethod::Artificial => write!(f, "ARTIFICIAL"),
        }
    }
}

// ==========================================
// 孕检结果状态 (Pregnancy Check Status)
// ==========================================
// 红线: PENDING → CONFIRMED / PENDING → NEGATIVE 单向转换,终态不可回退
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PregnancyCheckStatus {
    Pending,   // 待检
    Confirmed, // 确认受孕
    Negative,  // 确认未孕
}

impl fmt::Display for PregnancyCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PregnancyCheckStatus::Pending => write!(f, "PENDING"),
            PregnancyCheckStatus::Confirmed => write!(f, "CONFIRMED"),
            PregnancyCheckStatus::Negative => write!(f, "NEGATIVE"),
        }
    }
}

impl PregnancyCheckStatus {
    /// 是否终态（终态后仅允许修改备注）
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PregnancyCheckStatus::Pending)
    }
}

// ==========================================
// 产犊结局 (Birth Outcome)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BirthOutcomeKind {
    Successful,       // 顺产
    Complications,    // 难产/并发症
    Stillborn,        // 死胎
    DiedShortlyAfter, // 产后不久死亡
}

impl fmt::Display for BirthOutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthOutcomeKind::Successful => write!(f, "SUCCESSFUL"),
            BirthOutcomeKind::Complications => write!(f, "COMPLICATIONS"),
            BirthOutcomeKind::Stillborn => write!(f, "STILLBORN"),
            BirthOutcomeKind::DiedShortlyAfter => write!(f, "DIED_SHORTLY_AFTER"),
        }
    }
}

impl BirthOutcomeKind {
    /// 是否为异常结局（触发健康预警）
    pub fn is_distress(&self) -> bool {
        !matches!(self, BirthOutcomeKind::Successful)
    }
}

// ==========================================
// 挤奶频次 (Milking Frequency)
// ==========================================
// 依据: Lifecycle_Engine_Specs 6. Milk Schedule Engine
// CUSTOM 表示人工排班覆盖,引擎不再按产量自动调整
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilkingFrequency {
    Once,   // 每日一次
    Twice,  // 每日两次
    Thrice, // 每日三次
    Custom, // 人工排班
}

impl fmt::Display for MilkingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilkingFrequency::Once => write!(f, "ONCE"),
            MilkingFrequency::Twice => write!(f, "TWICE"),
            MilkingFrequency::Thrice => write!(f, "THRICE"),
            MilkingFrequency::Custom => write!(f, "CUSTOM"),
        }
    }
}

impl MilkingFrequency {
    /// 从字符串解析挤奶频次
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "TWICE" => MilkingFrequency::Twice,
            "THRICE" => MilkingFrequency::Thrice,
            "CUSTOM" => MilkingFrequency::Custom,
            _ => MilkingFrequency::Once, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MilkingFrequency::Once => "ONCE",
            MilkingFrequency::Twice => "TWICE",
            MilkingFrequency::Thrice => "THRICE",
            MilkingFrequency::Custom => "CUSTOM",
        }
    }
}

// ==========================================
// 挤奶班次 (Milk Shift)
// ==========================================
// 唯一性约束: (ear_tag, date, shift) 最多一条记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilkShift {
    Morning, // 早班
    Midday,  // 午班
    Evening, // 晚班
    Custom,  // 自定义班次（须附带实际挤奶时间）
}

impl fmt::Display for MilkShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilkShift::Morning => write!(f, "MORNING"),
            MilkShift::Midday => write!(f, "MIDDAY"),
            MilkShift::Evening => write!(f, "EVENING"),
            MilkShift::Custom => write!(f, "CUSTOM"),
        }
    }
}

// ==========================================
// 泌乳状态 (Lactation State)
// ==========================================
// 由泌乳天数推导: 无产犊记录 → NOT_LACTATING; >305天 → DRY; 否则 LACTATING
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LactationState {
    NotLactating, // 未泌乳（从未产犊）
    Lactating,    // 泌乳期
    Dry,          // 干奶期
}

impl fmt::Display for LactationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LactationState::NotLactating => write!(f, "NOT_LACTATING"),
            LactationState::Lactating => write!(f, "LACTATING"),
            LactationState::Dry => write!(f, "DRY"),
        }
    }
}

// ==========================================
// 预警优先级 (Alert Priority)
// ==========================================
// 红线: 等级制,不是评分制
// 顺序: Low < Medium < High < Emergency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    Low,       // 低
    Medium,    // 中
    High,      // 高
    Emergency, // 紧急
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertPriority::Low => write!(f, "LOW"),
            AlertPriority::Medium => write!(f, "MEDIUM"),
            AlertPriority::High => write!(f, "HIGH"),
            AlertPriority::Emergency => write!(f, "EMERGENCY"),
        }
    }
}

impl AlertPriority {
    /// 展示排序权重（越小越靠前）
    ///
    /// EMERGENCY=0 / HIGH=1 / MEDIUM=2 / LOW=3
    pub fn rank(&self) -> u8 {
        match self {
            AlertPriority::Emergency => 0,
            AlertPriority::High => 1,
            AlertPriority::Medium => 2,
            AlertPriority::Low => 3,
        }
    }

    /// 从字符串解析预警优先级
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "MEDIUM" => AlertPriority::Medium,
            "HIGH" => AlertPriority::High,
            "EMERGENCY" => AlertPriority::Emergency,
            _ => AlertPriority::Low, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AlertPriority::Low => "LOW",
            AlertPriority::Medium => "MEDIUM",
            AlertPriority::High => "HIGH",
            AlertPriority::Emergency => "EMERGENCY",
        }
    }
}

// ==========================================
// 预警来源 (Alert Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSource {
    Reproduction, // 繁殖
    Health,       // 健康
    General,      // 综合
}

impl fmt::Display for AlertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSource::Reproduction => write!(f, "REPRODUCTION"),
            AlertSource::Health => write!(f, "HEALTH"),
            AlertSource::General => write!(f, "GENERAL"),
        }
    }
}

// ==========================================
// 里程碑类型 (Milestone Type)
// ==========================================
// 依据: Lifecycle_Engine_Specs 4. Milestone Generator - 偏移表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneType {
    HealthCheck,     // 健康检查
    Vaccination,     // 疫苗接种
    NutritionChange, // 营养调整
    TrimesterStart,  // 孕期阶段转换
    Preparation,     // 产前准备
}

impl fmt::Display for MilestoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneType::HealthCheck => write!(f, "HEALTH_CHECK"),
            MilestoneType::Vaccination => write!(f, "VACCINATION"),
            MilestoneType::NutritionChange => write!(f, "NUTRITION_CHANGE"),
            MilestoneType::TrimesterStart => write!(f, "TRIMESTER_START"),
            MilestoneType::Preparation => write!(f, "PREPARATION"),
        }
    }
}

// ==========================================
// 周期性护理类型 (Care Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CareKind {
    Vaccination, // 周期性疫苗
    Treatment,   // 周期性诊疗
}

impl fmt::Display for CareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CareKind::Vaccination => write!(f, "VACCINATION"),
            CareKind::Treatment => write!(f, "TREATMENT"),
        }
    }
}
