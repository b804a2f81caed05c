// ==========================================
// 奶牛生命周期引擎 - 领域模型层
// ==========================================
// 依据: Herd_Master_Spec.md - PART C 数据与状态体系
// 依据: Lifecycle_Engine_Specs_v1.2.md - 主实体定义
// ==========================================
// 职责: 定义领域实体、类型、值对象
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod alert;
pub mod animal;
pub mod breeding;
pub mod care;
pub mod milestone;
pub mod milk;
pub mod types;

// 重导出核心类型
pub use alert::Alert;
pub use animal::{CattleMaster, CattleState};
pub use breeding::{BirthRecord, CalfDetail, Insemination};
pub use care::PeriodicCareRecord;
pub use milestone::{Milestone, MilestonePlan};
pub use milk::{DailyProduction, MilkRecord};
pub use types::{
    AlertPriority, AlertSource, BirthOutcomeKind, CareKind, Gender, GestationStage,
    GestationStatus, InseminationMethod, LactationState, LifeStage, MilestoneType,
    MilkShift, MilkingFrequency, PregnancyCheckStatus,
};
