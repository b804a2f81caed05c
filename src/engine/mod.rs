// ==========================================
// 奶牛生命周期引擎 - 引擎层
// ==========================================
// 依据: Herd_Master_Spec.md - PART C 推导引擎体系
// 依据: Lifecycle_Engine_Specs_v1.2.md - 1.2 模块拆分
// ==========================================
// 职责: 实现生命周期推导规则,不做持久化
// 红线: 引擎不落库, 所有规则必须输出 reason
// ==========================================

pub mod alerts;
pub mod coordinator;
pub mod error;
pub mod gestation;
pub mod life_stage;
pub mod milestone_plan;
pub mod milk_schedule;

// 重导出核心引擎
pub use alerts::AlertEngine;
pub use coordinator::{
    BirthOutcome, CareScanOutcome, DailyRefreshOutcome, InseminationOutcome, LifecycleCoordinator,
    MilkYieldOutcome, PregnancyCheckOutcome, RemovalOutcome,
};
pub use error::{LifecycleError, LifecycleResult};
pub use gestation::{GestationEngine, GestationSnapshot};
pub use life_stage::LifeStageClassifier;
pub use milestone_plan::MilestoneGenerator;
pub use milk_schedule::MilkScheduleEngine;
