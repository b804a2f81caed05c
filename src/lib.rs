// ==========================================
// 奶牛生命周期引擎 - 核心库
// ==========================================
// 依据: Herd_Master_Spec.md - 系统宪法
// 技术栈: Rust + Tokio
// 系统定位: 推导引擎库 (档案/记录的落库由协作系统负责)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 推导规则
pub mod engine;

// 配置层 - 业务参数
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AlertPriority, AlertSource, BirthOutcomeKind, CareKind, Gender, GestationStage,
    GestationStatus, InseminationMethod, LactationState, LifeStage, MilestoneType, MilkShift,
    MilkingFrequency, PregnancyCheckStatus,
};

// 领域实体
pub use domain::{
    Alert, BirthRecord, CalfDetail, CattleMaster, CattleState, DailyProduction, Insemination,
    Milestone, MilestonePlan, MilkRecord, PeriodicCareRecord,
};

// 引擎
pub use engine::{
    AlertEngine, GestationEngine, LifeStageClassifier, LifecycleCoordinator, LifecycleError,
    LifecycleResult, MilestoneGenerator, MilkScheduleEngine,
};

// 配置
pub use config::{
    AlertWindows, GestationThresholds, HerdConfigReader, MilestoneOffset, MilkPolicy,
    StaticHerdConfig,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "奶牛生命周期引擎";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
