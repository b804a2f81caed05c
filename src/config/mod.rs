// ==========================================
// 奶牛生命周期引擎 - 配置层
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 11. 配置项全集
// ==========================================
// 职责: 业务参数管理,按参数组读取
// 存储: JSON 文件（可选,缺省回落内置默认值）
// ==========================================

pub mod herd_config_trait;
pub mod herd_params;
pub mod static_config;

// 重导出配置接口与参数组
pub use herd_config_trait::HerdConfigReader;
pub use herd_params::{
    default_milestone_offsets, AlertWindows, GestationThresholds, MilestoneOffset, MilkPolicy,
};
pub use static_config::{ConfigError, StaticHerdConfig};
