// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use herd_lifecycle_engine::config::{
    default_milestone_offsets, AlertWindows, GestationThresholds, HerdConfigReader,
    MilestoneOffset, MilkPolicy,
};
use std::error::Error;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockHerdConfig {
    pub gestation: GestationThresholds,
    pub alert_windows: AlertWindows,
    pub milk_policy: MilkPolicy,
    pub milestone_offsets: Vec<MilestoneOffset>,
}

impl MockHerdConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            gestation: GestationThresholds::default(),
            alert_windows: AlertWindows::default(),
            milk_policy: MilkPolicy::default(),
            milestone_offsets: default_milestone_offsets(),
        }
    }

    /// 创建自定义孕期长度配置
    pub fn with_gestation_length(days: i64) -> Self {
        let mut config = Self::default();
        config.gestation.gestation_length_days = days;
        config
    }

    /// 创建自定义产量分界配置
    pub fn with_yield_cutoffs(twice_min: f64, thrice_min: f64) -> Self {
        let mut config = Self::default();
        config.milk_policy.twice_min_yield_l = twice_min;
        config.milk_policy.thrice_min_yield_l = thrice_min;
        config
    }

    /// 创建自定义预警窗口配置
    pub fn with_calving_lead_days(days: i64) -> Self {
        let mut config = Self::default();
        config.alert_windows.calving_lead_days = days;
        config
    }
}

#[async_trait]
impl HerdConfigReader for MockHerdConfig {
    async fn get_gestation_thresholds(
        &self,
    ) -> Result<GestationThresholds, Box<dyn Error + Send + Sync>> {
        Ok(self.gestation.clone())
    }

    async fn get_alert_windows(&self) -> Result<AlertWindows, Box<dyn Error + Send + Sync>> {
        Ok(self.alert_windows.clone())
    }

    async fn get_milk_policy(&self) -> Result<MilkPolicy, Box<dyn Error + Send + Sync>> {
        Ok(self.milk_policy.clone())
    }

    async fn get_milestone_offsets(
        &self,
    ) -> Result<Vec<MilestoneOffset>, Box<dyn Error + Send + Sync>> {
        Ok(self.milestone_offsets.clone())
    }
}
