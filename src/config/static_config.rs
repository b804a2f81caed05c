// ==========================================
// 奶牛生命周期引擎 - 静态配置实现
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 11. 配置项全集
// 职责: 配置加载、持久化、默认值回落
// 存储: JSON 文件（四个参数组 + 里程碑偏移表）
// ==========================================

use crate::config::herd_config_trait::HerdConfigReader;
use crate::config::herd_params::{
    default_milestone_offsets, AlertWindows, GestationThresholds, MilestoneOffset, MilkPolicy,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use thiserror::Error;

// ==========================================
// ConfigError - 配置层错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// ==========================================
// StaticHerdConfig - 静态配置
// ==========================================
// 说明: 字段级缺省回落（容器级 serde(default)）,部分文件也能加载
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticHerdConfig {
    /// 妊娠阈值组
    pub gestation: GestationThresholds,
    /// 预警窗口组
    pub alert_windows: AlertWindows,
    /// 产奶策略组
    pub milk_policy: MilkPolicy,
    /// 里程碑偏移表
    pub milestone_offsets: Vec<MilestoneOffset>,
}

impl Default for StaticHerdConfig {
    fn default() -> Self {
        Self {
            gestation: GestationThresholds::default(),
            alert_windows: AlertWindows::default(),
            milk_policy: MilkPolicy::default(),
            milestone_offsets: default_milestone_offsets(),
        }
    }
}

impl StaticHerdConfig {
    /// 创建默认配置实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(StaticHerdConfig): 加载成功（缺失字段回落默认值）
    /// - Err(ConfigError): 文件读取或解析失败
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 从 JSON 文件加载配置,文件缺失时回落默认配置
    ///
    /// # 说明
    /// 仅文件不存在时回落;文件存在但解析失败仍然报错,避免吞掉配置错误
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "配置文件不存在,使用默认配置");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// 将当前配置写入 JSON 文件（pretty 格式,便于人工调整）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let raw = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        std::fs::write(path, raw).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}

// ==========================================
// HerdConfigReader Trait 实现
// ==========================================
#[async_trait]
impl HerdConfigReader for StaticHerdConfig {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herd_config.json");

        let mut config = StaticHerdConfig::new();
        config.gestation.gestation_length_days = 283;
        config.save_to_file(&path).unwrap();

        let loaded = StaticHerdConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.gestation.gestation_length_days, 283, "覆写值应存活");
        assert_eq!(loaded.milestone_offsets.len(), 8, "偏移表应完整写回");
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"alert_windows": {"calving_lead_days": 10}}"#).unwrap();

        let loaded = StaticHerdConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.alert_windows.calving_lead_days, 10);
        assert_eq!(loaded.alert_windows.pregnancy_check_offset_days, 30, "缺失字段应回落默认值");
        assert_eq!(loaded.gestation.calving_from_days, 270, "缺失参数组应回落默认值");
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_file.json");

        let loaded = StaticHerdConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.gestation.gestation_length_days, 280);
    }

    #[test]
    fn test_broken_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = StaticHerdConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "解析失败不得静默回落");
    }

    #[tokio::test]
    async fn test_reader_trait_returns_configured_values() {
        let mut config = StaticHerdConfig::new();
        config.milk_policy.thrice_min_yield_l = 28.0;

        let policy = config.get_milk_policy().await.unwrap();
        assert_eq!(policy.thrice_min_yield_l, 28.0);

        let offsets = config.get_milestone_offsets().await.unwrap();
        assert_eq!(offsets[0].offset_days, 30);
    }
}
