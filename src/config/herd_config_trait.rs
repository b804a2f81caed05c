// ==========================================
// 奶牛生命周期引擎 - 配置读取接口
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 11. 配置项全集
// 职责: 为引擎提供业务参数的唯一读取入口
// 红线: 引擎层只依赖本 trait,不依赖任何具体配置来源
// ==========================================

use crate::config::herd_params::{AlertWindows, GestationThresholds, MilestoneOffset, MilkPolicy};
use async_trait::async_trait;
use std::error::Error;

/// 业务参数读取接口
///
/// 实现方可以是静态文件、数据库或远端配置中心,引擎层不感知来源。
/// 错误类型收敛为 `Box<dyn Error + Send + Sync>`,便于协调器在异步边界上传递。
#[async_trait]
pub trait HerdConfigReader: Send + Sync {
    /// 读取妊娠阈值组
    ///
    /// # 返回
    /// 妊娠分段、孕期长度、发情周期与产后休养期参数
    ///
    /// # 默认值
    /// 95 / 190 / 270 / 280 / 21 / 60（天）
    async fn get_gestation_thresholds(
        &self,
    ) -> Result<GestationThresholds, Box<dyn Error + Send + Sync>>;

    /// 读取预警窗口组
    ///
    /// # 返回
    /// 孕检、产犊、配种提醒的提前量与育成牛适配月龄区间
    ///
    /// # 默认值
    /// 孕检偏移30天、提前7天;产犊提前14天;配种提前14天;适配月龄15~18月
    async fn get_alert_windows(&self) -> Result<AlertWindows, Box<dyn Error + Send + Sync>>;

    /// 读取产奶策略组
    ///
    /// # 返回
    /// 挤奶频次阈值、记录容差、平均窗口、干奶判定天数与各频次默认排班
    ///
    /// # 默认值
    /// 三次>25升、两次>15升;容差2小时;窗口30天;干奶305天
    async fn get_milk_policy(&self) -> Result<MilkPolicy, Box<dyn Error + Send + Sync>>;

    /// 读取里程碑偏移表
    ///
    /// # 返回
    /// 自配种日起的偏移条目,按偏移天数升序
    ///
    /// # 默认值
    /// 8条: 30/60/95/120/150/190/210/260 天
    async fn get_milestone_offsets(
        &self,
    ) -> Result<Vec<MilestoneOffset>, Box<dyn Error + Send + Sync>>;
}
