// ==========================================
// 奶牛生命周期引擎 - 业务参数对象
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 11. 配置项全集
// 说明: 天数阈值为产品口径（见规则评审记录）,全部可配置,默认值即生产口径
// ==========================================

use crate::domain::types::MilestoneType;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// 构造时分常量（输入恒为合法时分）
fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}

// ==========================================
// GestationThresholds - 妊娠阈值
// ==========================================
// 分段: 0-95 初期 / 96-190 中期 / 191-269 后期 / ≥270 临产
// 注意: 孕期长度(280)与临产阈值(270)是两个口径,不得合并
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestationThresholds {
    /// 妊娠初期上界（天,含）
    pub first_trimester_max_days: i64,
    /// 妊娠中期上界（天,含）
    pub second_trimester_max_days: i64,
    /// 临产起始天数（天,含）
    pub calving_from_days: i64,
    /// 孕程报告第一期上界（天,含;与阶段分界独立维护,调用口径不同）
    pub trimester_first_max_days: i64,
    /// 孕程报告第二期上界（天,含;与阶段分界独立维护）
    pub trimester_second_max_days: i64,
    /// 孕期长度（天,预产期 = 配种日 + 此值）
    pub gestation_length_days: i64,
    /// 发情周期（天,负孕检后建议配种日 = 当日 + 此值）
    pub oestrus_cycle_days: i64,
    /// 产后休养期（天,产犊后建议配种日 = 产犊日 + 此值）
    pub post_calving_rest_days: i64,
}

impl Default for GestationThresholds {
    fn default() -> Self {
        Self {
            first_trimester_max_days: 95,
            second_trimester_max_days: 190,
            calving_from_days: 270,
            trimester_first_max_days: 95,
            trimester_second_max_days: 190,
            gestation_length_days: 280,
            oestrus_cycle_days: 21,
            post_calving_rest_days: 60,
        }
    }
}

// ==========================================
// AlertWindows - 预警窗口
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertWindows {
    /// 孕检基准偏移（天,孕检到期日 = 配种日 + 此值）
    pub pregnancy_check_offset_days: i64,
    /// 孕检提醒提前量（天）
    pub pregnancy_check_lead_days: i64,
    /// 产犊提醒提前量（天）
    pub calving_lead_days: i64,
    /// 配种提醒提前量（天）
    pub insemination_lead_days: i64,
    /// 育成牛适配月龄下界（月,含）
    pub heifer_breeding_min_months: i64,
    /// 育成牛适配月龄上界（月,含）
    pub heifer_breeding_max_months: i64,
}

impl Default for AlertWindows {
    fn default() -> Self {
        Self {
            pregnancy_check_offset_days: 30,
            pregnancy_check_lead_days: 7,
            calving_lead_days: 14,
            insemination_lead_days: 14,
            heifer_breeding_min_months: 15,
            heifer_breeding_max_months: 18,
        }
    }
}

// ==========================================
// MilkPolicy - 产奶策略
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MilkPolicy {
    /// 日均产量超过此值 → 每日三次（升）
    pub thrice_min_yield_l: f64,
    /// 日均产量超过此值 → 每日两次（升）
    pub twice_min_yield_l: f64,
    /// 实际挤奶时间与排班时间的容差（小时）
    pub record_tolerance_hours: i64,
    /// 平均产量统计窗口（天）
    pub average_window_days: i64,
    /// 干奶判定泌乳天数（天,超过即视为干奶期）
    pub dry_off_days_in_milk: i64,
    /// 每日一次默认排班
    pub once_schedule: Vec<NaiveTime>,
    /// 每日两次默认排班
    pub twice_schedule: Vec<NaiveTime>,
    /// 每日三次默认排班
    pub thrice_schedule: Vec<NaiveTime>,
}

impl Default for MilkPolicy {
    fn default() -> Self {
        Self {
            thrice_min_yield_l: 25.0,
            twice_min_yield_l: 15.0,
            record_tolerance_hours: 2,
            average_window_days: 30,
            dry_off_days_in_milk: 305,
            once_schedule: vec![hm(6, 0)],
            twice_schedule: vec![hm(6, 0), hm(18, 0)],
            thrice_schedule: vec![hm(6, 0), hm(14, 0), hm(22, 0)],
        }
    }
}

// ==========================================
// MilestoneOffset - 里程碑偏移表条目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneOffset {
    /// 自配种日起的偏移（天）
    pub offset_days: i64,
    /// 里程碑类型
    pub milestone_type: MilestoneType,
    /// 描述
    pub description: String,
}

impl MilestoneOffset {
    fn new(offset_days: i64, milestone_type: MilestoneType, description: &str) -> Self {
        Self {
            offset_days,
            milestone_type,
            description: description.to_string(),
        }
    }
}

/// 默认里程碑偏移表（8条,偏移升序）
pub fn default_milestone_offsets() -> Vec<MilestoneOffset> {
    vec![
        MilestoneOffset::new(30, MilestoneType::HealthCheck, "妊娠初期健康检查"),
        MilestoneOffset::new(60, MilestoneType::Vaccination, "孕期疫苗接种"),
        MilestoneOffset::new(95, MilestoneType::TrimesterStart, "进入妊娠中期"),
        MilestoneOffset::new(120, MilestoneType::HealthCheck, "妊娠中期健康检查"),
        MilestoneOffset::new(150, MilestoneType::NutritionChange, "调整孕中期日粮"),
        MilestoneOffset::new(190, MilestoneType::TrimesterStart, "进入妊娠后期"),
        MilestoneOffset::new(210, MilestoneType::HealthCheck, "妊娠后期健康检查"),
        MilestoneOffset::new(260, MilestoneType::Preparation, "产房与产前准备"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_product_baseline() {
        let t = GestationThresholds::default();
        assert_eq!(t.first_trimester_max_days, 95);
        assert_eq!(t.second_trimester_max_days, 190);
        assert_eq!(t.calving_from_days, 270);
        assert_eq!(t.gestation_length_days, 280);
    }

    #[test]
    fn test_default_offsets_sorted_and_complete() {
        let offsets = default_milestone_offsets();
        assert_eq!(offsets.len(), 8, "默认偏移表应为8条");
        assert!(
            offsets.windows(2).all(|w| w[0].offset_days < w[1].offset_days),
            "偏移表应严格升序"
        );
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        // 容器级 serde(default): 缺失字段回落默认值
        let policy: MilkPolicy = serde_json::from_str(r#"{"thrice_min_yield_l": 30.0}"#).unwrap();
        assert_eq!(policy.thrice_min_yield_l, 30.0);
        assert_eq!(policy.twice_min_yield_l, 15.0);
        assert_eq!(policy.thrice_schedule.len(), 3);
    }
}
