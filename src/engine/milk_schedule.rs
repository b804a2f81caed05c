// ==========================================
// 奶牛生命周期引擎 - 产奶排班引擎
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 6. MilkScheduleEngine
// 红线: 自定义排班永远优先于频次默认排班
// ==========================================
// 职责: 排班映射、频次推导、泌乳判定、记录校验、窗口均值
// 输入: cattle_state 字段 + 产奶记录
// 输出: 排班表 / 频次 / 校验结果 / 均值
// ==========================================

use crate::config::herd_params::MilkPolicy;
use crate::domain::milk::{DailyProduction, MilkRecord};
use crate::domain::types::{Gender, LactationState, MilkingFrequency};
use crate::engine::error::{LifecycleError, LifecycleResult};
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// MilkScheduleEngine - 产奶排班引擎
// ==========================================
pub struct MilkScheduleEngine {}

impl MilkScheduleEngine {
    /// 创建新的产奶排班引擎
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 排班与频次
    // ==========================================

    /// 求排班表
    ///
    /// # 规则 (Lifecycle_Specs 6.1)
    /// 1. custom_times 非空 → 原样返回（自定义优先）
    /// 2. 否则按频次映射默认排班: 一次[06:00] / 两次[06:00,18:00] / 三次[06:00,14:00,22:00]
    /// 3. CUSTOM 频次但未配置自定义时间 → 回落一次排班（防御口径）
    pub fn schedule(
        &self,
        frequency: MilkingFrequency,
        custom_times: &[NaiveTime],
        policy: &MilkPolicy,
    ) -> Vec<NaiveTime> {
        if !custom_times.is_empty() {
            return custom_times.to_vec();
        }

        match frequency {
            MilkingFrequency::Once => policy.once_schedule.clone(),
            MilkingFrequency::Twice => policy.twice_schedule.clone(),
            MilkingFrequency::Thrice => policy.thrice_schedule.clone(),
            MilkingFrequency::Custom => {
                debug!("CUSTOM 频次未配置自定义排班,回落一次排班");
                policy.once_schedule.clone()
            }
        }
    }

    /// 按日均产量推导挤奶频次
    ///
    /// # 规则 (Lifecycle_Specs 6.2)
    /// - 日均 > 25升 → 三次; > 15升 → 两次; 否则 → 一次（严格大于）
    pub fn recompute_frequency(&self, avg_daily_yield_l: f64, policy: &MilkPolicy) -> MilkingFrequency {
        if avg_daily_yield_l > policy.thrice_min_yield_l {
            MilkingFrequency::Thrice
        } else if avg_daily_yield_l > policy.twice_min_yield_l {
            MilkingFrequency::Twice
        } else {
            MilkingFrequency::Once
        }
    }

    // ==========================================
    // 泌乳判定
    // ==========================================

    /// 推导泌乳状态
    ///
    /// # 规则 (Lifecycle_Specs 6.3)
    /// 1. 无产犊记录 → NOT_LACTATING
    /// 2. 泌乳天数 > 305 → DRY（干奶期）
    /// 3. 否则 → LACTATING
    /// 4. 产犊日在未来 → NOT_LACTATING（防御口径）
    pub fn lactation_state(
        &self,
        last_calving_date: Option<NaiveDate>,
        today: NaiveDate,
        policy: &MilkPolicy,
    ) -> LactationState {
        let Some(calving_date) = last_calving_date else {
            return LactationState::NotLactating;
        };

        let days_in_milk = today.signed_duration_since(calving_date).num_days();
        if days_in_milk < 0 {
            return LactationState::NotLactating;
        }
        if days_in_milk > policy.dry_off_days_in_milk {
            return LactationState::Dry;
        }
        LactationState::Lactating
    }

    /// 是否允许登记产奶记录
    ///
    /// # 规则 (Lifecycle_Specs 6.4)
    /// - 仅母牛且处于 LACTATING 状态可登记
    ///
    /// # 返回
    /// - (bool, Vec<String>): 是否允许 + 决策原因
    pub fn can_record(&self, gender: Gender, lactation: LactationState) -> (bool, Vec<String>) {
        let mut reasons = Vec::new();

        if gender == Gender::Male {
            reasons.push("REJECT_MALE: gender=MALE".to_string());
            return (false, reasons);
        }

        match lactation {
            LactationState::Lactating => {
                reasons.push("ACCEPT: lactation_state=LACTATING".to_string());
                (true, reasons)
            }
            other => {
                reasons.push(format!("REJECT_NOT_LACTATING: lactation_state={}", other));
                (false, reasons)
            }
        }
    }

    // ==========================================
    // 记录校验
    // ==========================================

    /// 校验新产奶记录
    ///
    /// # 规则 (Lifecycle_Specs 6.5)
    /// 1. (ear_tag, date, shift) 已存在 → 拒绝（唯一性约束）
    /// 2. 实际挤奶时间偏离最近排班超过容差 → 拒绝（录入错误口径,非提示）
    /// 3. 仅班次无实际时间的记录跳过容差校验（按面值接受）
    ///
    /// 时差为同日线性时差,不跨零点折算
    #[instrument(skip(self, existing, schedule, policy), fields(ear_tag = %candidate.ear_tag, date = %candidate.date))]
    pub fn validate_new_record(
        &self,
        candidate: &MilkRecord,
        existing: &[MilkRecord],
        schedule: &[NaiveTime],
        policy: &MilkPolicy,
    ) -> LifecycleResult<()> {
        // 规则 1: 班次唯一性
        let duplicate = existing.iter().any(|r| {
            r.ear_tag == candidate.ear_tag && r.date == candidate.date && r.shift == candidate.shift
        });
        if duplicate {
            return Err(LifecycleError::DuplicateMilkRecord {
                ear_tag: candidate.ear_tag.clone(),
                date: candidate.date.to_string(),
                shift: candidate.shift.to_string(),
            });
        }

        // 规则 2/3: 排班容差
        if let Some(recorded) = candidate.recorded_time {
            if let Some(nearest) = Self::nearest_scheduled(recorded, schedule) {
                let diff_minutes = recorded.signed_duration_since(nearest).num_minutes().abs();
                if diff_minutes > policy.record_tolerance_hours * 60 {
                    return Err(LifecycleError::OffScheduleMilkTime {
                        recorded: recorded.to_string(),
                        nearest: nearest.to_string(),
                        tolerance_hours: policy.record_tolerance_hours,
                    });
                }
            }
        }

        Ok(())
    }

    /// 求距实际时间最近的排班时间
    fn nearest_scheduled(recorded: NaiveTime, schedule: &[NaiveTime]) -> Option<NaiveTime> {
        schedule
            .iter()
            .copied()
            .min_by_key(|t| recorded.signed_duration_since(*t).num_minutes().abs())
    }

    // ==========================================
    // 窗口统计
    // ==========================================

    /// 计算窗口日均产量
    ///
    /// # 规则 (Lifecycle_Specs 6.6)
    /// - 窗口: [today - window_days, today],含两端
    /// - 均值 = 窗口内总产量 / 有记录的天数（无记录的日子不摊薄）
    ///
    /// # 返回
    /// - None: 窗口内无任何记录
    #[instrument(skip(self, records), fields(ear_tag = %ear_tag))]
    pub fn average_daily_yield(
        &self,
        records: &[MilkRecord],
        ear_tag: &str,
        today: NaiveDate,
        window_days: i64,
    ) -> Option<f64> {
        let daily = Self::group_by_date(records, ear_tag, today, window_days);
        if daily.is_empty() {
            return None;
        }

        let total: f64 = daily.values().map(|(sum, _)| sum).sum();
        Some(total / daily.len() as f64)
    }

    /// 窗口产量按日汇总,最新日期在前（7/30/90/300天报表窗口共用）
    pub fn production_summary(
        &self,
        records: &[MilkRecord],
        ear_tag: &str,
        today: NaiveDate,
        window_days: i64,
    ) -> Vec<DailyProduction> {
        Self::group_by_date(records, ear_tag, today, window_days)
            .into_iter()
            .rev()
            .map(|(date, (total_l, record_count))| DailyProduction {
                date,
                total_l,
                record_count,
            })
            .collect()
    }

    /// 窗口内按日聚合: date → (总量, 条数)
    fn group_by_date(
        records: &[MilkRecord],
        ear_tag: &str,
        today: NaiveDate,
        window_days: i64,
    ) -> BTreeMap<NaiveDate, (f64, u32)> {
        let window_start = today - Duration::days(window_days);
        let mut daily: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();

        for record in records {
            if record.ear_tag != ear_tag || record.date < window_start || record.date > today {
                continue;
            }
            let entry = daily.entry(record.date).or_insert((0.0, 0));
            entry.0 += record.quantity_l;
            entry.1 += 1;
        }

        daily
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MilkShift;

    // ==========================================
    // 测试数据准备
    // ==========================================

    /// 基准日期: 2026-07-01
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
    }

    fn policy() -> MilkPolicy {
        MilkPolicy::default()
    }

    fn hm(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    const EAR_TAG: &str = "CN-2026-0001";

    // ==========================================
    // 第一部分：排班与频次
    // ==========================================

    #[test]
    fn test_scenario_1_schedule_mapping() {
        // 场景1: 频次默认排班映射
        let engine = MilkScheduleEngine::new();

        assert_eq!(
            engine.schedule(MilkingFrequency::Once, &[], &policy()),
            vec![hm(6, 0)]
        );
        assert_eq!(
            engine.schedule(MilkingFrequency::Twice, &[], &policy()),
            vec![hm(6, 0), hm(18, 0)]
        );
        assert_eq!(
            engine.schedule(MilkingFrequency::Thrice, &[], &policy()),
            vec![hm(6, 0), hm(14, 0), hm(22, 0)]
        );
    }

    #[test]
    fn test_scenario_2_custom_times_take_precedence() {
        // 场景2: 自定义排班优先于频次映射
        let engine = MilkScheduleEngine::new();
        let custom = vec![hm(7, 30), hm(19, 30)];

        let result = engine.schedule(MilkingFrequency::Thrice, &custom, &policy());
        assert_eq!(result, custom, "自定义排班应原样返回");

        // CUSTOM 频次无自定义时间: 防御回落一次排班
        let fallback = engine.schedule(MilkingFrequency::Custom, &[], &policy());
        assert_eq!(fallback, vec![hm(6, 0)]);
    }

    #[test]
    fn test_scenario_3_frequency_thresholds_strictly_greater() {
        // 场景3: 频次阈值为严格大于
        let engine = MilkScheduleEngine::new();

        assert_eq!(engine.recompute_frequency(28.0, &policy()), MilkingFrequency::Thrice);
        assert_eq!(
            engine.recompute_frequency(25.0, &policy()),
            MilkingFrequency::Twice,
            "25升整不触发三次(严格大于)"
        );
        assert_eq!(engine.recompute_frequency(20.0, &policy()), MilkingFrequency::Twice);
        assert_eq!(
            engine.recompute_frequency(15.0, &policy()),
            MilkingFrequency::Once,
            "15升整不触发两次(严格大于)"
        );
        assert_eq!(engine.recompute_frequency(8.0, &policy()), MilkingFrequency::Once);
    }

    // ==========================================
    // 第二部分：泌乳判定
    // ==========================================

    #[test]
    fn test_scenario_4_lactation_state_boundaries() {
        // 场景4: 泌乳天数分界(>305 干奶)
        let engine = MilkScheduleEngine::new();

        assert_eq!(
            engine.lactation_state(None, today(), &policy()),
            LactationState::NotLactating,
            "无产犊记录不泌乳"
        );
        assert_eq!(
            engine.lactation_state(Some(today() - Duration::days(100)), today(), &policy()),
            LactationState::Lactating
        );
        assert_eq!(
            engine.lactation_state(Some(today() - Duration::days(305)), today(), &policy()),
            LactationState::Lactating,
            "第305天仍在泌乳期(严格大于才干奶)"
        );
        assert_eq!(
            engine.lactation_state(Some(today() - Duration::days(306)), today(), &policy()),
            LactationState::Dry
        );
        assert_eq!(
            engine.lactation_state(Some(today() + Duration::days(5)), today(), &policy()),
            LactationState::NotLactating,
            "产犊日在未来防御归位"
        );
    }

    #[test]
    fn test_scenario_5_can_record_gate() {
        // 场景5: 登记资格门禁
        let engine = MilkScheduleEngine::new();

        let (ok, reasons) = engine.can_record(Gender::Male, LactationState::Lactating);
        assert!(!ok, "公牛不可登记产奶");
        assert!(reasons.iter().any(|r| r.contains("REJECT_MALE")));

        let (ok, reasons) = engine.can_record(Gender::Female, LactationState::Dry);
        assert!(!ok, "干奶期不可登记产奶");
        assert!(reasons.iter().any(|r| r.contains("REJECT_NOT_LACTATING")));

        let (ok, _) = engine.can_record(Gender::Female, LactationState::NotLactating);
        assert!(!ok);

        let (ok, reasons) = engine.can_record(Gender::Female, LactationState::Lactating);
        assert!(ok);
        assert!(reasons.iter().any(|r| r.contains("ACCEPT")));
    }

    // ==========================================
    // 第三部分：记录校验
    // ==========================================

    #[test]
    fn test_scenario_6_duplicate_shift_rejected() {
        // 场景6: 同 (牛, 日期, 班次) 唯一
        let engine = MilkScheduleEngine::new();
        let existing = vec![MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 12.0)];

        let duplicate = MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 11.0);
        let err = engine
            .validate_new_record(&duplicate, &existing, &policy().twice_schedule, &policy())
            .unwrap_err();
        assert!(matches!(err, LifecycleError::DuplicateMilkRecord { .. }));

        // 同日不同班次可登记
        let evening = MilkRecord::new(EAR_TAG, today(), MilkShift::Evening, 10.0);
        assert!(engine
            .validate_new_record(&evening, &existing, &policy().twice_schedule, &policy())
            .is_ok());

        // 他牛同班次可登记
        let other = MilkRecord::new("CN-2026-0002", today(), MilkShift::Morning, 9.0);
        assert!(engine
            .validate_new_record(&other, &existing, &policy().twice_schedule, &policy())
            .is_ok());
    }

    #[test]
    fn test_scenario_7_off_schedule_time_rejected() {
        // 场景7: 偏离最近排班超过2小时 → 录入错误
        let engine = MilkScheduleEngine::new();
        let schedule = policy().twice_schedule; // 06:00 / 18:00

        // 07:59 距 06:00 不足2小时: 接受
        let near = MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 12.0).with_time(hm(7, 59));
        assert!(engine.validate_new_record(&near, &[], &schedule, &policy()).is_ok());

        // 08:00 恰好2小时: 接受(严格大于才拒绝)
        let edge = MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 12.0).with_time(hm(8, 0));
        assert!(engine.validate_new_record(&edge, &[], &schedule, &policy()).is_ok());

        // 08:01 超过2小时: 拒绝
        let far = MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 12.0).with_time(hm(8, 1));
        let err = engine
            .validate_new_record(&far, &[], &schedule, &policy())
            .unwrap_err();
        match err {
            LifecycleError::OffScheduleMilkTime { nearest, .. } => {
                assert_eq!(nearest, hm(6, 0).to_string(), "最近排班应为06:00");
            }
            other => panic!("期望 OffScheduleMilkTime,实际 {:?}", other),
        }

        // 仅班次无实际时间: 跳过容差校验
        let shift_only = MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 12.0);
        assert!(engine
            .validate_new_record(&shift_only, &[], &schedule, &policy())
            .is_ok());
    }

    // ==========================================
    // 第四部分：窗口统计
    // ==========================================

    #[test]
    fn test_scenario_8_average_over_recorded_days() {
        // 场景8: 均值按有记录天数摊,空白日不摊薄
        let engine = MilkScheduleEngine::new();
        let records = vec![
            MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 10.0),
            MilkRecord::new(EAR_TAG, today(), MilkShift::Evening, 12.0),
            MilkRecord::new(EAR_TAG, today() - Duration::days(1), MilkShift::Morning, 15.0),
            // 窗口外记录
            MilkRecord::new(EAR_TAG, today() - Duration::days(31), MilkShift::Morning, 99.0),
            // 他牛记录
            MilkRecord::new("CN-2026-0002", today(), MilkShift::Morning, 50.0),
        ];

        let avg = engine.average_daily_yield(&records, EAR_TAG, today(), 30);
        assert_eq!(avg, Some(18.5), "(10+12+15) / 2个有记录的日子 = 18.5");
    }

    #[test]
    fn test_scenario_9_average_window_boundary() {
        // 场景9: 窗口边界 today-30 含,today-31 不含
        let engine = MilkScheduleEngine::new();
        let records = vec![
            MilkRecord::new(EAR_TAG, today() - Duration::days(30), MilkShift::Morning, 20.0),
            MilkRecord::new(EAR_TAG, today() - Duration::days(31), MilkShift::Morning, 99.0),
        ];

        let avg = engine.average_daily_yield(&records, EAR_TAG, today(), 30);
        assert_eq!(avg, Some(20.0));

        // 窗口内无记录 → None
        let none = engine.average_daily_yield(&records, "CN-2026-0003", today(), 30);
        assert_eq!(none, None);
    }

    #[test]
    fn test_scenario_10_production_summary_newest_first() {
        // 场景10: 按日汇总,最新日期在前
        let engine = MilkScheduleEngine::new();
        let records = vec![
            MilkRecord::new(EAR_TAG, today() - Duration::days(2), MilkShift::Morning, 8.0),
            MilkRecord::new(EAR_TAG, today(), MilkShift::Morning, 10.0),
            MilkRecord::new(EAR_TAG, today(), MilkShift::Evening, 12.0),
        ];

        let summary = engine.production_summary(&records, EAR_TAG, today(), 7);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].date, today(), "最新日期在前");
        assert_eq!(summary[0].total_l, 22.0);
        assert_eq!(summary[0].record_count, 2);
        assert_eq!(summary[1].date, today() - Duration::days(2));
        assert_eq!(summary[1].record_count, 1);
    }
}
