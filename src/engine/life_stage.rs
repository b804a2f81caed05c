// ==========================================
// 奶牛生命周期引擎 - 生命阶段判定纯函数库
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 2. LifeStageClassifier
// 职责: 月龄计算与生命阶段判定的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::types::{Gender, LifeStage};
use chrono::NaiveDate;

/// 月龄折算天数（固定30天/月,产品口径,非日历月）
pub const DAYS_PER_MONTH: i64 = 30;
/// 犊牛月龄上界（月,不含）
pub const CALF_MAX_MONTHS: i64 = 12;
/// 育成牛月龄上界（月,不含,仅母牛）
pub const HEIFER_MAX_MONTHS: i64 = 24;

// ==========================================
// LifeStageClassifier - 纯函数工具类
// ==========================================
pub struct LifeStageClassifier;

impl LifeStageClassifier {
    /// 计算月龄
    ///
    /// # 规则 (Lifecycle_Specs 2.1)
    /// - age_in_months = max(0, today - birth_date).num_days() / 30（向下取整）
    /// - 出生日期在未来视为0月龄（防御口径,不报错）
    ///
    /// # 参数
    /// - birth_date: 出生日期
    /// - today: 当前日期
    pub fn age_in_months(birth_date: NaiveDate, today: NaiveDate) -> i64 {
        let days = today.signed_duration_since(birth_date).num_days().max(0);
        days / DAYS_PER_MONTH
    }

    /// 判定生命阶段
    ///
    /// # 规则 (Lifecycle_Specs 2.2)
    /// 1. birth_date 缺失 → 保持当前阶段（无法判定月龄）
    /// 2. 公牛: <12月 → CALF; 否则 → BULL
    /// 3. 母牛: <12月 → CALF
    /// 4. 母牛: 12~24月(不含24) → HEIFER
    /// 5. 母牛: ≥24月 且有产犊记录 → COW
    /// 6. 母牛: ≥24月 且无产犊记录 → 保持 HEIFER
    ///
    /// # 参数
    /// - gender: 性别
    /// - birth_date: 出生日期(可能缺失)
    /// - has_calved: 是否有产犊记录
    /// - current_stage: 当前阶段(birth_date 缺失时原样保留)
    /// - today: 当前日期
    ///
    /// # 返回
    /// - (LifeStage, Vec<String>): 阶段 + 决策原因
    pub fn classify(
        gender: Gender,
        birth_date: Option<NaiveDate>,
        has_calved: bool,
        current_stage: LifeStage,
        today: NaiveDate,
    ) -> (LifeStage, Vec<String>) {
        let mut reasons = Vec::new();

        // 规则 1: 出生日期缺失,保持现状
        let Some(birth) = birth_date else {
            reasons.push("KEEP_CURRENT: birth_date missing".to_string());
            return (current_stage, reasons);
        };

        let age_months = Self::age_in_months(birth, today);

        // 规则 2: 公牛分支
        if gender == Gender::Male {
            if age_months < CALF_MAX_MONTHS {
                reasons.push(format!("CALF: age_months={} < {}", age_months, CALF_MAX_MONTHS));
                return (LifeStage::Calf, reasons);
            }
            reasons.push(format!("BULL: age_months={} >= {}", age_months, CALF_MAX_MONTHS));
            return (LifeStage::Bull, reasons);
        }

        // 规则 3: 母牛犊牛期
        if age_months < CALF_MAX_MONTHS {
            reasons.push(format!("CALF: age_months={} < {}", age_months, CALF_MAX_MONTHS));
            return (LifeStage::Calf, reasons);
        }

        // 规则 4: 育成期
        if age_months < HEIFER_MAX_MONTHS {
            reasons.push(format!(
                "HEIFER: {} <= age_months={} < {}",
                CALF_MAX_MONTHS, age_months, HEIFER_MAX_MONTHS
            ));
            return (LifeStage::Heifer, reasons);
        }

        // 规则 5: 成母牛(有产犊记录)
        if has_calved {
            reasons.push(format!(
                "COW: age_months={} >= {} and has_calved",
                age_months, HEIFER_MAX_MONTHS
            ));
            return (LifeStage::Cow, reasons);
        }

        // 规则 6: 超龄未产犊,保持育成牛
        reasons.push(format!(
            "HEIFER: age_months={} >= {} but never calved",
            age_months, HEIFER_MAX_MONTHS
        ));
        (LifeStage::Heifer, reasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn born_days_ago(days: i64) -> NaiveDate {
        today() - Duration::days(days)
    }

    // ==========================================
    // 测试 1: 月龄计算
    // ==========================================

    #[test]
    fn test_age_in_months_floor_division() {
        assert_eq!(LifeStageClassifier::age_in_months(born_days_ago(0), today()), 0);
        assert_eq!(LifeStageClassifier::age_in_months(born_days_ago(29), today()), 0); // 不足一月
        assert_eq!(LifeStageClassifier::age_in_months(born_days_ago(30), today()), 1);
        assert_eq!(LifeStageClassifier::age_in_months(born_days_ago(359), today()), 11);
        assert_eq!(LifeStageClassifier::age_in_months(born_days_ago(360), today()), 12);
    }

    #[test]
    fn test_age_in_months_future_birth_date() {
        // 防御口径: 出生日期在未来 → 0月龄
        let result = LifeStageClassifier::age_in_months(today() + Duration::days(10), today());
        assert_eq!(result, 0);
    }

    // ==========================================
    // 测试 2: 母牛阶段边界
    // ==========================================

    #[test]
    fn test_classify_female_calf_boundary() {
        // 359天 = 11月 → 犊牛
        let (stage, _) = LifeStageClassifier::classify(
            Gender::Female,
            Some(born_days_ago(359)),
            false,
            LifeStage::Calf,
            today(),
        );
        assert_eq!(stage, LifeStage::Calf);

        // 360天 = 12月 → 育成牛
        let (stage, reasons) = LifeStageClassifier::classify(
            Gender::Female,
            Some(born_days_ago(360)),
            false,
            LifeStage::Calf,
            today(),
        );
        assert_eq!(stage, LifeStage::Heifer, "满12月应进入育成期");
        assert!(reasons.iter().any(|r| r.contains("HEIFER")));
    }

    #[test]
    fn test_classify_female_cow_requires_calving() {
        // 720天 = 24月,无产犊记录 → 仍为育成牛
        let (stage, reasons) = LifeStageClassifier::classify(
            Gender::Female,
            Some(born_days_ago(720)),
            false,
            LifeStage::Heifer,
            today(),
        );
        assert_eq!(stage, LifeStage::Heifer, "未产犊不得判定为成母牛");
        assert!(reasons.iter().any(|r| r.contains("never calved")));

        // 720天 = 24月,有产犊记录 → 成母牛
        let (stage, _) = LifeStageClassifier::classify(
            Gender::Female,
            Some(born_days_ago(720)),
            true,
            LifeStage::Heifer,
            today(),
        );
        assert_eq!(stage, LifeStage::Cow);
    }

    #[test]
    fn test_classify_female_heifer_upper_boundary() {
        // 719天 = 23月 → 育成牛(即使有产犊记录也未满24月)
        let (stage, _) = LifeStageClassifier::classify(
            Gender::Female,
            Some(born_days_ago(719)),
            true,
            LifeStage::Heifer,
            today(),
        );
        assert_eq!(stage, LifeStage::Heifer);
    }

    // ==========================================
    // 测试 3: 公牛阶段边界
    // ==========================================

    #[test]
    fn test_classify_male_boundary() {
        let (stage, _) = LifeStageClassifier::classify(
            Gender::Male,
            Some(born_days_ago(359)),
            false,
            LifeStage::Calf,
            today(),
        );
        assert_eq!(stage, LifeStage::Calf);

        let (stage, _) = LifeStageClassifier::classify(
            Gender::Male,
            Some(born_days_ago(360)),
            false,
            LifeStage::Calf,
            today(),
        );
        assert_eq!(stage, LifeStage::Bull, "公牛满12月即为种公牛");
    }

    // ==========================================
    // 测试 4: 缺失出生日期
    // ==========================================

    #[test]
    fn test_classify_missing_birth_date_keeps_current() {
        let (stage, reasons) = LifeStageClassifier::classify(
            Gender::Female,
            None,
            false,
            LifeStage::Cow,
            today(),
        );
        assert_eq!(stage, LifeStage::Cow, "缺失出生日期应保持当前阶段");
        assert!(reasons.contains(&"KEEP_CURRENT: birth_date missing".to_string()));
    }

    // ==========================================
    // 测试 5: 阶段单调性(月龄增长不回退)
    // ==========================================

    #[test]
    fn test_classify_monotonic_over_age() {
        fn rank(stage: LifeStage) -> u8 {
            match stage {
                LifeStage::Calf => 0,
                LifeStage::Heifer => 1,
                LifeStage::Cow => 2,
                LifeStage::Bull => 2,
            }
        }

        for gender in [Gender::Female, Gender::Male] {
            for has_calved in [false, true] {
                let mut prev_rank = 0u8;
                for months in 0..40i64 {
                    let (stage, _) = LifeStageClassifier::classify(
                        gender,
                        Some(today() - Duration::days(months * DAYS_PER_MONTH)),
                        has_calved,
                        LifeStage::Calf,
                        today(),
                    );
                    let r = rank(stage);
                    assert!(
                        r >= prev_rank,
                        "阶段不得随月龄回退: gender={:?} has_calved={} months={} stage={:?}",
                        gender,
                        has_calved,
                        months,
                        stage
                    );
                    prev_rank = r;
                }
            }
        }
    }
}
