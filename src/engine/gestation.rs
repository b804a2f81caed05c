// ==========================================
// 奶牛生命周期引擎 - 妊娠状态机纯函数库
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 3. GestationEngine
// 职责: 妊娠天数推导、阶段分界、孕检/产犊状态迁移
// 红线: 无 I/O,当前日期一律由调用方注入
// ==========================================

use crate::config::herd_params::GestationThresholds;
use crate::domain::animal::CattleState;
use crate::domain::types::{GestationStage, GestationStatus};
use chrono::{Duration, NaiveDate};

// ==========================================
// GestationSnapshot - 妊娠推导快照
// ==========================================
#[derive(Debug, Clone)]
pub struct GestationSnapshot {
    pub gestation_status: GestationStatus,
    pub gestation_stage: GestationStage,
    /// 妊娠天数（无配种记录或配种日在未来时为 None）
    pub days_pregnant: Option<i64>,
    /// 预产期（= 配种日 + 孕期长度,非妊娠为 None）
    pub expected_calving_date: Option<NaiveDate>,
    /// 孕程进度（百分比,一位小数,封顶100）
    pub progress_pct: Option<f64>,
    /// 孕程报告期（1/2/3,非妊娠为 None）
    pub trimester: Option<u8>,
    /// 决策原因
    pub reasons: Vec<String>,
}

impl GestationSnapshot {
    fn not_pregnant(reason: String) -> Self {
        Self {
            gestation_status: GestationStatus::NotPregnant,
            gestation_stage: GestationStage::NotPregnant,
            days_pregnant: None,
            expected_calving_date: None,
            progress_pct: None,
            trimester: None,
            reasons: vec![reason],
        }
    }
}

// ==========================================
// GestationEngine - 纯函数工具类
// ==========================================
pub struct GestationEngine;

impl GestationEngine {
    /// 计算妊娠天数
    ///
    /// # 规则
    /// - days_pregnant = today - last_insemination_date（可能为负,由调用方防御）
    pub fn days_pregnant(last_insemination_date: NaiveDate, today: NaiveDate) -> i64 {
        today.signed_duration_since(last_insemination_date).num_days()
    }

    /// 按妊娠天数判定阶段
    ///
    /// # 规则 (Lifecycle_Specs 3.2)
    /// - 0 ≤ d ≤ 95   → PREGNANT / FIRST_TRIMESTER
    /// - 96 ≤ d ≤ 190 → PREGNANT / SECOND_TRIMESTER
    /// - 191 ≤ d ≤ 269 → PREGNANT / THIRD_TRIMESTER
    /// - d ≥ 270      → CALVING / CALVING
    pub fn stage_for_days(
        days_pregnant: i64,
        thresholds: &GestationThresholds,
    ) -> (GestationStatus, GestationStage) {
        if days_pregnant >= thresholds.calving_from_days {
            (GestationStatus::Calving, GestationStage::Calving)
        } else if days_pregnant > thresholds.second_trimester_max_days {
            (GestationStatus::Pregnant, GestationStage::ThirdTrimester)
        } else if days_pregnant > thresholds.first_trimester_max_days {
            (GestationStatus::Pregnant, GestationStage::SecondTrimester)
        } else {
            (GestationStatus::Pregnant, GestationStage::FirstTrimester)
        }
    }

    /// 计算孕程进度
    ///
    /// # 规则
    /// - progress = min(100, round(d / 孕期长度 × 100, 1))
    pub fn progress_pct(days_pregnant: i64, gestation_length_days: i64) -> f64 {
        let pct = days_pregnant as f64 / gestation_length_days as f64 * 100.0;
        ((pct * 10.0).round() / 10.0).min(100.0)
    }

    /// 计算孕程报告期
    ///
    /// # 规则 (Lifecycle_Specs 3.3)
    /// - 分界独立于阶段分界维护（口径相同但调用方不同,不得合并）
    /// - d ≤ 95 → 1; d ≤ 190 → 2; 否则 → 3
    pub fn trimester(days_pregnant: i64, thresholds: &GestationThresholds) -> Option<u8> {
        if days_pregnant < 0 {
            return None;
        }
        if days_pregnant <= thresholds.trimester_first_max_days {
            Some(1)
        } else if days_pregnant <= thresholds.trimester_second_max_days {
            Some(2)
        } else {
            Some(3)
        }
    }

    /// 推导妊娠快照
    ///
    /// # 规则 (Lifecycle_Specs 3.1)
    /// 1. 无配种记录 → NOT_PREGNANT / NOT_PREGNANT
    /// 2. 配种日在未来（d < 0） → NOT_PREGNANT（防御口径,不报错）
    /// 3. 其余按天数分界,预产期 = 配种日 + 孕期长度
    ///
    /// # 参数
    /// - last_insemination_date: 最近配种日期(可能缺失)
    /// - today: 当前日期
    /// - thresholds: 妊娠阈值组
    pub fn derive(
        last_insemination_date: Option<NaiveDate>,
        today: NaiveDate,
        thresholds: &GestationThresholds,
    ) -> GestationSnapshot {
        // 规则 1: 无配种记录
        let Some(insemination_date) = last_insemination_date else {
            return GestationSnapshot::not_pregnant(
                "NOT_PREGNANT: no insemination on record".to_string(),
            );
        };

        let days = Self::days_pregnant(insemination_date, today);

        // 规则 2: 配种日在未来
        if days < 0 {
            return GestationSnapshot::not_pregnant(format!(
                "NOT_PREGNANT: insemination_date in future (days_pregnant={})",
                days
            ));
        }

        // 规则 3: 按天数分界
        let (status, stage) = Self::stage_for_days(days, thresholds);
        let reason = format!("{}: days_pregnant={}", stage, days);

        GestationSnapshot {
            gestation_status: status,
            gestation_stage: stage,
            days_pregnant: Some(days),
            expected_calving_date: Some(
                insemination_date + Duration::days(thresholds.gestation_length_days),
            ),
            progress_pct: Some(Self::progress_pct(days, thresholds.gestation_length_days)),
            trimester: Self::trimester(days, thresholds),
            reasons: vec![reason],
        }
    }

    /// 将推导快照落回状态对象
    ///
    /// # 规则
    /// - 有配种记录 → 快照全量覆盖 status/stage/预产期
    /// - 无配种记录 → 阶段归位 NOT_PREGNANT;IN_OESTRUS/DRY_OFF 为协作方设置,原样保留
    ///
    /// # 返回
    /// - (bool, Vec<String>): 是否发生变更 + 决策原因
    pub fn refresh_state(
        state: &mut CattleState,
        today: NaiveDate,
        thresholds: &GestationThresholds,
    ) -> (bool, Vec<String>) {
        if state.last_insemination_date.is_none() {
            let mut reasons = Vec::new();
            let mut changed = false;

            // 协作方手工设置的状态不参与推导
            let keep_status = matches!(
                state.gestation_status,
                GestationStatus::InOestrus | GestationStatus::DryOff
            );
            if keep_status {
                reasons.push(format!(
                    "KEEP_STATUS: {} set by collaborator",
                    state.gestation_status.to_db_str()
                ));
            } else if state.gestation_status != GestationStatus::NotPregnant {
                state.gestation_status = GestationStatus::NotPregnant;
                changed = true;
            }

            if state.gestation_stage != GestationStage::NotPregnant {
                state.gestation_stage = GestationStage::NotPregnant;
                changed = true;
            }
            if state.expected_calving_date.is_some() {
                state.expected_calving_date = None;
                changed = true;
            }

            reasons.push("NOT_PREGNANT: no insemination on record".to_string());
            return (changed, reasons);
        }

        let snapshot = Self::derive(state.last_insemination_date, today, thresholds);
        let changed = state.gestation_status != snapshot.gestation_status
            || state.gestation_stage != snapshot.gestation_stage
            || state.expected_calving_date != snapshot.expected_calving_date;

        state.gestation_status = snapshot.gestation_status;
        state.gestation_stage = snapshot.gestation_stage;
        state.expected_calving_date = snapshot.expected_calving_date;

        (changed, snapshot.reasons)
    }

    /// 孕检确认迁移
    ///
    /// # 规则 (Lifecycle_Specs 3.4)
    /// - 强制置 PREGNANT / FIRST_TRIMESTER,置确认标记
    /// - 预产期 = 配种日 + 孕期长度（配种日缺失时不动预产期,由调用方保证前置校验）
    pub fn mark_confirmed(state: &mut CattleState, thresholds: &GestationThresholds) {
        state.gestation_status = GestationStatus::Pregnant;
        state.gestation_stage = GestationStage::FirstTrimester;
        state.pregnancy_confirmed = true;

        if let Some(insemination_date) = state.last_insemination_date {
            state.expected_calving_date =
                Some(insemination_date + Duration::days(thresholds.gestation_length_days));
        }
    }

    /// 孕检阴性迁移
    ///
    /// # 规则 (Lifecycle_Specs 3.5)
    /// - 归位 NOT_PREGNANT,清除配种日与预产期
    /// - 建议配种日 = 当日 + 发情周期
    pub fn mark_open(state: &mut CattleState, today: NaiveDate, thresholds: &GestationThresholds) {
        state.gestation_status = GestationStatus::NotPregnant;
        state.gestation_stage = GestationStage::NotPregnant;
        state.pregnancy_confirmed = false;
        state.last_insemination_date = None;
        state.expected_calving_date = None;
        state.expected_insemination_date = Some(today + Duration::days(thresholds.oestrus_cycle_days));
    }

    /// 产犊迁移
    ///
    /// # 规则 (Lifecycle_Specs 3.6)
    /// - 无条件归位 NOT_PREGNANT,清除配种日与预产期
    /// - 产犊计数 +1,泌乳胎次 +1
    /// - 建议配种日 = 产犊日 + 产后休养期
    /// - 平均产犊间隔增量更新: new_avg = (old_avg × (n-2) + gap) / (n-1),n 为更新后产犊次数
    pub fn mark_calved(
        state: &mut CattleState,
        calving_date: NaiveDate,
        thresholds: &GestationThresholds,
    ) {
        let previous_calving = state.last_calving_date;

        state.gestation_status = GestationStatus::NotPregnant;
        state.gestation_stage = GestationStage::NotPregnant;
        state.pregnancy_confirmed = false;
        state.last_insemination_date = None;
        state.expected_calving_date = None;

        state.calving_count += 1;
        state.lactation_number += 1;
        state.last_calving_date = Some(calving_date);
        state.expected_insemination_date =
            Some(calving_date + Duration::days(thresholds.post_calving_rest_days));

        // 首次产犊没有间隔样本
        if let Some(previous) = previous_calving {
            let gap = calving_date.signed_duration_since(previous).num_days() as f64;
            let n = state.calving_count as f64;
            let old_avg = state.avg_calving_interval_days.unwrap_or(0.0);
            state.avg_calving_interval_days = Some((old_avg * (n - 2.0) + gap) / (n - 1.0));
        }
    }
}
