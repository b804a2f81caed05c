// ==========================================
// 奶牛生命周期引擎 - 预警扫描引擎
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 5. AlertEngine
// 红线: 扫描只生成不落库,按条件幂等;去重由协作方按 (ear_tag, code, due_date) 处理
// ==========================================
// 职责: 扫描单头牛的推导状态 + 周期护理记录,产出到期预警
// 输入: cattle_master + cattle_state + 护理记录
// 输出: Vec<Alert> (已按呈现顺序排序)
// ==========================================

use crate::config::herd_params::AlertWindows;
use crate::domain::alert::Alert;
use crate::domain::animal::{CattleMaster, CattleState};
use crate::domain::care::PeriodicCareRecord;
use crate::domain::types::LifeStage;
use crate::engine::life_stage::LifeStageClassifier;
use chrono::{Duration, NaiveDate};
use tracing::{debug, info, instrument};

// ==========================================
// AlertEngine - 预警扫描引擎
// ==========================================
pub struct AlertEngine {}

impl AlertEngine {
    /// 创建新的预警扫描引擎
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 扫描单头牛,产出全部到期预警
    ///
    /// # 规则 (Lifecycle_Specs 5.1, 顺序执行, 命中即收集)
    /// 1. 育成牛适配: life_stage=HEIFER 且 月龄 ∈ [15,18] → Medium
    /// 2. 孕检到期: 配种日+30天 ≥ 当日-7天 且未确认妊娠 → High
    /// 3. 临产: 预产期-14天 ≤ 当日 → Emergency
    /// 4. 建议配种: 建议配种日-14天 ≤ 当日 → Medium
    /// 5. 周期护理: is_due(today) 且未发送通知 → High(逐条)
    ///
    /// 结果按呈现顺序排序(等级升序 rank,同级按生成时间倒序)
    #[instrument(skip(self, master, state, care_records, windows), fields(ear_tag = %master.ear_tag))]
    pub fn scan(
        &self,
        master: &CattleMaster,
        state: &CattleState,
        care_records: &[PeriodicCareRecord],
        today: NaiveDate,
        windows: &AlertWindows,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        // 规则 1: 育成牛适配月龄
        if state.life_stage == LifeStage::Heifer {
            if let Some(birth_date) = master.birth_date {
                let age_months = LifeStageClassifier::age_in_months(birth_date, today);
                if age_months >= windows.heifer_breeding_min_months
                    && age_months <= windows.heifer_breeding_max_months
                {
                    debug!(age_months, "育成牛进入适配窗口");
                    alerts.push(Alert::heifer_breeding_ready(&master.ear_tag, age_months, today));
                }
            }
        }

        // 规则 2: 孕检到期(未确认妊娠才提醒)
        if !state.pregnancy_confirmed {
            if let Some(insemination_date) = state.last_insemination_date {
                let check_due =
                    insemination_date + Duration::days(windows.pregnancy_check_offset_days);
                if check_due >= today - Duration::days(windows.pregnancy_check_lead_days) {
                    debug!(%check_due, "孕检窗口命中");
                    alerts.push(Alert::pregnancy_check_due(&master.ear_tag, check_due));
                }
            }
        }

        // 规则 3: 临产窗口
        if let Some(expected_calving) = state.expected_calving_date {
            if expected_calving - Duration::days(windows.calving_lead_days) <= today {
                debug!(%expected_calving, "临产窗口命中");
                alerts.push(Alert::calving_imminent(&master.ear_tag, expected_calving));
            }
        }

        // 规则 4: 建议配种窗口
        if let Some(expected_insemination) = state.expected_insemination_date {
            if expected_insemination - Duration::days(windows.insemination_lead_days) <= today {
                debug!(%expected_insemination, "建议配种窗口命中");
                alerts.push(Alert::insemination_due(&master.ear_tag, expected_insemination));
            }
        }

        // 规则 5: 周期护理到期
        for record in care_records {
            if record.ear_tag != master.ear_tag {
                continue;
            }
            if record.is_due(today) && !record.notification_sent {
                debug!(care_name = %record.name, next_due = %record.next_due_date, "护理项到期");
                alerts.push(Alert::care_due(&master.ear_tag, &record.name, record.next_due_date));
            }
        }

        self.sort_for_presentation(&mut alerts);

        info!(count = alerts.len(), "预警扫描完成");
        alerts
    }

    /// 呈现排序: 等级 rank 升序(EMERGENCY=0 最前),同级按生成时间倒序
    pub fn sort_for_presentation(&self, alerts: &mut [Alert]) {
        alerts.sort_by(|a, b| {
            a.priority
                .rank()
                .cmp(&b.priority.rank())
                .then(b.created_at.cmp(&a.created_at))
        });
    }
}
