// ==========================================
// 奶牛生命周期引擎 - 生命周期协调器
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 7. 事件处理主流程
// 用途: 以事件为单位编排各子引擎,保证推导顺序固定
// 红线: 校验全部通过前不得改写状态(全有或全无);同一头牛的
//       事件处理由调用方串行化,协调器内部不做跨事件互斥
// ==========================================

use crate::config::HerdConfigReader;
use crate::domain::alert::Alert;
use crate::domain::animal::{CattleMaster, CattleState};
use crate::domain::breeding::{BirthRecord, Insemination};
use crate::domain::care::PeriodicCareRecord;
use crate::domain::milestone::{Milestone, MilestonePlan};
use crate::domain::milk::MilkRecord;
use crate::domain::types::{
    BirthOutcomeKind, Gender, GestationStatus, InseminationMethod, LactationState, LifeStage,
    MilkingFrequency, PregnancyCheckStatus,
};
use crate::engine::alerts::AlertEngine;
use crate::engine::error::{LifecycleError, LifecycleResult};
use crate::engine::gestation::GestationEngine;
use crate::engine::life_stage::LifeStageClassifier;
use crate::engine::milestone_plan::MilestoneGenerator;
use crate::engine::milk_schedule::MilkScheduleEngine;
use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 引擎写入状态时使用的操作者标识
const ENGINE_OPERATOR: &str = "lifecycle_engine";

// ==========================================
// 事件处理结果
// ==========================================

/// 配种登记结果
#[derive(Debug, Clone)]
pub struct InseminationOutcome {
    /// 新建的配种记录（待协作方落库）
    pub insemination: Insemination,
    /// 妊娠推导原因
    pub derivation_reasons: Vec<String>,
    /// 本次扫描产出的预警
    pub alerts: Vec<Alert>,
}

/// 孕检登记结果
#[derive(Debug, Clone)]
pub struct PregnancyCheckOutcome {
    /// 更新后的配种记录（孕检结果与日期已写入）
    pub insemination: Insemination,
    /// 里程碑计划（确认时非空,阴性为空计划）
    pub milestone_plan: MilestonePlan,
    pub alerts: Vec<Alert>,
}

/// 产犊登记结果
#[derive(Debug, Clone)]
pub struct BirthOutcome {
    /// 新建犊牛档案（仅顺产结局,母牛耳标与品种已带入）
    pub calves: Vec<(CattleMaster, CattleState)>,
    /// 失效的未完成里程碑ID
    pub removed_milestone_ids: Vec<Uuid>,
    pub alerts: Vec<Alert>,
}

/// 产奶登记结果
#[derive(Debug, Clone)]
pub struct MilkYieldOutcome {
    /// 窗口日均产量（窗口内无记录时为 None）
    pub avg_daily_yield_l: Option<f64>,
    /// 重算后的挤奶频次
    pub milking_frequency: MilkingFrequency,
    /// 当前泌乳状态
    pub lactation_state: LactationState,
}

/// 每日重推导结果
#[derive(Debug, Clone)]
pub struct DailyRefreshOutcome {
    /// 生命阶段或妊娠推导是否发生变更
    pub changed: bool,
    pub life_stage: LifeStage,
    pub derivation_reasons: Vec<String>,
    pub alerts: Vec<Alert>,
}

/// 周期护理扫描结果
#[derive(Debug, Clone)]
pub struct CareScanOutcome {
    /// 通知标记已翻转的护理记录（待协作方回写）
    pub updated_records: Vec<PeriodicCareRecord>,
    pub alerts: Vec<Alert>,
}

/// 档案移除级联结果
#[derive(Debug, Clone)]
pub struct RemovalOutcome {
    /// 需失效的未完成里程碑ID
    pub invalidated_milestone_ids: Vec<Uuid>,
    /// 需撤销的未读预警ID
    pub dismissed_alert_ids: Vec<Uuid>,
}

// ==========================================
// LifecycleCoordinator - 生命周期协调器
// ==========================================

pub struct LifecycleCoordinator<C>
where
    C: HerdConfigReader,
{
    config: Arc<C>,
    milestones: MilestoneGenerator,
    alerts: AlertEngine,
    milk: MilkScheduleEngine,
}

impl<C> LifecycleCoordinator<C>
where
    C: HerdConfigReader,
{
    /// 创建新的协调器实例
    ///
    /// # 参数
    /// - config: 业务参数读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            milestones: MilestoneGenerator::new(),
            alerts: AlertEngine::new(),
            milk: MilkScheduleEngine::new(),
            config,
        }
    }

    /// 处理配种登记事件
    ///
    /// # 流程
    /// 1. 繁殖资格与日期校验(失败即返回,状态不动)
    /// 2. 写入配种日,清除确认标记与建议配种日
    /// 3. 妊娠推导落回状态
    /// 4. 预警扫描
    ///
    /// # 返回
    /// 新建配种记录 + 推导原因 + 预警
    pub async fn on_insemination_recorded(
        &self,
        master: &CattleMaster,
        state: &mut CattleState,
        date: NaiveDate,
        method: InseminationMethod,
        care_records: &[PeriodicCareRecord],
        today: NaiveDate,
    ) -> LifecycleResult<InseminationOutcome> {
        info!(ear_tag = %master.ear_tag, %date, ?method, "开始处理配种登记");

        // ==========================================
        // 步骤1: 前置校验
        // ==========================================
        debug!("步骤1: 繁殖资格校验");

        if master.gender != Gender::Female {
            return Err(LifecycleError::NotFemale {
                ear_tag: master.ear_tag.clone(),
                gender: master.gender.to_string(),
            });
        }
        if state.life_stage == LifeStage::Calf {
            return Err(LifecycleError::LifeStageIneligible {
                ear_tag: master.ear_tag.clone(),
                life_stage: state.life_stage.to_string(),
                operation: "配种登记".to_string(),
            });
        }
        if state.pregnancy_confirmed {
            return Err(LifecycleError::AlreadyPregnant {
                ear_tag: master.ear_tag.clone(),
            });
        }
        if date > today {
            return Err(LifecycleError::FutureDate {
                field: "insemination_date".to_string(),
                date: date.to_string(),
                today: today.to_string(),
            });
        }

        let thresholds = self
            .config
            .get_gestation_thresholds()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;

        // ==========================================
        // 步骤2: 写入配种日期
        // ==========================================
        debug!("步骤2: 写入配种日期");

        let insemination =
            Insemination::new(&master.ear_tag, date, method, thresholds.gestation_length_days);

        state.last_insemination_date = Some(date);
        state.pregnancy_confirmed = false;
        // 建议配种日已被本次配种消费
        state.expected_insemination_date = None;

        // ==========================================
        // 步骤3: 妊娠推导
        // ==========================================
        debug!("步骤3: 妊娠推导");

        let (_, derivation_reasons) = GestationEngine::refresh_state(state, today, &thresholds);
        state.touch(ENGINE_OPERATOR);

        // ==========================================
        // 步骤4: 预警扫描
        // ==========================================
        debug!("步骤4: 预警扫描");

        let windows = self
            .config
            .get_alert_windows()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;
        let alerts = self.alerts.scan(master, state, care_records, today, &windows);

        info!(
            ear_tag = %master.ear_tag,
            gestation_status = %state.gestation_status,
            expected_calving = ?state.expected_calving_date,
            alerts_count = alerts.len(),
            "配种登记处理完成"
        );

        Ok(InseminationOutcome {
            insemination,
            derivation_reasons,
            alerts,
        })
    }

    /// 处理孕检登记事件
    ///
    /// # 流程
    /// 1. 结果与日期口径校验(终态不可重登,孕检日不得早于配种日)
    /// 2. 确认 → 强制 PREGNANT/FIRST_TRIMESTER + 重建里程碑
    ///    阴性 → 归位空怀 + 建议配种日 = 当日 + 发情周期
    /// 3. 预警扫描
    pub async fn on_pregnancy_check(
        &self,
        master: &CattleMaster,
        state: &mut CattleState,
        insemination: &Insemination,
        result: PregnancyCheckStatus,
        check_date: NaiveDate,
        existing_milestones: &[Milestone],
        care_records: &[PeriodicCareRecord],
        today: NaiveDate,
    ) -> LifecycleResult<PregnancyCheckOutcome> {
        info!(ear_tag = %master.ear_tag, ?result, %check_date, "开始处理孕检登记");

        // ==========================================
        // 步骤1: 前置校验
        // ==========================================
        debug!("步骤1: 孕检口径校验");

        if result == PregnancyCheckStatus::Pending {
            return Err(LifecycleError::FieldValueError {
                field: "check_status".to_string(),
                message: "孕检结果不得登记为 PENDING".to_string(),
            });
        }
        if insemination.check_status.is_terminal() {
            return Err(LifecycleError::CheckAlreadySettled {
                ear_tag: master.ear_tag.clone(),
                check_status: insemination.check_status.to_string(),
            });
        }
        if check_date < insemination.date {
            return Err(LifecycleError::CheckBeforeInsemination {
                check_date: check_date.to_string(),
                insemination_date: insemination.date.to_string(),
            });
        }
        if check_date > today {
            return Err(LifecycleError::FutureDate {
                field: "check_date".to_string(),
                date: check_date.to_string(),
                today: today.to_string(),
            });
        }

        let thresholds = self
            .config
            .get_gestation_thresholds()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;

        let mut updated = insemination.clone();
        updated.apply_check(result, check_date);

        // ==========================================
        // 步骤2: 状态迁移
        // ==========================================
        let milestone_plan = match result {
            PregnancyCheckStatus::Confirmed => {
                debug!("步骤2: 确认妊娠迁移");

                // 确认即以该配种记录为当前妊娠基准
                state.last_insemination_date = Some(insemination.date);
                GestationEngine::mark_confirmed(state, &thresholds);

                let offsets = self
                    .config
                    .get_milestone_offsets()
                    .await
                    .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;

                self.milestones.plan_for_confirmation(
                    &master.ear_tag,
                    insemination.date,
                    today,
                    &offsets,
                    existing_milestones,
                )
            }
            PregnancyCheckStatus::Negative => {
                debug!("步骤2: 阴性孕检迁移");
                GestationEngine::mark_open(state, today, &thresholds);
                MilestonePlan::empty()
            }
            PregnancyCheckStatus::Pending => unreachable!(), // 已在步骤1拦截
        };
        state.touch(ENGINE_OPERATOR);

        // ==========================================
        // 步骤3: 预警扫描
        // ==========================================
        debug!("步骤3: 预警扫描");

        let windows = self
            .config
            .get_alert_windows()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;
        let alerts = self.alerts.scan(master, state, care_records, today, &windows);

        info!(
            ear_tag = %master.ear_tag,
            ?result,
            milestones_created = milestone_plan.created.len(),
            milestones_removed = milestone_plan.remove_ids.len(),
            alerts_count = alerts.len(),
            "孕检登记处理完成"
        );

        Ok(PregnancyCheckOutcome {
            insemination: updated,
            milestone_plan,
            alerts,
        })
    }

    /// 处理产犊登记事件
    ///
    /// # 流程
    /// 1. 产犊资格校验(母牛 + 妊娠/临产状态 + 明细一致性)
    /// 2. 顺产结局逐头建立犊牛档案(品种继承,母牛耳标回填)
    /// 3. 母牛状态归位 + 产犊统计更新
    /// 4. 未完成里程碑失效 + 事件通报 + 预警扫描
    pub async fn on_birth_recorded(
        &self,
        master: &CattleMaster,
        state: &mut CattleState,
        birth: &BirthRecord,
        existing_milestones: &[Milestone],
        care_records: &[PeriodicCareRecord],
        today: NaiveDate,
    ) -> LifecycleResult<BirthOutcome> {
        info!(
            ear_tag = %master.ear_tag,
            calving_date = %birth.calving_date,
            outcome = %birth.outcome,
            calf_count = birth.calf_count,
            "开始处理产犊登记"
        );

        // ==========================================
        // 步骤1: 前置校验
        // ==========================================
        debug!("步骤1: 产犊资格校验");

        if master.gender != Gender::Female {
            return Err(LifecycleError::NotFemale {
                ear_tag: master.ear_tag.clone(),
                gender: master.gender.to_string(),
            });
        }
        if !matches!(
            state.gestation_status,
            GestationStatus::Pregnant | GestationStatus::Calving
        ) {
            return Err(LifecycleError::NotPregnant {
                ear_tag: master.ear_tag.clone(),
                status: state.gestation_status.to_string(),
            });
        }
        if birth.dam_ear_tag != master.ear_tag {
            return Err(LifecycleError::FieldValueError {
                field: "dam_ear_tag".to_string(),
                message: format!(
                    "产犊记录母牛耳标不匹配: {} != {}",
                    birth.dam_ear_tag, master.ear_tag
                ),
            });
        }
        if birth.calving_date > today {
            return Err(LifecycleError::FutureDate {
                field: "calving_date".to_string(),
                date: birth.calving_date.to_string(),
                today: today.to_string(),
            });
        }
        if birth.calf_count as usize != birth.calves.len() {
            return Err(LifecycleError::CalfListMismatch {
                calf_count: birth.calf_count,
                details_len: birth.calves.len(),
            });
        }

        let thresholds = self
            .config
            .get_gestation_thresholds()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;

        // ==========================================
        // 步骤2: 建立犊牛档案(仅顺产)
        // ==========================================
        debug!("步骤2: 建立犊牛档案");

        let calves = if birth.outcome == BirthOutcomeKind::Successful {
            birth
                .calves
                .iter()
                .map(|detail| {
                    let mut calf = CattleMaster::new(
                        &detail.ear_tag,
                        detail.gender,
                        Some(birth.calving_date),
                    );
                    calf.breed = master.breed.clone();
                    calf.dam_ear_tag = Some(master.ear_tag.clone());

                    let calf_state = CattleState::initial(&detail.ear_tag, LifeStage::Calf);
                    (calf, calf_state)
                })
                .collect()
        } else {
            Vec::new()
        };

        // ==========================================
        // 步骤3: 母牛状态归位
        // ==========================================
        debug!("步骤3: 母牛状态归位");

        GestationEngine::mark_calved(state, birth.calving_date, &thresholds);
        state.touch(ENGINE_OPERATOR);

        // ==========================================
        // 步骤4: 里程碑失效 + 通报 + 预警扫描
        // ==========================================
        debug!("步骤4: 里程碑失效与预警扫描");

        let removed_milestone_ids = self
            .milestones
            .incomplete_ids(&master.ear_tag, existing_milestones);

        let mut alerts = Vec::new();
        if birth.outcome == BirthOutcomeKind::Successful {
            alerts.push(Alert::birth_success(
                &master.ear_tag,
                birth.calving_date,
                birth.calf_count,
            ));
        }
        if birth.outcome.is_distress() {
            let detail = birth
                .complications
                .clone()
                .unwrap_or_else(|| birth.outcome.to_string());
            alerts.push(Alert::birth_complication(
                &master.ear_tag,
                birth.calving_date,
                &detail,
            ));
        }
        alerts.push(Alert::post_calving_checkup(
            &master.ear_tag,
            birth.calving_date + Duration::days(7),
        ));

        let windows = self
            .config
            .get_alert_windows()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;
        alerts.extend(self.alerts.scan(master, state, care_records, today, &windows));
        self.alerts.sort_for_presentation(&mut alerts);

        info!(
            ear_tag = %master.ear_tag,
            calves_created = calves.len(),
            milestones_removed = removed_milestone_ids.len(),
            calving_count = state.calving_count,
            alerts_count = alerts.len(),
            "产犊登记处理完成"
        );

        Ok(BirthOutcome {
            calves,
            removed_milestone_ids,
            alerts,
        })
    }

    /// 处理产奶登记事件
    ///
    /// # 流程
    /// 1. 登记资格校验(母牛 + 泌乳期)
    /// 2. 记录校验(班次唯一 + 排班容差)
    /// 3. 重算窗口日均与挤奶频次(自定义排班不参与自动调整)
    pub async fn on_milk_yield_recorded(
        &self,
        master: &CattleMaster,
        state: &mut CattleState,
        record: &MilkRecord,
        existing_records: &[MilkRecord],
        today: NaiveDate,
    ) -> LifecycleResult<MilkYieldOutcome> {
        info!(
            ear_tag = %master.ear_tag,
            date = %record.date,
            shift = %record.shift,
            quantity_l = record.quantity_l,
            "开始处理产奶登记"
        );

        let policy = self
            .config
            .get_milk_policy()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;

        // ==========================================
        // 步骤1: 登记资格校验
        // ==========================================
        debug!("步骤1: 登记资格校验");

        let lactation = self
            .milk
            .lactation_state(state.last_calving_date, today, &policy);
        let (allowed, reasons) = self.milk.can_record(master.gender, lactation);
        if !allowed {
            if master.gender == Gender::Male {
                return Err(LifecycleError::NotFemale {
                    ear_tag: master.ear_tag.clone(),
                    gender: master.gender.to_string(),
                });
            }
            return Err(LifecycleError::NotLactating {
                ear_tag: master.ear_tag.clone(),
                reason: reasons.join("; "),
            });
        }

        if record.ear_tag != master.ear_tag {
            return Err(LifecycleError::FieldValueError {
                field: "ear_tag".to_string(),
                message: format!("产奶记录耳标不匹配: {} != {}", record.ear_tag, master.ear_tag),
            });
        }
        if record.date > today {
            return Err(LifecycleError::FutureDate {
                field: "milk_date".to_string(),
                date: record.date.to_string(),
                today: today.to_string(),
            });
        }
        if record.quantity_l <= 0.0 {
            return Err(LifecycleError::FieldValueError {
                field: "quantity_l".to_string(),
                message: format!("产奶量异常: {} <= 0", record.quantity_l),
            });
        }

        // ==========================================
        // 步骤2: 记录校验
        // ==========================================
        debug!("步骤2: 班次与排班校验");

        let schedule =
            self.milk
                .schedule(state.milking_frequency, &state.custom_milking_times, &policy);
        self.milk
            .validate_new_record(record, existing_records, &schedule, &policy)?;

        // ==========================================
        // 步骤3: 重算日均与频次
        // ==========================================
        debug!("步骤3: 重算窗口日均与频次");

        let mut window = existing_records.to_vec();
        window.push(record.clone());
        let avg = self.milk.average_daily_yield(
            &window,
            &master.ear_tag,
            today,
            policy.average_window_days,
        );

        state.avg_daily_yield_l = avg;
        // 自定义排班代表人工接管,不参与产量驱动的频次调整
        if state.milking_frequency != MilkingFrequency::Custom {
            if let Some(avg_yield) = avg {
                state.milking_frequency = self.milk.recompute_frequency(avg_yield, &policy);
            }
        }
        state.touch(ENGINE_OPERATOR);

        info!(
            ear_tag = %master.ear_tag,
            avg_daily_yield_l = ?avg,
            milking_frequency = %state.milking_frequency,
            "产奶登记处理完成"
        );

        Ok(MilkYieldOutcome {
            avg_daily_yield_l: avg,
            milking_frequency: state.milking_frequency,
            lactation_state: lactation,
        })
    }

    /// 每日重推导
    ///
    /// # 流程
    /// 1. 生命阶段重判定(月龄推进)
    /// 2. 妊娠推导落回状态(天数推进可能跨越阶段分界)
    /// 3. 预警扫描
    ///
    /// 输入不变时幂等,适合定时任务逐头调用
    pub async fn refresh_daily(
        &self,
        master: &CattleMaster,
        state: &mut CattleState,
        care_records: &[PeriodicCareRecord],
        today: NaiveDate,
    ) -> LifecycleResult<DailyRefreshOutcome> {
        debug!(ear_tag = %master.ear_tag, %today, "开始每日重推导");

        let thresholds = self
            .config
            .get_gestation_thresholds()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;
        let windows = self
            .config
            .get_alert_windows()
            .await
            .map_err(|e| LifecycleError::ConfigRead(e.to_string()))?;

        // 步骤1: 生命阶段
        let (stage, mut reasons) = LifeStageClassifier::classify(
            master.gender,
            master.birth_date,
            state.has_calved(),
            state.life_stage,
            today,
        );
        let stage_changed = stage != state.life_stage;
        state.life_stage = stage;

        // 步骤2: 妊娠推导
        let (gestation_changed, gestation_reasons) =
            GestationEngine::refresh_state(state, today, &thresholds);
        reasons.extend(gestation_reasons);

        let changed = stage_changed || gestation_changed;
        if changed {
            state.touch(ENGINE_OPERATOR);
        }

        // 步骤3: 预警扫描
        let alerts = self.alerts.scan(master, state, care_records, today, &windows);

        info!(
            ear_tag = %master.ear_tag,
            changed,
            life_stage = %stage,
            gestation_status = %state.gestation_status,
            alerts_count = alerts.len(),
            "每日重推导完成"
        );

        Ok(DailyRefreshOutcome {
            changed,
            life_stage: stage,
            derivation_reasons: reasons,
            alerts,
        })
    }

    /// 周期护理到期扫描(可跨牛批量)
    ///
    /// 到期且未通知的记录翻转通知标记并产出预警;
    /// 返回的记录由协作方回写,重复调用不会重复通报
    pub fn scan_due_care(
        &self,
        care_records: &[PeriodicCareRecord],
        today: NaiveDate,
    ) -> CareScanOutcome {
        let mut updated_records = Vec::new();
        let mut alerts = Vec::new();

        for record in care_records {
            if !record.is_due(today) || record.notification_sent {
                continue;
            }

            alerts.push(Alert::care_due(
                &record.ear_tag,
                &record.name,
                record.next_due_date,
            ));

            let mut flagged = record.clone();
            flagged.notification_sent = true;
            updated_records.push(flagged);
        }

        self.alerts.sort_for_presentation(&mut alerts);

        info!(
            scanned = care_records.len(),
            due = updated_records.len(),
            "周期护理扫描完成"
        );

        CareScanOutcome {
            updated_records,
            alerts,
        }
    }

    /// 档案移除级联失效
    ///
    /// 档案删除本身是协作方操作;本方法只给出须同步失效的
    /// 未完成里程碑与未读预警清单
    pub fn on_animal_removed(
        &self,
        ear_tag: &str,
        existing_milestones: &[Milestone],
        existing_alerts: &[Alert],
    ) -> RemovalOutcome {
        let invalidated_milestone_ids = self.milestones.incomplete_ids(ear_tag, existing_milestones);
        let dismissed_alert_ids = existing_alerts
            .iter()
            .filter(|a| a.ear_tag == ear_tag && !a.is_read)
            .map(|a| a.id)
            .collect::<Vec<_>>();

        info!(
            %ear_tag,
            milestones = invalidated_milestone_ids.len(),
            alerts = dismissed_alert_ids.len(),
            "档案移除级联清单生成完成"
        );

        RemovalOutcome {
            invalidated_milestone_ids,
            dismissed_alert_ids,
        }
    }
}
