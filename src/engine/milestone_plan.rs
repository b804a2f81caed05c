// ==========================================
// 奶牛生命周期引擎 - 孕期里程碑生成引擎
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 4. MilestoneGenerator
// 红线: "删除未完成后重建"保证幂等,已完成里程碑永不删除
// ==========================================
// 职责: 孕检确认后按偏移表生成孕期里程碑
// 输入: 配种日期 + 偏移表 + 现存里程碑
// 输出: MilestonePlan (待删除ID + 新建里程碑)
// ==========================================

use crate::config::herd_params::MilestoneOffset;
use crate::domain::milestone::{Milestone, MilestonePlan};
use chrono::{Duration, NaiveDate};
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// MilestoneGenerator - 里程碑生成引擎
// ==========================================
pub struct MilestoneGenerator {}

impl MilestoneGenerator {
    /// 创建新的里程碑生成引擎
    pub fn new() -> Self {
        Self {}
    }

    /// 孕检确认后生成孕期里程碑计划
    ///
    /// # 规则 (Lifecycle_Specs 4.1)
    /// 1. 删除该牛全部未完成里程碑（待删除ID进入计划,已完成不动）
    /// 2. 按偏移表逐条生成: due_date = 配种日 + offset_days
    /// 3. due_date 早于当日的条目跳过（不复活过期里程碑;当日到期保留）
    ///
    /// # 幂等性
    /// 同一配种日期重复生成,未完成集合内容不变（由删建策略保证,非去重键）
    #[instrument(skip(self, offsets, existing), fields(ear_tag = %ear_tag, offsets = offsets.len()))]
    pub fn plan_for_confirmation(
        &self,
        ear_tag: &str,
        insemination_date: NaiveDate,
        today: NaiveDate,
        offsets: &[MilestoneOffset],
        existing: &[Milestone],
    ) -> MilestonePlan {
        let mut plan = MilestonePlan::empty();

        // 规则 1: 旧计划未完成项全部进入删除清单
        plan.remove_ids = self.incomplete_ids(ear_tag, existing);

        // 规则 2/3: 按偏移表重建,过期条目跳过
        for offset in offsets {
            let due_date = insemination_date + Duration::days(offset.offset_days);
            if due_date < today {
                debug!(
                    offset_days = offset.offset_days,
                    %due_date,
                    "里程碑已过期,跳过"
                );
                plan.skipped_past += 1;
                continue;
            }

            plan.created.push(Milestone::new(
                ear_tag,
                offset.milestone_type,
                due_date,
                offset.description.clone(),
            ));
        }

        info!(
            removed = plan.remove_ids.len(),
            created = plan.created.len(),
            skipped_past = plan.skipped_past,
            "里程碑计划生成完成"
        );

        plan
    }

    /// 收集该牛未完成里程碑的ID（产犊/移除时失效处理用）
    pub fn incomplete_ids(&self, ear_tag: &str, existing: &[Milestone]) -> Vec<Uuid> {
        existing
            .iter()
            .filter(|m| m.ear_tag == ear_tag && !m.completed)
            .map(|m| m.id)
            .collect()
    }
}
