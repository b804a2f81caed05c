// ==========================================
// 奶牛生命周期引擎 - 周期性护理模型
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - periodic_care_record
// 用途: 周期性疫苗/诊疗排程,到期扫描由 AlertEngine/Coordinator 驱动
// ==========================================

use crate::domain::types::CareKind;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// PeriodicCareRecord - 周期性护理记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodicCareRecord {
    // ===== 主键与关联 =====
    pub id: Uuid,        // 记录 ID
    pub ear_tag: String, // 关联 cattle_master（FK）

    // ===== 护理项 =====
    pub care_kind: CareKind, // 护理类型
    pub name: String,        // 项目名称（如 口蹄疫疫苗）

    // ===== 排程 =====
    pub last_administered_date: NaiveDate, // 最近执行日期
    pub interval_days: u32,                // 执行间隔（天）
    pub next_due_date: NaiveDate,          // 下次到期日（= 最近执行日 + 间隔）

    // ===== 通知状态 =====
    pub notification_sent: bool, // 到期通知已发送标志（扫描置位,执行后复位）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间
}

impl PeriodicCareRecord {
    /// 创建周期性护理记录（到期日按间隔推算）
    pub fn new(
        ear_tag: &str,
        care_kind: CareKind,
        name: &str,
        last_administered_date: NaiveDate,
        interval_days: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            ear_tag: ear_tag.to_string(),
            care_kind,
            name: name.to_string(),
            last_administered_date,
            interval_days,
            next_due_date: last_administered_date + Duration::days(interval_days as i64),
            notification_sent: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 重算下次到期日
    ///
    /// 最近执行日或间隔变更后调用；同时复位通知标志
    pub fn recompute_next_due(&mut self) {
        self.next_due_date =
            self.last_administered_date + Duration::days(self.interval_days as i64);
        self.notification_sent = false;
        self.updated_at = Utc::now();
    }

    /// 是否已到期（today ≥ next_due_date）
    pub fn is_due(&self, today: NaiveDate) -> bool {
        today >= self.next_due_date
    }

    /// 登记一次执行（顺延下一周期）
    pub fn mark_administered(&mut self, date: NaiveDate) {
        self.last_administered_date = date;
        self.recompute_next_due();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record() -> PeriodicCareRecord {
        PeriodicCareRecord::new(
            "CN-0001",
            CareKind::Vaccination,
            "口蹄疫疫苗",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            180,
        )
    }

    #[test]
    fn test_next_due_from_interval() {
        let record = base_record();
        assert_eq!(
            record.next_due_date,
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            "到期日应为最近执行日+180天"
        );
    }

    #[test]
    fn test_is_due_boundary() {
        let record = base_record();
        let due = record.next_due_date;
        assert!(!record.is_due(due - Duration::days(1)), "到期前一天未到期");
        assert!(record.is_due(due), "到期当天即到期");
        assert!(record.is_due(due + Duration::days(10)), "逾期仍视为到期");
    }

    #[test]
    fn test_mark_administered_rolls_forward() {
        let mut record = base_record();
        record.notification_sent = true;

        let executed = NaiveDate::from_ymd_opt(2026, 7, 2).unwrap();
        record.mark_administered(executed);

        assert_eq!(record.last_administered_date, executed);
        assert_eq!(record.next_due_date, executed + Duration::days(180));
        assert!(!record.notification_sent, "执行后通知标志应复位");
    }
}
