// ==========================================
// 奶牛生命周期引擎 - 引擎层错误类型
// ==========================================
// 依据: Lifecycle_Engine_Specs_v1.2.md - 9. 拒绝口径
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    // ===== 繁殖资格错误 =====
    #[error("非母牛不可繁殖: ear_tag={ear_tag}, gender={gender}")]
    NotFemale { ear_tag: String, gender: String },

    #[error("生命阶段不满足操作条件: ear_tag={ear_tag}, life_stage={life_stage}, operation={operation}")]
    LifeStageIneligible {
        ear_tag: String,
        life_stage: String,
        operation: String,
    },

    #[error("已确认妊娠,不可重复配种: ear_tag={ear_tag}")]
    AlreadyPregnant { ear_tag: String },

    #[error("当前非妊娠状态: ear_tag={ear_tag}, gestation_status={status}")]
    NotPregnant { ear_tag: String, status: String },

    // ===== 日期口径错误 =====
    #[error("日期不得晚于当日 (field={field}): date={date}, today={today}")]
    FutureDate {
        field: String,
        date: String,
        today: String,
    },

    #[error("孕检日期早于配种日期: check_date={check_date}, insemination_date={insemination_date}")]
    CheckBeforeInsemination {
        check_date: String,
        insemination_date: String,
    },

    // ===== 状态机错误 =====
    #[error("孕检结果已定论,不可再次登记: ear_tag={ear_tag}, check_status={check_status}")]
    CheckAlreadySettled {
        ear_tag: String,
        check_status: String,
    },

    // ===== 产奶记录错误 =====
    #[error("重复的产奶记录: ear_tag={ear_tag}, date={date}, shift={shift}")]
    DuplicateMilkRecord {
        ear_tag: String,
        date: String,
        shift: String,
    },

    #[error("挤奶时间偏离排班: recorded={recorded}, nearest={nearest}, tolerance={tolerance_hours}小时")]
    OffScheduleMilkTime {
        recorded: String,
        nearest: String,
        tolerance_hours: i64,
    },

    #[error("当前不在泌乳期: ear_tag={ear_tag}, {reason}")]
    NotLactating { ear_tag: String, reason: String },

    // ===== 数据质量错误 =====
    #[error("犊牛数量与明细不一致: calf_count={calf_count}, details={details_len}")]
    CalfListMismatch { calf_count: u32, details_len: usize },

    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 通用错误 =====
    #[error("配置读取失败: {0}")]
    ConfigRead(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type LifecycleResult<T> = Result<T, LifecycleError>;
