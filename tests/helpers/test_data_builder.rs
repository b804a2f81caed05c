// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{Duration, NaiveDate, NaiveTime};
use herd_lifecycle_engine::domain::types::{
    CareKind, Gender, GestationStage, GestationStatus, LifeStage, MilkShift, MilkingFrequency,
};
use herd_lifecycle_engine::domain::{
    CattleMaster, CattleState, MilkRecord, PeriodicCareRecord,
};

// ==========================================
// CattleMaster 构建器
// ==========================================

pub struct CattleBuilder {
    ear_tag: String,
    gender: Gender,
    birth_date: Option<NaiveDate>,
    breed: Option<String>,
    dam_ear_tag: Option<String>,
}

impl CattleBuilder {
    pub fn new(ear_tag: &str) -> Self {
        Self {
            ear_tag: ear_tag.to_string(),
            gender: Gender::Female,
            birth_date: None,
            breed: None,
            dam_ear_tag: None,
        }
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn breed(mut self, breed: &str) -> Self {
        self.breed = Some(breed.to_string());
        self
    }

    pub fn dam(mut self, ear_tag: &str) -> Self {
        self.dam_ear_tag = Some(ear_tag.to_string());
        self
    }

    pub fn build(self) -> CattleMaster {
        let mut master = CattleMaster::new(&self.ear_tag, self.gender, self.birth_date);
        master.breed = self.breed;
        master.dam_ear_tag = self.dam_ear_tag;
        master
    }
}

// ==========================================
// CattleState 构建器
// ==========================================

pub struct CattleStateBuilder {
    ear_tag: String,
    life_stage: LifeStage,
    gestation_status: GestationStatus,
    gestation_stage: GestationStage,
    last_insemination_date: Option<NaiveDate>,
    pregnancy_confirmed: bool,
    expected_calving_date: Option<NaiveDate>,
    expected_insemination_date: Option<NaiveDate>,
    last_calving_date: Option<NaiveDate>,
    calving_count: u32,
    lactation_number: u32,
    milking_frequency: MilkingFrequency,
    custom_milking_times: Vec<NaiveTime>,
    avg_daily_yield_l: Option<f64>,
}

impl CattleStateBuilder {
    pub fn new(ear_tag: &str) -> Self {
        Self {
            ear_tag: ear_tag.to_string(),
            life_stage: LifeStage::Cow,
            gestation_status: GestationStatus::NotPregnant,
            gestation_stage: GestationStage::NotPregnant,
            last_insemination_date: None,
            pregnancy_confirmed: false,
            expected_calving_date: None,
            expected_insemination_date: None,
            last_calving_date: None,
            calving_count: 0,
            lactation_number: 0,
            milking_frequency: MilkingFrequency::Once,
            custom_milking_times: Vec::new(),
            avg_daily_yield_l: None,
        }
    }

    pub fn life_stage(mut self, stage: LifeStage) -> Self {
        self.life_stage = stage;
        self
    }

    /// 配种日 + 妊娠粗粒度状态（细粒度由引擎推导）
    pub fn inseminated(mut self, date: NaiveDate) -> Self {
        self.last_insemination_date = Some(date);
        self.gestation_status = GestationStatus::Pregnant;
        self.gestation_stage = GestationStage::FirstTrimester;
        self
    }

    pub fn pregnancy_confirmed(mut self) -> Self {
        self.pregnancy_confirmed = true;
        self
    }

    pub fn expected_calving(mut self, date: NaiveDate) -> Self {
        self.expected_calving_date = Some(date);
        self
    }

    pub fn expected_insemination(mut self, date: NaiveDate) -> Self {
        self.expected_insemination_date = Some(date);
        self
    }

    /// 产犊履历（产犊日 + 次数,泌乳胎次随产犊次数）
    pub fn calved(mut self, date: NaiveDate, count: u32) -> Self {
        self.last_calving_date = Some(date);
        self.calving_count = count;
        self.lactation_number = count;
        self
    }

    pub fn milking_frequency(mut self, frequency: MilkingFrequency) -> Self {
        self.milking_frequency = frequency;
        self
    }

    pub fn custom_milking_times(mut self, times: Vec<NaiveTime>) -> Self {
        self.custom_milking_times = times;
        self.milking_frequency = MilkingFrequency::Custom;
        self
    }

    pub fn avg_daily_yield(mut self, yield_l: f64) -> Self {
        self.avg_daily_yield_l = Some(yield_l);
        self
    }

    pub fn build(self) -> CattleState {
        let mut state = CattleState::initial(&self.ear_tag, self.life_stage);
        state.gestation_status = self.gestation_status;
        state.gestation_stage = self.gestation_stage;
        state.last_insemination_date = self.last_insemination_date;
        state.pregnancy_confirmed = self.pregnancy_confirmed;
        state.expected_calving_date = self.expected_calving_date;
        state.expected_insemination_date = self.expected_insemination_date;
        state.last_calving_date = self.last_calving_date;
        state.calving_count = self.calving_count;
        state.lactation_number = self.lactation_number;
        state.milking_frequency = self.milking_frequency;
        state.custom_milking_times = self.custom_milking_times;
        state.avg_daily_yield_l = self.avg_daily_yield_l;
        state
    }
}

// ==========================================
// MilkRecord 构建器
// ==========================================

pub struct MilkRecordBuilder {
    ear_tag: String,
    date: NaiveDate,
    shift: MilkShift,
    quantity_l: f64,
    recorded_time: Option<NaiveTime>,
}

impl MilkRecordBuilder {
    pub fn new(ear_tag: &str, date: NaiveDate, shift: MilkShift) -> Self {
        Self {
            ear_tag: ear_tag.to_string(),
            date,
            shift,
            quantity_l: 10.0,
            recorded_time: None,
        }
    }

    pub fn quantity(mut self, quantity_l: f64) -> Self {
        self.quantity_l = quantity_l;
        self
    }

    pub fn recorded_at(mut self, time: NaiveTime) -> Self {
        self.recorded_time = Some(time);
        self
    }

    pub fn build(self) -> MilkRecord {
        let record = MilkRecord::new(&self.ear_tag, self.date, self.shift, self.quantity_l);
        match self.recorded_time {
            Some(time) => record.with_time(time),
            None => record,
        }
    }
}

// ==========================================
// PeriodicCareRecord 构建器
// ==========================================

pub struct CareRecordBuilder {
    ear_tag: String,
    care_kind: CareKind,
    name: String,
    last_administered_date: NaiveDate,
    interval_days: u32,
    notification_sent: bool,
}

impl CareRecordBuilder {
    pub fn new(ear_tag: &str, name: &str, last_administered_date: NaiveDate) -> Self {
        Self {
            ear_tag: ear_tag.to_string(),
            care_kind: CareKind::Vaccination,
            name: name.to_string(),
            last_administered_date,
            interval_days: 180,
            notification_sent: false,
        }
    }

    pub fn kind(mut self, care_kind: CareKind) -> Self {
        self.care_kind = care_kind;
        self
    }

    pub fn interval_days(mut self, days: u32) -> Self {
        self.interval_days = days;
        self
    }

    pub fn notified(mut self) -> Self {
        self.notification_sent = true;
        self
    }

    pub fn build(self) -> PeriodicCareRecord {
        let mut record = PeriodicCareRecord::new(
            &self.ear_tag,
            self.care_kind,
            &self.name,
            self.last_administered_date,
            self.interval_days,
        );
        record.notification_sent = self.notification_sent;
        record
    }
}

// ==========================================
// 便捷函数
// ==========================================

/// 回推 N 个固定月（30天/月,月龄口径一致）
pub fn born_months_ago(today: NaiveDate, months: i64) -> NaiveDate {
    today - Duration::days(months * 30)
}

/// 创建已产犊的成母牛（主数据 + 状态）
pub fn create_milking_cow(
    ear_tag: &str,
    today: NaiveDate,
    days_in_milk: i64,
) -> (CattleMaster, CattleState) {
    let master = CattleBuilder::new(ear_tag)
        .birth_date(born_months_ago(today, 36))
        .breed("Holstein")
        .build();
    let state = CattleStateBuilder::new(ear_tag)
        .life_stage(LifeStage::Cow)
        .calved(today - Duration::days(days_in_milk), 1)
        .build();
    (master, state)
}
