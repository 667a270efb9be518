//! Synthetic banking fixtures.
//!
//! [`DataGenerator`] produces records for every [`EntityKind`] in three
//! modes:
//!
//! - **valid**: realistic values inside every schema constraint
//! - **boundary**: bounded fields pinned to their documented min or max
//! - **invalid**: exactly one named field corrupted, the rest valid
//!
//! A generator owns its random source and never touches shared state, so
//! concurrent workers each hold their own. The free functions build a fresh
//! generator per call.

mod correlation;
pub mod faker;
mod mode;


use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{GeneratorError, Result};
use crate::records::codec::{amount, slot_time};
use crate::records::{
    Account, AccountType, Booking, CompoundingFrequency, Currency, Customer, EmploymentStatus,
    Loan, LoanType, MaturityInstruction, Payload, Record, ServiceType, TermDeposit,
};
use crate::schema::{EntityKind, FieldSpec, FieldType};
use crate::validation::limits;

pub use correlation::{generate_correlation_id, CORRELATION_PREFIX};
pub use mode::{Boundary, ExpectedOutcome, Mode};

/// Values written into a field to break its constraint.
pub mod corruption {
    pub const EMAIL: &str = "invalid-email-format";
    pub const PHONE: &str = "123";
    pub const SLOT_TIME: &str = "25:61";
    pub const ENUM: &str = "INVALID";
    /// Cents; serialized as `-100.0`.
    pub const AMOUNT_CENTS: i64 = -10_000;
    pub const MONTHS: i64 = -12;
    /// Wrong JSON type for optional text fields.
    pub const WRONG_TYPE: i64 = 12345;
    /// How far in the future a corrupted date of birth lies.
    pub const FUTURE_DOB_DAYS: u64 = 365;
    /// How far in the past a corrupted upcoming date lies.
    pub const PAST_DATE_DAYS: u64 = 7;
    /// Postcode placed in an otherwise well-formed address.
    pub const POSTCODE: &str = "ABCD";
}

/// Character repeated to fill boundary-length text fields.
const BOUNDARY_FILL: &str = "A";

const CUSTOMER_AGES: (u32, u32) = (18, 85);
const BOOKING_HORIZON_DAYS: u64 = 90;
const LOAN_TERMS: &[u32] = &[12, 24, 36, 60, 120, 180, 240, 300, 360];
const TERM_DEPOSIT_TERMS: &[u32] = &[3, 6, 12, 24, 36, 48, 60];

/// Seeded fixture generator.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: StdRng,
    today: NaiveDate,
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGenerator {
    /// Generator seeded from the thread-local RNG, dated today (UTC).
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
            today: Utc::now().date_naive(),
        }
    }

    /// Reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            today: Utc::now().date_naive(),
        }
    }

    /// Fix the reference date used for ages and booking dates.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Generate one payload.
    ///
    /// Fails only for an invalid-mode field the entity schema does not
    /// define.
    pub fn generate(&mut self, kind: EntityKind, mode: &Mode) -> Result<Payload> {
        let payload = match mode {
            Mode::Valid => self.record(kind).to_payload()?,
            Mode::Boundary(boundary) => self.boundary_payload(kind, *boundary)?,
            Mode::Invalid(field) => {
                let spec = kind.require_field(field)?;
                let mut payload = self.record(kind).to_payload()?;
                payload.insert_raw(spec.name, corrupt(spec, self.today));
                payload
            }
        };
        debug!(kind = %kind, mode = %mode, "Generated fixture");
        Ok(payload)
    }

    /// `count` valid payloads, distinct on the kind's unique field.
    pub fn generate_batch(&mut self, kind: EntityKind, count: usize) -> Result<Vec<Payload>> {
        let records = self.distinct(
            kind,
            count,
            |g| g.record(kind),
            |r: &Record| r.unique_key().to_string(),
        )?;
        let payloads = records
            .iter()
            .map(Record::to_payload)
            .collect::<Result<Vec<_>>>()?;
        debug!(kind = %kind, count, "Generated batch");
        Ok(payloads)
    }

    /// A valid typed record.
    pub fn record(&mut self, kind: EntityKind) -> Record {
        match kind {
            EntityKind::Customer => Record::Customer(self.customer()),
            EntityKind::Account => Record::Account(self.account()),
            EntityKind::Booking => Record::Booking(self.booking()),
            EntityKind::Loan => Record::Loan(self.loan()),
            EntityKind::TermDeposit => Record::TermDeposit(self.term_deposit()),
        }
    }

    /// A typed record with bounded fields pinned to `boundary`.
    pub fn boundary_record(&mut self, kind: EntityKind, boundary: Boundary) -> Result<Record> {
        Record::from_payload(&self.boundary_payload(kind, boundary)?)
    }

    pub fn customer(&mut self) -> Customer {
        let first_name = faker::first_name(&mut self.rng);
        let last_name = faker::last_name(&mut self.rng);
        let email = faker::email(&mut self.rng, &first_name, &last_name);
        Customer {
            phone: faker::phone(&mut self.rng),
            dob: faker::date_of_birth(&mut self.rng, self.today, CUSTOMER_AGES.0, CUSTOMER_AGES.1),
            address: Some(faker::address(&mut self.rng)),
            first_name,
            last_name,
            email,
        }
    }

    pub fn account(&mut self) -> Account {
        let words = self.rng.random_range(3..=6);
        Account {
            customer_id: faker::customer_id(&mut self.rng),
            account_type: *faker::pick(&mut self.rng, AccountType::ALL),
            currency: *faker::pick(&mut self.rng, Currency::ALL),
            initial_balance: faker::amount(&mut self.rng, 10_000, 5_000_000),
            description: faker::sentence(&mut self.rng, words),
            branch: Some(faker::branch(&mut self.rng)),
        }
    }

    pub fn booking(&mut self) -> Booking {
        let words = self.rng.random_range(2..=8);
        let notes = Some(faker::sentence(&mut self.rng, words));
        Booking {
            customer_id: faker::customer_id(&mut self.rng),
            service_type: *faker::pick(&mut self.rng, ServiceType::ALL),
            booking_date: faker::upcoming_date(&mut self.rng, self.today, BOOKING_HORIZON_DAYS),
            booking_time: faker::slot_time(&mut self.rng),
            branch: format!("{} Branch", faker::city(&mut self.rng)),
            notes,
        }
    }

    pub fn loan(&mut self) -> Loan {
        Loan {
            customer_id: faker::customer_id(&mut self.rng),
            loan_type: *faker::pick(&mut self.rng, LoanType::ALL),
            amount: faker::amount(&mut self.rng, 500_000, 50_000_000),
            term: *faker::pick(&mut self.rng, LOAN_TERMS),
            interest_rate: faker::amount(&mut self.rng, 300, 1_200),
            purpose: format!("{} loan", capitalize(faker::word(&mut self.rng))),
            employment_status: *faker::pick(&mut self.rng, EmploymentStatus::ALL),
            annual_income: faker::amount(&mut self.rng, 3_000_000, 25_000_000),
        }
    }

    pub fn term_deposit(&mut self) -> TermDeposit {
        TermDeposit {
            customer_id: faker::customer_id(&mut self.rng),
            principal: faker::amount(&mut self.rng, 500_000, 25_000_000),
            term_months: *faker::pick(&mut self.rng, TERM_DEPOSIT_TERMS),
            interest_rate: faker::amount(&mut self.rng, 150, 550),
            compounding_frequency: *faker::pick(&mut self.rng, CompoundingFrequency::ALL),
            maturity_instructions: *faker::pick(&mut self.rng, MaturityInstruction::ALL),
        }
    }

    /// Two valid bookings occupying the same (customer, date, time) slot.
    ///
    /// Submitting the second after the first should be rejected as a
    /// conflict.
    pub fn conflicting_bookings(&mut self) -> (Booking, Booking) {
        let first = self.booking();
        let mut second = self.booking();
        second.customer_id = first.customer_id.clone();
        second.booking_date = first.booking_date;
        second.booking_time = first.booking_time;
        debug!(
            customer_id = %first.customer_id,
            date = %first.booking_date,
            "Generated conflicting bookings"
        );
        (first, second)
    }

    /// Customer/account/correlation bundles for load scenarios.
    ///
    /// Customers are distinct on email.
    pub fn performance_fixtures(&mut self, count: usize) -> Result<Vec<PerformanceFixture>> {
        let customers = self.distinct(
            EntityKind::Customer,
            count,
            |g| g.customer(),
            |c: &Customer| c.email.clone(),
        )?;
        Ok(customers
            .into_iter()
            .map(|customer| PerformanceFixture {
                customer,
                account: self.account(),
                correlation_id: generate_correlation_id(),
            })
            .collect())
    }

    /// Generate one of the named datasets.
    pub fn preset(&mut self, preset: Preset) -> Result<Payload> {
        self.generate(preset.kind(), &preset.mode())
    }

    fn boundary_payload(&mut self, kind: EntityKind, boundary: Boundary) -> Result<Payload> {
        let mut payload = self.record(kind).to_payload()?;
        for spec in kind.schema() {
            if let Some(value) = boundary_value(spec, boundary, self.today) {
                payload.insert_raw(spec.name, value);
            }
        }
        Ok(payload)
    }

    /// Draw until `count` values with distinct keys exist.
    fn distinct<T>(
        &mut self,
        kind: EntityKind,
        count: usize,
        mut make: impl FnMut(&mut Self) -> T,
        key: impl Fn(&T) -> String,
    ) -> Result<Vec<T>> {
        let capacity = identifier_space(kind);
        if count > capacity {
            return Err(GeneratorError::BatchTooLarge {
                kind: kind.to_string(),
                requested: count,
                capacity,
            });
        }

        let mut seen = HashSet::with_capacity(count);
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            let item = make(self);
            if seen.insert(key(&item)) {
                out.push(item);
            }
        }
        Ok(out)
    }
}

/// One bundle of load-test data.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceFixture {
    pub customer: Customer,
    pub account: Account,
    pub correlation_id: String,
}

/// Named datasets used by scenario tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    HappyPathCustomer,
    HappyPathAccount,
    InvalidEmailCustomer,
    NegativeBalanceAccount,
    BoundaryMinCustomer,
    BoundaryMaxAccount,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::HappyPathCustomer,
        Preset::HappyPathAccount,
        Preset::InvalidEmailCustomer,
        Preset::NegativeBalanceAccount,
        Preset::BoundaryMinCustomer,
        Preset::BoundaryMaxAccount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::HappyPathCustomer => "happy_path_customer",
            Preset::HappyPathAccount => "happy_path_account",
            Preset::InvalidEmailCustomer => "invalid_email_customer",
            Preset::NegativeBalanceAccount => "negative_balance_account",
            Preset::BoundaryMinCustomer => "boundary_min_customer",
            Preset::BoundaryMaxAccount => "boundary_max_account",
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Preset::HappyPathCustomer
            | Preset::InvalidEmailCustomer
            | Preset::BoundaryMinCustomer => EntityKind::Customer,
            Preset::HappyPathAccount
            | Preset::NegativeBalanceAccount
            | Preset::BoundaryMaxAccount => EntityKind::Account,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Preset::HappyPathCustomer | Preset::HappyPathAccount => Mode::Valid,
            Preset::InvalidEmailCustomer => Mode::Invalid("email".to_string()),
            Preset::NegativeBalanceAccount => Mode::Invalid("initialBalance".to_string()),
            Preset::BoundaryMinCustomer => Mode::Boundary(Boundary::Min),
            Preset::BoundaryMaxAccount => Mode::Boundary(Boundary::Max),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = GeneratorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == name)
            .ok_or_else(|| GeneratorError::UnknownPreset(s.to_string()))
    }
}

/// Generate one payload with a fresh generator.
pub fn generate(kind: EntityKind, mode: &Mode) -> Result<Payload> {
    DataGenerator::new().generate(kind, mode)
}

/// Generate a distinct batch with a fresh generator.
pub fn generate_batch(kind: EntityKind, count: usize) -> Result<Vec<Payload>> {
    DataGenerator::new().generate_batch(kind, count)
}

/// Generate from step-definition strings, e.g. `("account", "invalid", Some("currency"))`.
pub fn generate_named(kind: &str, mode: &str, selector: Option<&str>) -> Result<Payload> {
    let kind: EntityKind = kind.parse()?;
    let mode = Mode::parse(mode, selector)?;
    generate(kind, &mode)
}

/// Distinct values the kind's unique field can take.
fn identifier_space(kind: EntityKind) -> usize {
    match kind {
        EntityKind::Customer => faker::EMAIL_SPACE,
        _ => faker::CUSTOMER_ID_SPACE,
    }
}

/// Pinned value for a bounded field, `None` for fields without a range.
fn boundary_value(spec: &FieldSpec, boundary: Boundary, today: NaiveDate) -> Option<Value> {
    fn pick<T>(boundary: Boundary, min: T, max: T) -> T {
        match boundary {
            Boundary::Min => min,
            Boundary::Max => max,
        }
    }

    let value = match spec.field_type {
        FieldType::Text { min_len, max_len } => {
            Value::String(BOUNDARY_FILL.repeat(pick(boundary, min_len, max_len)))
        }
        FieldType::Phone => pick(boundary, limits::MIN_PHONE, limits::MAX_PHONE).into(),
        FieldType::BirthDate { min_age, max_age } => {
            let age = pick(boundary, min_age, max_age).unsigned_abs();
            faker::years_before(today, age).to_string().into()
        }
        FieldType::UpcomingDate { max_days_ahead } => {
            let days = pick(boundary, 1, max_days_ahead).unsigned_abs();
            faker::days_after(today, days).to_string().into()
        }
        FieldType::SlotTime => {
            let hour = pick(boundary, limits::FIRST_SLOT_HOUR, limits::LAST_SLOT_HOUR);
            faker::slot_at(hour).format(slot_time::FORMAT).to_string().into()
        }
        FieldType::Amount { .. } => {
            let (min, max) = spec.amount_bounds()?;
            json!(amount::to_f64(&pick(boundary, min, max)))
        }
        FieldType::Months { min, max } => json!(pick(boundary, min, max)),
        FieldType::Address => {
            let states = limits::AUSTRALIAN_STATES;
            let state = pick(boundary, states.first(), states.last())?;
            json!({
                "street": BOUNDARY_FILL.repeat(pick(boundary, 1, limits::MAX_STREET_LENGTH)),
                "city": BOUNDARY_FILL.repeat(pick(boundary, 1, limits::MAX_CITY_LENGTH)),
                "state": state,
                "postcode": pick(boundary, limits::MIN_POSTCODE, limits::MAX_POSTCODE),
                "country": limits::ADDRESS_COUNTRY,
            })
        }
        FieldType::Email | FieldType::Enum(_) | FieldType::CustomerRef => return None,
    };
    Some(value)
}

/// Value that breaks `spec` while keeping the payload otherwise well-formed.
fn corrupt(spec: &FieldSpec, today: NaiveDate) -> Value {
    match spec.field_type {
        FieldType::Text { min_len, .. } if spec.required && min_len > 0 => {
            Value::String(String::new())
        }
        FieldType::Text { .. } => json!(corruption::WRONG_TYPE),
        FieldType::Email => corruption::EMAIL.into(),
        FieldType::Phone => corruption::PHONE.into(),
        FieldType::BirthDate { .. } => faker::days_after(today, corruption::FUTURE_DOB_DAYS)
            .to_string()
            .into(),
        FieldType::UpcomingDate { .. } => today
            .checked_sub_days(Days::new(corruption::PAST_DATE_DAYS))
            .unwrap_or(NaiveDate::MIN)
            .to_string()
            .into(),
        FieldType::SlotTime => corruption::SLOT_TIME.into(),
        FieldType::Enum(_) => corruption::ENUM.into(),
        FieldType::CustomerRef => Value::String(String::new()),
        FieldType::Amount { .. } => {
            json!(amount::to_f64(&rust_decimal::Decimal::new(corruption::AMOUNT_CENTS, 2)))
        }
        FieldType::Months { .. } => json!(corruption::MONTHS),
        FieldType::Address => json!({
            "street": "1 Collins Street",
            "city": "Melbourne",
            "state": "VIC",
            "postcode": corruption::POSTCODE,
            "country": limits::ADDRESS_COUNTRY,
        }),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
