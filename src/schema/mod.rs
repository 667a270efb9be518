//! Entity kinds and their field schemas.
//!
//! Each entity kind has a fixed, ordered set of fields with a semantic type.
//! The generator uses the schema to pin boundary values and to corrupt a
//! single named field. [`validate`] checks a payload against the schema and
//! reports every violating field.

mod validate;

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::GeneratorError;
use crate::records::{
    AccountType, CompoundingFrequency, Currency, EmploymentStatus, LoanType,
    MaturityInstruction, ServiceType,
};

pub use validate::{validate, validate_as_of, Violation};

/// Banking domain record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Account,
    Booking,
    Loan,
    TermDeposit,
}

impl EntityKind {
    /// All entity kinds, in declaration order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Customer,
        EntityKind::Account,
        EntityKind::Booking,
        EntityKind::Loan,
        EntityKind::TermDeposit,
    ];

    /// Snake-case name used by step definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::Account => "account",
            EntityKind::Booking => "booking",
            EntityKind::Loan => "loan",
            EntityKind::TermDeposit => "term_deposit",
        }
    }

    /// REST collection path segment for this kind.
    pub fn resource(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::Account => "accounts",
            EntityKind::Booking => "bookings",
            EntityKind::Loan => "loans",
            EntityKind::TermDeposit => "term-deposits",
        }
    }

    /// Ordered field schema.
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Customer => CUSTOMER_FIELDS,
            EntityKind::Account => ACCOUNT_FIELDS,
            EntityKind::Booking => BOOKING_FIELDS,
            EntityKind::Loan => LOAN_FIELDS,
            EntityKind::TermDeposit => TERM_DEPOSIT_FIELDS,
        }
    }

    /// Look up a field by its wire name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.schema().iter().find(|spec| spec.name == name)
    }

    /// Look up a field, failing with a schema error when absent.
    pub fn require_field(&self, name: &str) -> Result<&'static FieldSpec, GeneratorError> {
        self.field(name).ok_or_else(|| GeneratorError::UnknownField {
            kind: self.as_str().to_string(),
            field: name.to_string(),
        })
    }

    /// Wire names of every field, in schema order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.schema().iter().map(|spec| spec.name).collect()
    }

    /// Name of the field that must be unique across a batch.
    pub fn unique_field(&self) -> &'static str {
        match self {
            EntityKind::Customer => "email",
            _ => "customerId",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "customer" => Ok(EntityKind::Customer),
            "account" => Ok(EntityKind::Account),
            "booking" => Ok(EntityKind::Booking),
            "loan" => Ok(EntityKind::Loan),
            "term_deposit" => Ok(EntityKind::TermDeposit),
            _ => Err(GeneratorError::UnknownEntityKind(s.to_string())),
        }
    }
}

/// Semantic type of a field, with its accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text with an inclusive character-count range.
    Text { min_len: usize, max_len: usize },
    /// RFC-shaped email address.
    Email,
    /// Australian mobile number.
    Phone,
    /// Date of birth, constrained by age in whole years.
    BirthDate { min_age: i32, max_age: i32 },
    /// Date strictly after today and at most `max_days_ahead` days away.
    UpcomingDate { max_days_ahead: i64 },
    /// Hourly branch slot, `HH:MM`.
    SlotTime,
    /// Closed set of wire values.
    Enum(&'static [&'static str]),
    /// Reference to an existing customer.
    CustomerRef,
    /// Money amount with two decimal places, bounds in cents.
    Amount { min_cents: i64, max_cents: i64 },
    /// Whole number of months.
    Months { min: i64, max: i64 },
    /// Nested postal address: street, city, state, postcode, country.
    Address,
}

impl FieldType {
    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Text { .. } => "text",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::BirthDate { .. } => "birth date",
            FieldType::UpcomingDate { .. } => "upcoming date",
            FieldType::SlotTime => "slot time",
            FieldType::Enum(_) => "enum",
            FieldType::CustomerRef => "customer reference",
            FieldType::Amount { .. } => "amount",
            FieldType::Months { .. } => "months",
            FieldType::Address => "address",
        }
    }
}

/// One field of an entity schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// camelCase wire name.
    pub name: &'static str,
    pub field_type: FieldType,
    /// Required fields must be present and non-null.
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }

    /// Inclusive amount bounds, if this is an amount field.
    pub fn amount_bounds(&self) -> Option<(Decimal, Decimal)> {
        match self.field_type {
            FieldType::Amount {
                min_cents,
                max_cents,
            } => Some((Decimal::new(min_cents, 2), Decimal::new(max_cents, 2))),
            _ => None,
        }
    }
}

static CUSTOMER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("firstName", FieldType::Text { min_len: 1, max_len: 50 }),
    FieldSpec::required("lastName", FieldType::Text { min_len: 1, max_len: 50 }),
    FieldSpec::required("email", FieldType::Email),
    FieldSpec::required("phone", FieldType::Phone),
    FieldSpec::required("dob", FieldType::BirthDate { min_age: 18, max_age: 100 }),
    FieldSpec::optional("address", FieldType::Address),
];

static ACCOUNT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("customerId", FieldType::CustomerRef),
    FieldSpec::required("accountType", FieldType::Enum(AccountType::WIRE)),
    FieldSpec::required("currency", FieldType::Enum(Currency::WIRE)),
    FieldSpec::required(
        "initialBalance",
        FieldType::Amount {
            min_cents: 0,
            max_cents: 99_999_999_999,
        },
    ),
    FieldSpec::required("description", FieldType::Text { min_len: 1, max_len: 500 }),
    FieldSpec::optional("branch", FieldType::Text { min_len: 1, max_len: 100 }),
];

static BOOKING_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("customerId", FieldType::CustomerRef),
    FieldSpec::required("serviceType", FieldType::Enum(ServiceType::WIRE)),
    FieldSpec::required("bookingDate", FieldType::UpcomingDate { max_days_ahead: 90 }),
    FieldSpec::required("bookingTime", FieldType::SlotTime),
    FieldSpec::required("branch", FieldType::Text { min_len: 1, max_len: 100 }),
    FieldSpec::optional("notes", FieldType::Text { min_len: 0, max_len: 500 }),
];

static LOAN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("customerId", FieldType::CustomerRef),
    FieldSpec::required("loanType", FieldType::Enum(LoanType::WIRE)),
    FieldSpec::required(
        "amount",
        FieldType::Amount {
            min_cents: 100_000,
            max_cents: 500_000_000,
        },
    ),
    FieldSpec::required("term", FieldType::Months { min: 6, max: 360 }),
    FieldSpec::required(
        "interestRate",
        FieldType::Amount {
            min_cents: 0,
            max_cents: 2_500,
        },
    ),
    FieldSpec::required("purpose", FieldType::Text { min_len: 1, max_len: 200 }),
    FieldSpec::required("employmentStatus", FieldType::Enum(EmploymentStatus::WIRE)),
    FieldSpec::required(
        "annualIncome",
        FieldType::Amount {
            min_cents: 0,
            max_cents: 1_000_000_000,
        },
    ),
];

static TERM_DEPOSIT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("customerId", FieldType::CustomerRef),
    FieldSpec::required(
        "principal",
        FieldType::Amount {
            min_cents: 100_000,
            max_cents: 1_000_000_000,
        },
    ),
    FieldSpec::required("termMonths", FieldType::Months { min: 1, max: 60 }),
    FieldSpec::required(
        "interestRate",
        FieldType::Amount {
            min_cents: 0,
            max_cents: 1_000,
        },
    ),
    FieldSpec::required(
        "compoundingFrequency",
        FieldType::Enum(CompoundingFrequency::WIRE),
    ),
    FieldSpec::required(
        "maturityInstructions",
        FieldType::Enum(MaturityInstruction::WIRE),
    ),
];
