//! Typed banking records.
//!
//! One struct per entity kind, tagged together by [`Record`]. Records are
//! what the generator produces before they become a wire [`Payload`].

pub mod codec;
mod payload;

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};
use crate::schema::EntityKind;

pub use payload::Payload;

/// Declares a closed set of wire values.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const WIRE: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Account product.
    AccountType {
        Savings => "SAVINGS",
        Checking => "CHECKING",
        TermDeposit => "TERM_DEPOSIT",
        CreditCard => "CREDIT_CARD",
    }
);

wire_enum!(
    /// ISO 4217 currencies the API accepts.
    Currency {
        Aud => "AUD",
        Usd => "USD",
        Eur => "EUR",
        Gbp => "GBP",
    }
);

wire_enum!(
    /// Branch service a booking reserves.
    ServiceType {
        Appointment => "APPOINTMENT",
        Consultation => "CONSULTATION",
        LoanMeeting => "LOAN_MEETING",
        InvestmentAdvice => "INVESTMENT_ADVICE",
    }
);

wire_enum!(
    LoanType {
        Personal => "PERSONAL",
        Home => "HOME",
        Car => "CAR",
        Business => "BUSINESS",
    }
);

wire_enum!(
    EmploymentStatus {
        FullTime => "FULL_TIME",
        PartTime => "PART_TIME",
        SelfEmployed => "SELF_EMPLOYED",
        Unemployed => "UNEMPLOYED",
    }
);

wire_enum!(
    CompoundingFrequency {
        Monthly => "MONTHLY",
        Quarterly => "QUARTERLY",
        Annually => "ANNUALLY",
    }
);

wire_enum!(
    /// What happens to a term deposit at maturity.
    MaturityInstruction {
        Rollover => "ROLLOVER",
        TransferToSavings => "TRANSFER_TO_SAVINGS",
        ContactCustomer => "CONTACT_CUSTOMER",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub address: Option<Address>,
}

/// Postal address nested inside a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    /// State or territory abbreviation, e.g. `VIC`.
    pub state: String,
    pub postcode: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub customer_id: String,
    pub account_type: AccountType,
    pub currency: Currency,
    #[serde(with = "codec::amount")]
    pub initial_balance: Decimal,
    pub description: String,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub customer_id: String,
    pub service_type: ServiceType,
    pub booking_date: NaiveDate,
    #[serde(with = "codec::slot_time")]
    pub booking_time: NaiveTime,
    pub branch: String,
    pub notes: Option<String>,
}

/// Key two bookings collide on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingSlot {
    pub customer_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Booking {
    /// The (customer, date, time) slot this booking occupies.
    pub fn slot(&self) -> BookingSlot {
        BookingSlot {
            customer_id: self.customer_id.clone(),
            date: self.booking_date,
            time: self.booking_time,
        }
    }

    /// True if both bookings occupy the same slot.
    pub fn conflicts_with(&self, other: &Booking) -> bool {
        self.slot() == other.slot()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub customer_id: String,
    pub loan_type: LoanType,
    #[serde(with = "codec::amount")]
    pub amount: Decimal,
    /// Months.
    pub term: u32,
    #[serde(with = "codec::amount")]
    pub interest_rate: Decimal,
    pub purpose: String,
    pub employment_status: EmploymentStatus,
    #[serde(with = "codec::amount")]
    pub annual_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDeposit {
    pub customer_id: String,
    #[serde(with = "codec::amount")]
    pub principal: Decimal,
    pub term_months: u32,
    #[serde(with = "codec::amount")]
    pub interest_rate: Decimal,
    pub compounding_frequency: CompoundingFrequency,
    pub maturity_instructions: MaturityInstruction,
}

/// A record of any entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Customer(Customer),
    Account(Account),
    Booking(Booking),
    Loan(Loan),
    TermDeposit(TermDeposit),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Customer(_) => EntityKind::Customer,
            Record::Account(_) => EntityKind::Account,
            Record::Booking(_) => EntityKind::Booking,
            Record::Loan(_) => EntityKind::Loan,
            Record::TermDeposit(_) => EntityKind::TermDeposit,
        }
    }

    /// Value of the field that must be unique across a batch.
    pub fn unique_key(&self) -> &str {
        match self {
            Record::Customer(c) => &c.email,
            Record::Account(a) => &a.customer_id,
            Record::Booking(b) => &b.customer_id,
            Record::Loan(l) => &l.customer_id,
            Record::TermDeposit(t) => &t.customer_id,
        }
    }

    /// Encode as a wire payload.
    pub fn to_payload(&self) -> Result<Payload> {
        let value = match self {
            Record::Customer(r) => serde_json::to_value(r)?,
            Record::Account(r) => serde_json::to_value(r)?,
            Record::Booking(r) => serde_json::to_value(r)?,
            Record::Loan(r) => serde_json::to_value(r)?,
            Record::TermDeposit(r) => serde_json::to_value(r)?,
        };
        Payload::from_value(self.kind(), value)
    }

    /// Decode a payload back into its typed record.
    ///
    /// Fails for payloads whose values do not fit the typed fields, which is
    /// expected for most invalid-mode payloads.
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let value = payload.to_value();
        let record = match payload.kind() {
            EntityKind::Customer => Record::Customer(serde_json::from_value(value)?),
            EntityKind::Account => Record::Account(serde_json::from_value(value)?),
            EntityKind::Booking => Record::Booking(serde_json::from_value(value)?),
            EntityKind::Loan => Record::Loan(serde_json::from_value(value)?),
            EntityKind::TermDeposit => Record::TermDeposit(serde_json::from_value(value)?),
        };
        Ok(record)
    }
}

impl TryFrom<&Payload> for Record {
    type Error = GeneratorError;

    fn try_from(payload: &Payload) -> Result<Self> {
        Record::from_payload(payload)
    }
}
