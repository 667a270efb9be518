//! Realistic field values for an Australian retail bank.
//!
//! Every helper draws from the caller's random source so a seeded generator
//! stays reproducible.

use chrono::{Days, Months, NaiveDate, NaiveTime};
use rand::Rng;
use rust_decimal::Decimal;

use crate::records::Address;
use crate::validation::limits;

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Charlotte", "Amelia", "Isla", "Mia", "Ava", "Grace", "Harper", "Chloe", "Zoe",
    "Matilda", "Ruby", "Sienna", "Evie", "Lily", "Oliver", "Noah", "Jack", "William", "Leo",
    "Lucas", "Thomas", "Henry", "Charlie", "James", "Hudson", "Ethan", "Mason", "Liam", "Harrison",
    "Archie", "Hunter", "Cooper", "Riley", "Samuel", "Wei", "Priya", "Aarav", "Mei", "Tran",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Williams", "Brown", "Wilson", "Taylor", "Johnson", "White", "Martin",
    "Anderson", "Thompson", "Nguyen", "Thomas", "Walker", "Harris", "Lee", "Ryan", "Robinson",
    "Kelly", "King", "Davis", "Wright", "Evans", "Roberts", "Green", "Hall", "Wood", "Jackson",
    "Clarke", "Patel", "Khan", "Lewis", "James", "Phillips", "Mitchell", "Chen", "Wang", "Singh",
    "Campbell", "O'Brien",
];

const CITIES: &[&str] = &[
    "Sydney", "Melbourne", "Brisbane", "Perth", "Adelaide", "Hobart", "Darwin", "Canberra",
    "Newcastle", "Wollongong", "Geelong", "Townsville", "Cairns", "Ballarat", "Bendigo",
    "Toowoomba", "Launceston", "Parramatta", "Gold Coast", "Sunshine Coast",
];

const BRANCH_SUFFIXES: &[&str] = &["CBD", "North", "South", "East", "West"];

const STREET_NAMES: &[&str] = &[
    "Main", "High", "Church", "Station", "Victoria", "Elizabeth", "George", "King", "Queen",
    "Collins", "Bourke", "Park", "Railway", "Beach", "Hill", "Bridge", "Market", "Albert",
];

const STREET_SUFFIXES: &[&str] = &["Street", "Road", "Avenue", "Parade", "Lane", "Terrace", "Drive"];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.net", "example.org", "example.com.au"];

const WORDS: &[&str] = &[
    "everyday", "premium", "family", "business", "travel", "rewards", "flexible", "secure",
    "priority", "online", "student", "youth", "offset", "bonus", "goal", "holiday", "renovation",
    "education", "vehicle", "investment", "emergency", "retirement", "wedding", "deposit",
];

/// Pick one element from a non-empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, FIRST_NAMES).to_string()
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, LAST_NAMES).to_string()
}

/// `first.last1234@example.com`, lowercase, apostrophes dropped.
pub fn email<R: Rng + ?Sized>(rng: &mut R, first: &str, last: &str) -> String {
    let local: String = format!("{}.{}", first, last)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect::<String>()
        .to_ascii_lowercase();
    format!(
        "{}{}@{}",
        local,
        rng.random_range(1000..=9999),
        pick(rng, EMAIL_DOMAINS)
    )
}

/// Number of distinct values [`email`] can produce.
pub const EMAIL_SPACE: usize = FIRST_NAMES.len() * LAST_NAMES.len() * 9000 * EMAIL_DOMAINS.len();

/// Australian mobile, `+614` followed by 8 digits.
pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}{:0width$}",
        limits::PHONE_PREFIX,
        rng.random_range(0..100_000_000u32),
        width = limits::PHONE_DIGITS
    )
}

/// `CUST` followed by 6 digits, never starting with zero.
pub fn customer_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}{}",
        limits::CUSTOMER_ID_PREFIX,
        rng.random_range(100_000..=999_999u32)
    )
}

/// Number of distinct values [`customer_id`] can produce.
pub const CUSTOMER_ID_SPACE: usize = 900_000;

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, CITIES).to_string()
}

/// e.g. `Brisbane North`.
pub fn branch<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, CITIES), pick(rng, BRANCH_SUFFIXES))
}

/// e.g. `42 Collins Street`.
pub fn street<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        rng.random_range(1..=999),
        pick(rng, STREET_NAMES),
        pick(rng, STREET_SUFFIXES)
    )
}

/// Domestic address with a state abbreviation and a 4-digit postcode.
pub fn address<R: Rng + ?Sized>(rng: &mut R) -> Address {
    Address {
        street: street(rng),
        city: city(rng),
        state: pick(rng, limits::AUSTRALIAN_STATES).to_string(),
        postcode: format!("{:04}", rng.random_range(200..=9999u32)),
        country: limits::ADDRESS_COUNTRY.to_string(),
    }
}

/// Capitalised sentence of `words` words, ending with a period.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let mut text = (0..words.max(1))
        .map(|_| *pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

pub fn word<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    *pick(rng, WORDS)
}

/// Birth date for an age drawn uniformly from `min_age..=max_age`.
pub fn date_of_birth<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    min_age: u32,
    max_age: u32,
) -> NaiveDate {
    let age = rng.random_range(min_age..=max_age);
    let birthday = years_before(today, age);
    // Anywhere in the year before the birthday keeps the age at `age`.
    birthday
        .checked_sub_days(Days::new(rng.random_range(0..365)))
        .unwrap_or(birthday)
}

/// Same calendar day `years` years earlier; Feb 29 clamps to Feb 28.
pub fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// A day between 1 and `max_days` days after `today`.
pub fn upcoming_date<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, max_days: u64) -> NaiveDate {
    days_after(today, rng.random_range(1..=max_days))
}

pub fn days_after(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// An on-the-hour branch slot.
pub fn slot_time<R: Rng + ?Sized>(rng: &mut R) -> NaiveTime {
    slot_at(rng.random_range(limits::FIRST_SLOT_HOUR..=limits::LAST_SLOT_HOUR))
}

pub fn slot_at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Two-place amount drawn uniformly from `min_cents..=max_cents`.
pub fn amount<R: Rng + ?Sized>(rng: &mut R, min_cents: i64, max_cents: i64) -> Decimal {
    Decimal::new(rng.random_range(min_cents..=max_cents), 2)
}
