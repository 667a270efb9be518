//! Payload validation against an entity schema.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::{EntityKind, FieldSpec, FieldType};
use crate::validation;

/// A field that fails its schema constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validate payload fields against the kind's schema, relative to today (UTC).
pub fn validate(kind: EntityKind, fields: &Map<String, Value>) -> Vec<Violation> {
    validate_as_of(kind, fields, Utc::now().date_naive())
}

/// Validate payload fields against the kind's schema, relative to `today`.
///
/// Returns one violation per offending field, in schema order, followed by
/// any fields the schema does not define. An empty result means the payload
/// satisfies every constraint.
pub fn validate_as_of(
    kind: EntityKind,
    fields: &Map<String, Value>,
    today: NaiveDate,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for spec in kind.schema() {
        match fields.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    violations.push(Violation::new(spec.name, "missing required field"));
                }
            }
            Some(value) => {
                if let Err(reason) = check_value(spec, value, today) {
                    violations.push(Violation::new(spec.name, reason));
                }
            }
        }
    }

    for name in fields.keys() {
        if kind.field(name).is_none() {
            violations.push(Violation::new(name, "unknown field"));
        }
    }

    violations
}

fn check_value(spec: &FieldSpec, value: &Value, today: NaiveDate) -> Result<(), String> {
    match spec.field_type {
        FieldType::Text { min_len, max_len } => {
            let text = expect_str(value)?;
            let len = text.chars().count();
            if len < min_len || len > max_len {
                return Err(format!(
                    "length {} outside {}..={}",
                    len, min_len, max_len
                ));
            }
            Ok(())
        }
        FieldType::Email => validation::validate_email(expect_str(value)?),
        FieldType::Phone => validation::validate_phone(expect_str(value)?),
        FieldType::CustomerRef => validation::validate_customer_id(expect_str(value)?),
        FieldType::BirthDate { min_age, max_age } => {
            let dob = validation::parse_date(expect_str(value)?)?;
            let age = validation::age_on(dob, today);
            if age < min_age || age > max_age {
                return Err(format!("age {} outside {}..={}", age, min_age, max_age));
            }
            Ok(())
        }
        FieldType::UpcomingDate { max_days_ahead } => {
            let date = validation::parse_date(expect_str(value)?)?;
            let days = (date - today).num_days();
            if days < 1 || days > max_days_ahead {
                return Err(format!(
                    "date is {} days from today, expected 1..={}",
                    days, max_days_ahead
                ));
            }
            Ok(())
        }
        FieldType::SlotTime => validation::parse_slot_time(expect_str(value)?).map(|_| ()),
        FieldType::Enum(members) => {
            let text = expect_str(value)?;
            if !members.contains(&text) {
                return Err(format!("'{}' is not one of {}", text, members.join("/")));
            }
            Ok(())
        }
        FieldType::Amount { .. } => {
            let amount = expect_decimal(value)?;
            let (min, max) = spec
                .amount_bounds()
                .ok_or_else(|| "amount field without bounds".to_string())?;
            if amount.round_dp(2) != amount {
                return Err("more than two decimal places".to_string());
            }
            if amount < min || amount > max {
                return Err(format!("{} outside {}..={}", amount, min, max));
            }
            Ok(())
        }
        FieldType::Months { min, max } => {
            let months = value
                .as_i64()
                .ok_or_else(|| format!("expected integer, got {}", json_type(value)))?;
            if months < min || months > max {
                return Err(format!("{} outside {}..={}", months, min, max));
            }
            Ok(())
        }
        FieldType::Address => check_address(value),
    }
}

/// Every part is required; the first failing part is reported.
fn check_address(value: &Value) -> Result<(), String> {
    let Value::Object(parts) = value else {
        return Err(format!("expected object, got {}", json_type(value)));
    };
    fn part<'a>(parts: &'a Map<String, Value>, name: &str) -> Result<&'a str, String> {
        let value = parts
            .get(name)
            .ok_or_else(|| format!("{} is missing", name))?;
        expect_str(value).map_err(|e| format!("{}: {}", name, e))
    }

    check_length("street", part(parts, "street")?, validation::limits::MAX_STREET_LENGTH)?;
    check_length("city", part(parts, "city")?, validation::limits::MAX_CITY_LENGTH)?;
    validation::validate_state(part(parts, "state")?)?;
    validation::validate_postcode(part(parts, "postcode")?)?;
    if part(parts, "country")? != validation::limits::ADDRESS_COUNTRY {
        return Err(validation::errmsg::COUNTRY_UNSUPPORTED.to_string());
    }

    if let Some(unknown) = parts.keys().find(|k| !ADDRESS_PARTS.contains(&k.as_str())) {
        return Err(format!("unknown address part {}", unknown));
    }
    Ok(())
}

const ADDRESS_PARTS: &[&str] = &["street", "city", "state", "postcode", "country"];

fn check_length(name: &str, text: &str, max_len: usize) -> Result<(), String> {
    let len = text.chars().count();
    if len == 0 || len > max_len {
        return Err(format!("{} length {} outside 1..={}", name, len, max_len));
    }
    Ok(())
}

fn expect_str(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected string, got {}", json_type(value)))
}

/// Read a JSON number as an exact decimal via its shortest text form.
fn expect_decimal(value: &Value) -> Result<Decimal, String> {
    let Value::Number(number) = value else {
        return Err(format!("expected number, got {}", json_type(value)));
    };
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("'{}' is not a decimal amount", text))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn account() -> Map<String, Value> {
        let value = json!({
            "customerId": "CUST123456",
            "accountType": "SAVINGS",
            "currency": "AUD",
            "initialBalance": 1500.25,
            "description": "Everyday savings account",
            "branch": "Sydney CBD"
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn fields_of(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_account() {
        assert!(validate_as_of(EntityKind::Account, &account(), today()).is_empty());
    }

    #[test]
    fn test_optional_branch_may_be_absent() {
        let mut fields = account();
        fields.remove("branch");
        assert!(validate_as_of(EntityKind::Account, &fields, today()).is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let mut fields = account();
        fields.remove("currency");
        let violations = validate_as_of(EntityKind::Account, &fields, today());
        assert_eq!(fields_of(&violations), vec!["currency"]);
        assert_eq!(violations[0].reason, "missing required field");
    }

    #[test]
    fn test_negative_balance() {
        let mut fields = account();
        fields.insert("initialBalance".to_string(), json!(-100.0));
        let violations = validate_as_of(EntityKind::Account, &fields, today());
        assert_eq!(fields_of(&violations), vec!["initialBalance"]);
    }

    #[test]
    fn test_non_numeric_balance() {
        let mut fields = account();
        fields.insert("initialBalance".to_string(), json!("lots"));
        let violations = validate_as_of(EntityKind::Account, &fields, today());
        assert!(violations[0].reason.contains("expected number"));
    }

    #[test]
    fn test_zero_balance_is_inclusive() {
        let mut fields = account();
        fields.insert("initialBalance".to_string(), json!(0.0));
        assert!(validate_as_of(EntityKind::Account, &fields, today()).is_empty());
    }

    #[test]
    fn test_max_balance_is_inclusive() {
        let mut fields = account();
        fields.insert("initialBalance".to_string(), json!(999_999_999.99));
        assert!(validate_as_of(EntityKind::Account, &fields, today()).is_empty());
        fields.insert("initialBalance".to_string(), json!(1_000_000_000.0));
        assert_eq!(
            fields_of(&validate_as_of(EntityKind::Account, &fields, today())),
            vec!["initialBalance"]
        );
    }

    #[test]
    fn test_three_decimal_places_rejected() {
        let mut fields = account();
        fields.insert("initialBalance".to_string(), json!(10.125));
        let violations = validate_as_of(EntityKind::Account, &fields, today());
        assert!(violations[0].reason.contains("decimal places"));
    }

    #[test]
    fn test_out_of_enum_currency() {
        let mut fields = account();
        fields.insert("currency".to_string(), json!("XYZ"));
        let violations = validate_as_of(EntityKind::Account, &fields, today());
        assert_eq!(fields_of(&violations), vec!["currency"]);
    }

    #[test]
    fn test_unknown_field_reported() {
        let mut fields = account();
        fields.insert("productType".to_string(), json!("CONSULTATION"));
        let violations = validate_as_of(EntityKind::Account, &fields, today());
        assert_eq!(fields_of(&violations), vec!["productType"]);
        assert_eq!(violations[0].reason, "unknown field");
    }

    #[test]
    fn test_booking_dates() {
        let booking = |date: &str| {
            let value = json!({
                "customerId": "CUST123456",
                "serviceType": "CONSULTATION",
                "bookingDate": date,
                "bookingTime": "10:00",
                "branch": "Parramatta Branch",
                "notes": ""
            });
            match value {
                Value::Object(map) => map,
                _ => unreachable!(),
            }
        };
        assert!(validate_as_of(EntityKind::Booking, &booking("2026-03-11"), today()).is_empty());
        assert!(validate_as_of(EntityKind::Booking, &booking("2026-06-08"), today()).is_empty());
        assert!(!validate_as_of(EntityKind::Booking, &booking("2026-03-10"), today()).is_empty());
        assert!(!validate_as_of(EntityKind::Booking, &booking("2026-06-09"), today()).is_empty());
    }

    #[test]
    fn test_customer_age_bounds() {
        let customer = |dob: &str| {
            let value = json!({
                "firstName": "Jane",
                "lastName": "Citizen",
                "email": "jane.citizen@example.com",
                "phone": "+61412345678",
                "dob": dob
            });
            match value {
                Value::Object(map) => map,
                _ => unreachable!(),
            }
        };
        assert!(validate_as_of(EntityKind::Customer, &customer("2008-03-10"), today()).is_empty());
        assert!(!validate_as_of(EntityKind::Customer, &customer("2008-03-11"), today()).is_empty());
        assert!(validate_as_of(EntityKind::Customer, &customer("1926-03-10"), today()).is_empty());
        assert!(!validate_as_of(EntityKind::Customer, &customer("1925-03-10"), today()).is_empty());
    }

    #[test]
    fn test_customer_address() {
        let customer = |address: Value| {
            let value = json!({
                "firstName": "Jane",
                "lastName": "Citizen",
                "email": "jane.citizen@example.com",
                "phone": "+61412345678",
                "dob": "1990-01-15",
                "address": address
            });
            match value {
                Value::Object(map) => map,
                _ => unreachable!(),
            }
        };
        let valid = json!({
            "street": "123 Main Street",
            "city": "Melbourne",
            "state": "VIC",
            "postcode": "3000",
            "country": "Australia"
        });
        assert!(validate_as_of(EntityKind::Customer, &customer(valid.clone()), today()).is_empty());

        let mut bad_postcode = valid.clone();
        bad_postcode["postcode"] = json!("ABCD");
        let violations = validate_as_of(EntityKind::Customer, &customer(bad_postcode), today());
        assert_eq!(fields_of(&violations), vec!["address"]);
        assert!(violations[0].reason.contains("postcode"));

        let mut no_state = valid.clone();
        no_state.as_object_mut().unwrap().remove("state");
        let violations = validate_as_of(EntityKind::Customer, &customer(no_state), today());
        assert_eq!(violations[0].reason, "state is missing");

        let mut extra = valid.clone();
        extra["unit"] = json!("4B");
        assert!(!validate_as_of(EntityKind::Customer, &customer(extra), today()).is_empty());

        let violations =
            validate_as_of(EntityKind::Customer, &customer(json!("123 Main Street")), today());
        assert!(violations[0].reason.contains("expected object"));
    }

    #[test]
    fn test_negative_months() {
        let value = json!({
            "customerId": "CUST123456",
            "principal": 5000.0,
            "termMonths": -12,
            "interestRate": 4.5,
            "compoundingFrequency": "MONTHLY",
            "maturityInstructions": "ROLLOVER"
        });
        let Value::Object(fields) = value else {
            unreachable!()
        };
        let violations = validate_as_of(EntityKind::TermDeposit, &fields, today());
        assert_eq!(fields_of(&violations), vec!["termMonths"]);
    }
}
