//! Fixture generator step definitions.

use std::collections::HashSet;

use banking_fixtures::records::codec::amount;
use banking_fixtures::records::{Booking, Payload, Record};
use banking_fixtures::{
    Boundary, DataGenerator, EntityKind, GeneratorError, Mode, PerformanceFixture, Preset,
};
use cucumber::{given, then, when, World};
use http::StatusCode;
use rust_decimal::Decimal;

/// Test context for generator scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct GeneratorWorld {
    generator: DataGenerator,
    mode: Option<Mode>,
    records: Vec<Payload>,
    batch: Vec<Payload>,
    fixtures: Vec<PerformanceFixture>,
    bookings: Option<(Booking, Booking)>,
    last_error: Option<GeneratorError>,
}

impl GeneratorWorld {
    fn new() -> Self {
        Self {
            generator: DataGenerator::new(),
            mode: None,
            records: Vec::new(),
            batch: Vec::new(),
            fixtures: Vec::new(),
            bookings: None,
            last_error: None,
        }
    }

    fn generate(&mut self, kind: &str, mode: Mode) {
        let result = kind
            .parse::<EntityKind>()
            .and_then(|kind| self.generator.generate(kind, &mode));
        self.mode = Some(mode);
        match result {
            Ok(payload) => self.records.push(payload),
            Err(e) => self.last_error = Some(e),
        }
    }

    fn record(&self) -> &Payload {
        self.records
            .last()
            .unwrap_or_else(|| panic!("No record generated: {:?}", self.last_error))
    }

    fn amount(&self, field: &str) -> Decimal {
        let raw = self
            .record()
            .get(field)
            .and_then(|v| v.as_f64())
            .unwrap_or_else(|| panic!("{} is not a number", field));
        amount::from_f64(raw).expect("amount should parse")
    }

    fn violating_fields(&self) -> Vec<String> {
        self.record()
            .violations()
            .into_iter()
            .map(|v| v.field)
            .collect()
    }
}

// --- Background ---

#[given("a fixture generator")]
async fn given_fixture_generator(world: &mut GeneratorWorld) {
    world.generator = DataGenerator::new();
}

// --- When steps ---

#[when(expr = "I generate a {word} record in valid mode")]
async fn when_generate_valid(world: &mut GeneratorWorld, kind: String) {
    world.generate(&kind, Mode::Valid);
}

#[when(expr = "I generate another {word} record in valid mode")]
async fn when_generate_another_valid(world: &mut GeneratorWorld, kind: String) {
    world.generate(&kind, Mode::Valid);
}

#[when(expr = "I generate a {word} record at the {word} boundary")]
async fn when_generate_boundary(world: &mut GeneratorWorld, kind: String, variant: String) {
    let boundary: Boundary = variant.parse().expect("boundary variant");
    world.generate(&kind, Mode::Boundary(boundary));
}

#[when(expr = "I generate a {word} record with {string} corrupted")]
async fn when_generate_invalid(world: &mut GeneratorWorld, kind: String, field: String) {
    world.generate(&kind, Mode::Invalid(field));
}

#[when(expr = "I generate a batch of {int} {word} records")]
async fn when_generate_batch(world: &mut GeneratorWorld, count: usize, kind: String) {
    let kind: EntityKind = kind.parse().expect("entity kind");
    match world.generator.generate_batch(kind, count) {
        Ok(batch) => world.batch = batch,
        Err(e) => world.last_error = Some(e),
    }
}

#[when(expr = "I generate {int} performance fixtures")]
async fn when_generate_performance_fixtures(world: &mut GeneratorWorld, count: usize) {
    world.fixtures = world
        .generator
        .performance_fixtures(count)
        .expect("performance fixtures");
}

#[when("I generate a pair of conflicting bookings")]
async fn when_generate_conflicting_bookings(world: &mut GeneratorWorld) {
    world.bookings = Some(world.generator.conflicting_bookings());
}

#[when(expr = "I generate the preset {string}")]
async fn when_generate_preset(world: &mut GeneratorWorld, name: String) {
    let preset: Preset = name.parse().expect("preset name");
    let payload = world.generator.preset(preset).expect("preset payload");
    world.mode = Some(preset.mode());
    world.records.push(payload);
}

// --- Then steps ---

#[then("the record passes schema validation")]
async fn then_record_valid(world: &mut GeneratorWorld) {
    let violations = world.record().violations();
    assert!(violations.is_empty(), "Unexpected violations: {:?}", violations);
}

#[then("every required field is populated")]
async fn then_required_fields_populated(world: &mut GeneratorWorld) {
    let record = world.record();
    for spec in record.kind().schema().iter().filter(|s| s.required) {
        let value = record.get(spec.name);
        assert!(
            value.is_some_and(|v| !v.is_null()),
            "{} is not populated",
            spec.name
        );
    }
}

#[then("no field is null")]
async fn then_no_null_fields(world: &mut GeneratorWorld) {
    let record = world.record();
    for spec in record.kind().schema() {
        let value = record.get(spec.name);
        assert!(value.is_some_and(|v| !v.is_null()), "{} is null", spec.name);
    }
}

#[then(expr = "the field {string} is one of {string}")]
async fn then_field_one_of(world: &mut GeneratorWorld, field: String, allowed: String) {
    let value = world.record().get_str(&field).expect("string field");
    assert!(
        allowed.split(',').any(|a| a == value),
        "{} = {} not in {}",
        field,
        value,
        allowed
    );
}

#[then(expr = "the amount {string} is not negative")]
async fn then_amount_not_negative(world: &mut GeneratorWorld, field: String) {
    assert!(world.amount(&field) >= Decimal::ZERO);
}

#[then(expr = "the amount {string} is negative")]
async fn then_amount_negative(world: &mut GeneratorWorld, field: String) {
    assert!(world.amount(&field) < Decimal::ZERO);
}

#[then(expr = "the amount {string} equals {float}")]
async fn then_amount_equals(world: &mut GeneratorWorld, field: String, expected: f64) {
    let expected = amount::from_f64(expected).expect("expected amount");
    assert_eq!(world.amount(&field), expected);
}

#[then(expr = "the text {string} has {int} characters")]
async fn then_text_length(world: &mut GeneratorWorld, field: String, length: usize) {
    let text = world.record().get_str(&field).expect("text field");
    assert_eq!(text.chars().count(), length);
}

#[then(expr = "the record has a field {string}")]
async fn then_has_field(world: &mut GeneratorWorld, field: String) {
    assert!(world.record().get(&field).is_some());
}

#[then(expr = "the record has no field {string}")]
async fn then_has_no_field(world: &mut GeneratorWorld, field: String) {
    assert!(world.record().get(&field).is_none());
}

#[then("both records have the same fields")]
async fn then_same_fields(world: &mut GeneratorWorld) {
    let [.., first, second] = world.records.as_slice() else {
        panic!("Expected two records");
    };
    assert_eq!(first.field_names(), second.field_names());
}

#[then(expr = "only the field {string} violates the schema")]
async fn then_only_field_violates(world: &mut GeneratorWorld, field: String) {
    assert_eq!(world.violating_fields(), vec![field]);
}

#[then(expr = "the field {string} is valid")]
async fn then_field_valid(world: &mut GeneratorWorld, field: String) {
    assert!(!world.violating_fields().contains(&field));
}

#[then(expr = "a response with status {int} matches the expected outcome")]
async fn then_status_matches(world: &mut GeneratorWorld, status: u16) {
    let status = StatusCode::from_u16(status).expect("status code");
    let mode = world.mode.as_ref().expect("mode");
    assert!(mode.expected_outcome().accepts(status));
}

#[then(expr = "a response with status {int} does not match the expected outcome")]
async fn then_status_does_not_match(world: &mut GeneratorWorld, status: u16) {
    let status = StatusCode::from_u16(status).expect("status code");
    let mode = world.mode.as_ref().expect("mode");
    assert!(!mode.expected_outcome().accepts(status));
}

#[then("generation fails with an unknown field error")]
async fn then_unknown_field_error(world: &mut GeneratorWorld) {
    assert!(matches!(
        world.last_error,
        Some(GeneratorError::UnknownField { .. })
    ));
}

#[then("generation fails with an unknown entity kind error")]
async fn then_unknown_kind_error(world: &mut GeneratorWorld) {
    assert!(matches!(
        world.last_error,
        Some(GeneratorError::UnknownEntityKind(_))
    ));
}

#[then("generation fails with a batch too large error")]
async fn then_batch_too_large(world: &mut GeneratorWorld) {
    assert!(matches!(
        world.last_error,
        Some(GeneratorError::BatchTooLarge { .. })
    ));
    assert!(world.batch.is_empty());
}

#[then(expr = "the batch contains {int} records")]
async fn then_batch_size(world: &mut GeneratorWorld, count: usize) {
    assert!(world.last_error.is_none(), "{:?}", world.last_error);
    assert_eq!(world.batch.len(), count);
}

#[then(expr = "the batch has {int} distinct values for {string}")]
async fn then_batch_distinct(world: &mut GeneratorWorld, count: usize, field: String) {
    let values: HashSet<&str> = world
        .batch
        .iter()
        .map(|p| p.get_str(&field).expect("string field"))
        .collect();
    assert_eq!(values.len(), count);
}

#[then("every record in the batch passes schema validation")]
async fn then_batch_valid(world: &mut GeneratorWorld) {
    for payload in &world.batch {
        assert!(payload.is_valid(), "{:?}", payload.violations());
    }
}

#[then(expr = "{int} performance fixtures are produced")]
async fn then_fixture_count(world: &mut GeneratorWorld, count: usize) {
    assert_eq!(world.fixtures.len(), count);
}

#[then("every performance fixture has a correlation ID")]
async fn then_fixtures_have_correlation_ids(world: &mut GeneratorWorld) {
    let ids: HashSet<&str> = world
        .fixtures
        .iter()
        .map(|f| f.correlation_id.as_str())
        .collect();
    assert_eq!(ids.len(), world.fixtures.len());
    assert!(ids.iter().all(|id| id.starts_with("test-")));
}

#[then("both bookings occupy the same slot")]
async fn then_bookings_conflict(world: &mut GeneratorWorld) {
    let (first, second) = world.bookings.as_ref().expect("bookings");
    assert!(first.conflicts_with(second));
    for booking in [first, second] {
        let payload = Record::Booking(booking.clone())
            .to_payload()
            .expect("booking payload");
        assert!(payload.is_valid(), "{:?}", payload.violations());
    }
}

#[then(expr = "the record is a {word} record")]
async fn then_record_kind(world: &mut GeneratorWorld, kind: String) {
    let kind: EntityKind = kind.parse().expect("entity kind");
    assert_eq!(world.record().kind(), kind);
}
