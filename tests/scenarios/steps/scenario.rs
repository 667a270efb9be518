//! Scenario context step definitions.

use banking_fixtures::{ScenarioContext, ScenarioError, TestConfig};
use cucumber::{given, then, when, World};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Test context for scenario-context scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ScenarioWorld {
    config: TestConfig,
    contexts: Vec<ScenarioContext>,
    response: HeaderMap,
}

impl ScenarioWorld {
    fn new() -> Self {
        Self {
            config: TestConfig::default(),
            contexts: Vec::new(),
            response: HeaderMap::new(),
        }
    }

    fn context(&self) -> &ScenarioContext {
        self.contexts.last().expect("Scenario context not created")
    }

    fn context_mut(&mut self) -> &mut ScenarioContext {
        self.contexts.last_mut().expect("Scenario context not created")
    }

    fn request_headers(&self) -> HeaderMap {
        self.context().request_headers().expect("request headers")
    }

    fn respond_with(&mut self, correlation_id: &str) {
        let name = HeaderName::from_bytes(self.config.correlation_id_header.as_bytes())
            .expect("header name");
        let value = HeaderValue::from_str(correlation_id).expect("header value");
        self.response.insert(name, value);
    }
}

// --- Given steps ---

#[given("a default test configuration")]
async fn given_default_config(world: &mut ScenarioWorld) {
    world.config = TestConfig::default();
    world.config.validate().expect("default config is valid");
}

#[given(expr = "the base URL {string}")]
async fn given_base_url(world: &mut ScenarioWorld, base_url: String) {
    world.config.base_url = base_url;
}

#[given(expr = "the correlation header is {string}")]
async fn given_correlation_header(world: &mut ScenarioWorld, header: String) {
    world.config.correlation_id_header = header;
}

// --- When steps ---

#[when("a scenario context is created")]
async fn when_context_created(world: &mut ScenarioWorld) {
    let ctx = ScenarioContext::new(world.config.clone()).expect("scenario context");
    world.contexts.push(ctx);
}

#[when("two scenario contexts are created")]
async fn when_two_contexts_created(world: &mut ScenarioWorld) {
    for _ in 0..2 {
        let ctx = ScenarioContext::new(world.config.clone()).expect("scenario context");
        world.contexts.push(ctx);
    }
}

#[when("the scenario drops its credentials")]
async fn when_drop_credentials(world: &mut ScenarioWorld) {
    world.context_mut().set_auth_token(None);
}

#[when(expr = "the scenario uses the token {string}")]
async fn when_use_token(world: &mut ScenarioWorld, token: String) {
    world.context_mut().set_auth_token(Some(token));
}

#[when("the response echoes the correlation ID")]
async fn when_response_echoes(world: &mut ScenarioWorld) {
    let id = world.context().correlation_id().to_string();
    world.respond_with(&id);
}

#[when(expr = "the response carries the correlation ID {string}")]
async fn when_response_carries(world: &mut ScenarioWorld, id: String) {
    world.respond_with(&id);
}

// --- Then steps ---

#[then("the correlation ID has the test format")]
async fn then_correlation_format(world: &mut ScenarioWorld) {
    let id = world.context().correlation_id();
    let parts: Vec<&str> = id.split('-').collect();
    assert_eq!(parts.len(), 4, "{}", id);
    assert_eq!(parts[0], "test");
    assert!(parts[1].len() == 8 && parts[1].chars().all(|c| c.is_ascii_digit()));
    assert!(parts[2].len() == 6 && parts[2].chars().all(|c| c.is_ascii_digit()));
    assert!(parts[3].len() == 8 && parts[3].chars().all(|c| c.is_ascii_hexdigit()));
}

#[then("the two correlation IDs differ")]
async fn then_ids_differ(world: &mut ScenarioWorld) {
    let [first, second] = world.contexts.as_slice() else {
        panic!("Expected two contexts");
    };
    assert_ne!(first.correlation_id(), second.correlation_id());
}

#[then(expr = "the request carries header {string} with value {string}")]
async fn then_request_header(world: &mut ScenarioWorld, name: String, value: String) {
    let headers = world.request_headers();
    let actual = headers
        .get(name.as_str())
        .unwrap_or_else(|| panic!("Missing header {}", name));
    assert_eq!(actual, value.as_str());
}

#[then(expr = "the request has no {string} header")]
async fn then_no_request_header(world: &mut ScenarioWorld, name: String) {
    assert!(world.request_headers().get(name.as_str()).is_none());
}

#[then(expr = "the request header {string} carries the correlation ID")]
async fn then_header_carries_correlation(world: &mut ScenarioWorld, name: String) {
    let headers = world.request_headers();
    let actual = headers
        .get(name.as_str())
        .unwrap_or_else(|| panic!("Missing header {}", name));
    assert_eq!(actual, world.context().correlation_id());
}

#[then("correlation verification succeeds")]
async fn then_verification_succeeds(world: &mut ScenarioWorld) {
    world
        .context()
        .verify_correlation(&world.response)
        .expect("correlation verified");
}

#[then("correlation verification fails with a mismatch")]
async fn then_verification_mismatch(world: &mut ScenarioWorld) {
    let result = world.context().verify_correlation(&world.response);
    assert!(matches!(
        result,
        Err(ScenarioError::CorrelationMismatch { .. })
    ));
}

#[then("correlation verification fails with a missing header")]
async fn then_verification_missing(world: &mut ScenarioWorld) {
    let result = world.context().verify_correlation(&world.response);
    assert!(matches!(
        result,
        Err(ScenarioError::CorrelationMissing { .. })
    ));
}

#[then(expr = "the endpoint for {string} is {string}")]
async fn then_endpoint(world: &mut ScenarioWorld, resource: String, expected: String) {
    assert_eq!(world.context().endpoint(&resource), expected);
}
