//! End-to-end tests for decoding pipeline failures.

use http::StatusCode;
use serde_json::json;
use triage::{
    decode, DecodeError, ErrorCategory, ErrorSource, Normalizer, ParameterRef, ParseError,
    ParseErrorKind, RequestCause, RequestError, RouteError, SchemaError, ValidationFailure,
};

const ENUM_REASON: &str = "JSON value is not one of the allowed values";

fn decode_ok(failure: impl Into<ValidationFailure>) -> triage::NormalizedError {
    decode(&failure.into()).unwrap()
}

#[test]
fn test_method_not_allowed_route() {
    let error = decode_ok(RouteError::method_not_allowed());
    assert_eq!(error.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn test_unknown_route_keeps_reason() {
    let error = decode_ok(RouteError::path_not_found());
    assert_eq!(error.status, StatusCode::NOT_FOUND);
    assert_eq!(error.title, "no matching operation was found");

    let error = decode_ok(RouteError::new("no route for /a/route/that/will/never/exist"));
    assert_eq!(error.status, StatusCode::NOT_FOUND);
    assert_eq!(error.title, "no route for /a/route/that/will/never/exist");
}

#[test]
fn test_invalid_route_sentinel() {
    let error = decode(&ValidationFailure::other("invalid route")).unwrap();
    assert_eq!(error.status, StatusCode::NOT_FOUND);
    assert_eq!(error.title, "not found");
}

#[test]
fn test_missing_content_type() {
    let error = decode_ok(
        RequestError::new()
            .with_request_body()
            .with_reason("header 'Content-Type' has unexpected value: \"\""),
    );
    assert_eq!(error.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error.title, "header 'Content-Type' is required");
}

#[test]
fn test_unsupported_content_type() {
    let error = decode_ok(
        RequestError::new()
            .with_request_body()
            .with_reason("header 'Content-Type' has unexpected value: text/plain"),
    );
    assert_eq!(error.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error.title, "unsupported content type text/plain");
}

#[test]
fn test_missing_required_query_parameter() {
    let error = decode_ok(
        RequestError::new()
            .with_parameter(ParameterRef::query("id"))
            .with_cause(RequestCause::Required),
    );
    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(error.title, "Parameter 'id' in query is required");
}

#[test]
fn test_missing_body() {
    let error = decode_ok(
        RequestError::new()
            .with_request_body()
            .with_cause(RequestCause::Required),
    );
    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert!(error
        .title
        .contains("request body has an error: value is required but missing"));
}

#[test]
fn test_malformed_path_parameter_is_not_found() {
    let error = decode_ok(
        RequestError::new()
            .with_parameter(ParameterRef::path("id"))
            .with_cause(
                ParseError::new(ParseErrorKind::InvalidFormat, "an invalid integer")
                    .with_value(json!("notAnInt")),
            ),
    );
    assert_eq!(error.status, StatusCode::NOT_FOUND);
    assert!(error
        .title
        .contains("Resource not found with 'id' value: notAnInt"));
}

#[test]
fn test_malformed_query_parameter() {
    let error = decode_ok(
        RequestError::new()
            .with_parameter(ParameterRef::query("limit"))
            .with_cause(
                ParseError::new(ParseErrorKind::InvalidFormat, "an invalid integer")
                    .with_value(json!("TEST")),
            ),
    );
    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error.title,
        "Parameter 'limit' in query is invalid: TEST is an invalid integer"
    );
}

#[test]
fn test_undecodable_body() {
    let error = decode_ok(
        RequestError::new()
            .with_request_body()
            .with_cause(ParseError::new(ParseErrorKind::Other, "")),
    );
    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(error.title, "Could not parse request body");
}

#[test]
fn test_missing_body_property() {
    let error = decode_ok(
        RequestError::new().with_request_body().with_cause(
            SchemaError::new("required", "property \"name\" is missing").with_path(["name"]),
        ),
    );
    assert_eq!(error.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error.title, "property \"name\" is missing See /name");
    assert_eq!(error.source, Some(ErrorSource::Pointer("/name".to_string())));
}

#[test]
fn test_wrong_body_type() {
    let error = decode_ok(
        RequestError::new().with_request_body().with_cause(
            SchemaError::new("type", "Field must be set to integer or not be present")
                .with_value(json!("I am a string"))
                .with_path(["age"]),
        ),
    );
    assert_eq!(error.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error
        .title
        .contains("Field must be set to integer or not be present See /age"));
}

#[test]
fn test_enum_violation_detail() {
    let error = decode_ok(
        RequestError::new().with_request_body().with_cause(
            SchemaError::new("enum", ENUM_REASON)
                .with_value(json!("bogus"))
                .with_path(["status"])
                .with_enum([json!("a"), json!("b")]),
        ),
    );
    assert_eq!(
        error.detail.as_deref(),
        Some("Value 'bogus' at /status must be one of: a, b")
    );
}

#[test]
fn test_pointer_keeps_reserved_characters_in_segments() {
    let error = decode_ok(
        RequestError::new().with_request_body().with_cause(
            SchemaError::new("enum", ENUM_REASON)
                .with_value(json!("bogus"))
                .with_path(["a/b", "m~n"])
                .with_enum([json!("a")]),
        ),
    );
    assert_eq!(error.pointer(), Some("/a/b/m~n"));
    assert_eq!(error.title, format!("{} See /a/b/m~n", ENUM_REASON));
    assert_eq!(
        error.detail.as_deref(),
        Some("Value 'bogus' at /a/b/m~n must be one of: a")
    );
}

#[test]
fn test_enum_violation_non_string_literals() {
    let error = decode_ok(
        RequestError::new().with_request_body().with_cause(
            SchemaError::new("enum", ENUM_REASON)
                .with_value(json!(7))
                .with_path(["level"])
                .with_enum([json!(1), json!(2), json!(3)]),
        ),
    );
    assert_eq!(
        error.detail.as_deref(),
        Some("Value '7' at /level must be one of: 1, 2, 3")
    );
}

#[test]
fn test_exploded_form_suggestion() {
    let error = decode_ok(
        RequestError::new()
            .with_parameter(ParameterRef::query("tag"))
            .with_cause(
                SchemaError::new("enum", ENUM_REASON)
                    .with_value(json!("a,b"))
                    .with_path(["tag"])
                    .with_enum([json!("a"), json!("b")]),
            ),
    );
    assert_eq!(error.status, StatusCode::BAD_REQUEST);
    assert_eq!(error.parameter(), Some("tag"));
    assert!(error
        .detail
        .unwrap()
        .contains("perhaps you intended '?tag=a&tag=b'"));
}

#[test]
fn test_schema_failure_without_context_is_unrecognized() {
    let failure: ValidationFailure = RequestError::new()
        .with_cause(SchemaError::new("type", "wrong").with_path(["x"]))
        .into();
    assert!(matches!(
        decode(&failure),
        Err(DecodeError::Unrecognized { .. })
    ));
}

#[test]
fn test_unrecognized_failure() {
    let result = decode(&ValidationFailure::other("connection reset"));
    assert_eq!(
        result,
        Err(DecodeError::Unrecognized {
            message: "connection reset".to_string()
        })
    );
}

#[test]
fn test_decode_is_idempotent() {
    let failure: ValidationFailure = RequestError::new()
        .with_parameter(ParameterRef::query("tag"))
        .with_cause(
            SchemaError::new("enum", ENUM_REASON)
                .with_value(json!("x,y"))
                .with_path(["tag"])
                .with_enum([json!("a")]),
        )
        .into();
    let snapshot = failure.clone();

    let first = decode(&failure);
    let second = decode(&failure);

    assert_eq!(first, second);
    assert_eq!(failure, snapshot);
}

#[test]
fn test_success_invariants_hold() {
    let failures: Vec<ValidationFailure> = vec![
        RouteError::path_not_found().into(),
        RouteError::method_not_allowed().into(),
        RequestError::new()
            .with_reason("header 'Content-Type' has unexpected value: \"\"")
            .into(),
        RequestError::new()
            .with_parameter(ParameterRef::header("X-Id"))
            .with_cause(RequestCause::Required)
            .into(),
        RequestError::new()
            .with_request_body()
            .with_cause(ParseError::default())
            .into(),
    ];

    for failure in &failures {
        let error = decode(failure).unwrap();
        assert!(!error.title.is_empty(), "empty title for {}", failure);
        assert!(error.status.as_u16() != 0);
    }
}

#[test]
fn test_categories_follow_rules() {
    let normalizer = Normalizer::new();
    let category = |failure: ValidationFailure| normalizer.decode_categorized(&failure).unwrap().0;

    assert_eq!(
        category(RouteError::path_not_found().into()),
        ErrorCategory::Routing
    );
    assert_eq!(
        category(
            RequestError::new()
                .with_reason("header 'Content-Type' has unexpected value: text/plain")
                .into()
        ),
        ErrorCategory::ContentType
    );
    assert_eq!(
        category(
            RequestError::new()
                .with_parameter(ParameterRef::query("id"))
                .with_cause(RequestCause::Required)
                .into()
        ),
        ErrorCategory::RequiredField
    );
    assert_eq!(
        category(
            RequestError::new()
                .with_request_body()
                .with_cause(ParseError::default())
                .into()
        ),
        ErrorCategory::FormatConversion
    );
    assert_eq!(
        category(
            RequestError::new()
                .with_request_body()
                .with_cause(SchemaError::new("required", "missing").with_path(["a"]))
                .into()
        ),
        ErrorCategory::SchemaViolation
    );
}

#[test]
fn test_chain_depth_configuration() {
    let mut cause = ParseError::new(ParseErrorKind::InvalidFormat, "an invalid integer")
        .with_value(json!("z"));
    for _ in 0..5 {
        cause = ParseError::new(ParseErrorKind::Other, "").with_cause(cause);
    }
    let failure: ValidationFailure = RequestError::new()
        .with_parameter(ParameterRef::query("n"))
        .with_cause(cause)
        .into();

    let shallow = Normalizer::new().with_max_chain_depth(3);
    assert_eq!(
        shallow.decode(&failure),
        Err(DecodeError::ChainTooDeep { limit: 3 })
    );

    let error = Normalizer::new().decode(&failure).unwrap();
    assert_eq!(
        error.title,
        "Parameter 'n' in query is invalid: z is an invalid integer"
    );
}
