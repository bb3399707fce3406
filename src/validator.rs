//! Request validation.
//!
//! Payloads go through four steps: deserialize (with coercion), normalize,
//! per-field rules, cross-field refinements. Any failure becomes a 400 with
//! one `{ field, message }` entry per offending field. Field paths use the
//! camelCase names clients send.
//!
//! A JSON body that fails to deserialize is repaired field by field with
//! placeholder values so the per-field rules still run on everything else.
//! Placeholder fields only ever report their deserialization error, and
//! refinements are skipped for such a body.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};
use officehub_core::{AppError, FieldError};
use officehub_models::{ObjectId, Schema};
use serde_json::{Map, Value, json};
use validator::ValidationErrors;

const BODY_FIELD: &str = "body";
const QUERY_FIELD: &str = "query";

/// Upper bound on deserialize-and-repair rounds for one body.
const MAX_REPAIRS: usize = 32;

/// JSON body extractor that runs the full [`Schema`] pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Schema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(vec![json_rejection_error(&rejection)]))?;

        check_value(body)
            .map(ValidatedJson)
            .map_err(AppError::validation)
    }
}

/// Query-string extractor that runs the full [`Schema`] pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: Schema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(vec![query_rejection_error(&rejection)]))?;

        check(value).map(ValidatedQuery).map_err(AppError::validation)
    }
}

/// `{id}` path segment parsed as an [`ObjectId`].
#[derive(Debug, Clone)]
pub struct PathId(pub ObjectId);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_id())?;

        parse_path_id(&raw).map(PathId)
    }
}

fn invalid_id() -> AppError {
    AppError::field("id", "id must be a 24-character hexadecimal id")
}

pub fn parse_path_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse(raw).map_err(|_| invalid_id())
}

/// Converts an id that already passed schema validation.
pub fn to_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse(raw).map_err(AppError::bad_request)
}

/// Validates a raw JSON payload without an HTTP request.
pub fn validate_payload<T: Schema>(bytes: &[u8]) -> Result<T, Vec<FieldError>> {
    let Json(body) = Json::<Value>::from_bytes(bytes)
        .map_err(|rejection| vec![json_rejection_error(&rejection)])?;
    check_value(body)
}

/// Deserializes and validates a parsed JSON body, reporting every bad field.
pub fn check_value<T: Schema>(mut body: Value) -> Result<T, Vec<FieldError>> {
    let mut errors: Vec<FieldError> = Vec::new();
    let mut tried: HashMap<String, usize> = HashMap::new();

    let mut parsed = None;
    for _ in 0..MAX_REPAIRS {
        let rejection = match Json::<T>::from_bytes(body.to_string().as_bytes()) {
            Ok(Json(value)) => {
                parsed = Some(value);
                break;
            }
            Err(rejection) => rejection,
        };
        if !matches!(rejection, JsonRejection::JsonDataError(_)) {
            return Err(vec![json_rejection_error(&rejection)]);
        }

        let issue = DataIssue::parse(&rejection.body_text(), BODY_FIELD);
        let field = issue.error.field.clone();
        if !errors.iter().any(|e| e.field == field) {
            errors.push(issue.error.clone());
        }

        let attempt = tried.entry(field).or_default();
        let Some(placeholder) = issue.placeholder(*attempt) else {
            break;
        };
        *attempt += 1;
        if !issue.repairable || !set_path(&mut body, &issue.error.field, placeholder) {
            break;
        }
    }

    if errors.is_empty() {
        return match parsed {
            Some(value) => check(value),
            None => Err(vec![FieldError::new(BODY_FIELD, "Request body could not be read")]),
        };
    }

    if let Some(mut value) = parsed {
        value.normalize();
        if let Err(rule_errors) = value.validate() {
            for error in field_errors(&rule_errors) {
                let root = root_segment(&error.field);
                if !errors.iter().any(|e| root_segment(&e.field) == root) {
                    errors.push(error);
                }
            }
        }
    }

    errors.sort_by(|a, b| a.field.cmp(&b.field));
    Err(errors)
}

/// `memberIds[1]` and `address.city` -> `memberIds`, `address`.
fn root_segment(field: &str) -> &str {
    field
        .split(['.', '['])
        .next()
        .unwrap_or(field)
}

enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn parse_segments(path: &str) -> Option<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (key, mut rest) = match part.find('[') {
            Some(index) => part.split_at(index),
            None => (part, ""),
        };
        if !key.is_empty() {
            segments.push(Segment::Key(key));
        }
        while let Some(inner) = rest.strip_prefix('[') {
            let (index, tail) = inner.split_once(']')?;
            segments.push(Segment::Index(index.parse().ok()?));
            rest = tail;
        }
        if !rest.is_empty() {
            return None;
        }
    }
    (!segments.is_empty()).then_some(segments)
}

/// Writes `replacement` at `path`, creating the final object key if missing.
fn set_path(body: &mut Value, path: &str, replacement: Value) -> bool {
    let Some(segments) = parse_segments(path) else {
        return false;
    };
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut slot = body;
    for segment in parents {
        let next = match (segment, slot) {
            (Segment::Key(key), Value::Object(map)) => map.get_mut(*key),
            (Segment::Index(index), Value::Array(items)) => items.get_mut(*index),
            _ => None,
        };
        match next {
            Some(value) => slot = value,
            None => return false,
        }
    }

    match (last, slot) {
        (Segment::Key(key), Value::Object(map)) => {
            map.insert((*key).to_string(), replacement);
            true
        }
        (Segment::Index(index), Value::Array(items)) => match items.get_mut(*index) {
            Some(item) => {
                *item = replacement;
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Normalize, per-field rules, then refinements (only if the fields passed).
pub fn check<T: Schema>(mut value: T) -> Result<T, Vec<FieldError>> {
    value.normalize();
    value.validate().map_err(|errors| field_errors(&errors))?;
    value.refine().map_err(|errors| field_errors(&errors))?;
    Ok(value)
}

/// One entry per field, first violated rule wins, sorted by field.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, errors)| {
            let field = to_camel_case(field);
            let error = errors.first()?;
            let message = match error.message.as_deref() {
                Some(message) => with_field(&field, message),
                None => format!("{field} is invalid"),
            };
            Some(FieldError::new(field, message))
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// `expected_end_date` -> `expectedEndDate`.
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Prefixes bare `must ...` messages with the field name.
fn with_field(field: &str, message: &str) -> String {
    if message.starts_with("must ") {
        format!("{field} {message}")
    } else {
        message.to_string()
    }
}

fn json_rejection_error(rejection: &JsonRejection) -> FieldError {
    match rejection {
        JsonRejection::JsonDataError(_) => {
            describe_data_error(&rejection.body_text(), BODY_FIELD)
        }
        JsonRejection::JsonSyntaxError(_) => {
            FieldError::new(BODY_FIELD, "Request body must be valid JSON")
        }
        JsonRejection::MissingJsonContentType(_) => FieldError::new(
            BODY_FIELD,
            "Content-Type must be application/json",
        ),
        _ => FieldError::new(BODY_FIELD, "Request body could not be read"),
    }
}

fn query_rejection_error(rejection: &QueryRejection) -> FieldError {
    describe_data_error(&rejection.body_text(), QUERY_FIELD)
}

/// Turns a serde error description into a field error.
fn describe_data_error(text: &str, fallback_field: &str) -> FieldError {
    DataIssue::parse(text, fallback_field).error
}

/// A deserialization failure located in the payload.
struct DataIssue {
    error: FieldError,
    /// The failure names a field that can be overwritten.
    repairable: bool,
    /// First allowed variant, for unknown enum values.
    variant: Option<String>,
}

impl DataIssue {
    /// Parses the `path: message at line L column C` shape produced by the
    /// JSON and query extractors.
    fn parse(text: &str, fallback_field: &str) -> Self {
        let detail = match text.split_once(": ") {
            Some((prefix, rest)) if prefix.starts_with("Failed to deserialize") => rest,
            _ => text,
        };
        let detail = match detail.rfind(" at line ") {
            Some(index) => &detail[..index],
            None => detail,
        };

        let (path, message) = match detail.split_once(": ") {
            Some((path, rest)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
                (Some(path), rest)
            }
            _ => (None, detail),
        };

        if let Some(name) = between_backticks(message, "missing field `") {
            let field = match path {
                Some(path) => format!("{path}.{name}"),
                None => name.to_string(),
            };
            let message = format!("{field} is required");
            return Self {
                error: FieldError::new(field, message),
                repairable: true,
                variant: None,
            };
        }

        let field = path.unwrap_or(fallback_field).to_string();
        let mut variant = None;

        let message = if message.starts_with("unknown variant") {
            match message.split_once("expected ") {
                Some((_, expected)) => {
                    let options = expected
                        .trim_start_matches("one of ")
                        .replace(" or ", ", ")
                        .replace('`', "");
                    variant = options
                        .split(", ")
                        .next()
                        .filter(|option| !option.is_empty())
                        .map(str::to_string);
                    format!("{field} must be one of: {options}")
                }
                None => format!("{field} has an invalid value"),
            }
        } else if message.starts_with("invalid type") {
            format!("{field} has an invalid type")
        } else if message.starts_with("invalid value") || message.starts_with("invalid length") {
            format!("{field} has an invalid value")
        } else if message.starts_with("must ") {
            format!("{field} {message}")
        } else {
            format!("{field} is invalid")
        };

        Self {
            error: FieldError::new(field, message),
            repairable: path.is_some(),
            variant,
        }
    }

    /// The `attempt`-th stand-in value to try for the failing field.
    fn placeholder(&self, attempt: usize) -> Option<Value> {
        if let Some(variant) = &self.variant {
            return Some(Value::String(variant.clone()));
        }
        let candidates = [
            Value::Null,
            json!(""),
            json!(0),
            json!(false),
            json!("1970-01-01"),
            json!("000000000000000000000000"),
            json!([]),
            Value::Object(Map::new()),
        ];
        candidates.into_iter().nth(attempt)
    }
}

fn between_backticks<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(prefix)?;
    rest.split('`').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use officehub_models::{CreateProjectRequest, CreateWorkLogRequest, RegisterRequest};

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("expected_end_date"), "expectedEndDate");
        assert_eq!(to_camel_case("name"), "name");
        assert_eq!(to_camel_case("expectedEndDate"), "expectedEndDate");
    }

    #[test]
    fn test_describe_missing_field() {
        let error = describe_data_error(
            "Failed to deserialize the JSON body into the target type: missing field `email` at line 1 column 20",
            BODY_FIELD,
        );
        assert_eq!(error, FieldError::new("email", "email is required"));
    }

    #[test]
    fn test_describe_unknown_variant() {
        let error = describe_data_error(
            "Failed to deserialize the JSON body into the target type: status: unknown variant `Done`, expected one of `Planned`, `Active`, `OnHold` at line 1 column 30",
            BODY_FIELD,
        );
        assert_eq!(error.field, "status");
        assert_eq!(error.message, "status must be one of: Planned, Active, OnHold");
    }

    #[test]
    fn test_describe_custom_coercion_error() {
        let error = describe_data_error(
            "Failed to deserialize the JSON body into the target type: hours: must be a number at line 1 column 15",
            BODY_FIELD,
        );
        assert_eq!(error, FieldError::new("hours", "hours must be a number"));
    }

    #[test]
    fn test_payload_missing_single_field() {
        let errors = validate_payload::<RegisterRequest>(
            br#"{"name":"Ada Obi","password":"s3cretPass"}"#,
        )
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_payload_missing_field_does_not_hide_other_errors() {
        let errors =
            validate_payload::<RegisterRequest>(br#"{"name":"A","password":"short"}"#)
                .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
        assert_eq!(errors[0].message, "email is required");
    }

    #[test]
    fn test_empty_payload_reports_every_required_field() {
        let errors = validate_payload::<RegisterRequest>(b"{}").unwrap_err();

        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["email is required", "name is required", "password is required"]
        );
    }

    #[test]
    fn test_type_errors_are_reported_alongside_rule_errors() {
        let errors = validate_payload::<CreateWorkLogRequest>(
            br#"{"date":"2024-05-06","hours":"lots","description":""}"#,
        )
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["description", "hours"]);
        assert_eq!(errors[1].message, "hours must be a number");
    }

    #[test]
    fn test_non_object_body_is_a_single_error() {
        let errors = validate_payload::<RegisterRequest>(b"[1, 2]").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, BODY_FIELD);
    }

    #[test]
    fn test_set_path_writes_nested_slots() {
        let mut body = serde_json::json!({ "memberIds": ["a", "b"], "meta": {} });
        assert!(set_path(&mut body, "memberIds[1]", Value::Null));
        assert!(set_path(&mut body, "meta.owner", serde_json::json!("x")));
        assert!(!set_path(&mut body, "missing.key", Value::Null));
        assert_eq!(
            body,
            serde_json::json!({ "memberIds": ["a", null], "meta": { "owner": "x" } })
        );
    }

    #[test]
    fn test_payload_invalid_fields_are_listed_once_each() {
        let errors = validate_payload::<RegisterRequest>(
            br#"{"name":"A","email":"nope","password":"short"}"#,
        )
        .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
    }

    #[test]
    fn test_refinement_runs_after_field_checks() {
        // The name is invalid, so the date refinement is not reported.
        let errors = validate_payload::<CreateProjectRequest>(
            br#"{"name":"X","startDate":"2024-03-10","expectedEndDate":"2024-03-01"}"#,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");

        let errors = validate_payload::<CreateProjectRequest>(
            br#"{"name":"Payroll","startDate":"2024-03-10","expectedEndDate":"2024-03-01"}"#,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "expectedEndDate");
        assert!(errors[0].message.contains("on or after start date"));
    }

    #[test]
    fn test_equal_dates_pass_refinement() {
        let project = validate_payload::<CreateProjectRequest>(
            br#"{"name":"Payroll","startDate":"2024-03-10","expectedEndDate":"2024-03-10"}"#,
        )
        .unwrap();
        assert_eq!(project.start_date, project.expected_end_date.unwrap());
    }

    #[test]
    fn test_numeric_string_coercion() {
        let log = validate_payload::<CreateWorkLogRequest>(
            br#"{"date":"2024-05-06","hours":"2.5","description":"Sprint planning"}"#,
        )
        .unwrap();
        assert_eq!(log.hours, 2.5);

        let errors = validate_payload::<CreateWorkLogRequest>(
            br#"{"date":"2024-05-06","hours":"lots","description":"Sprint planning"}"#,
        )
        .unwrap_err();
        assert_eq!(errors[0].field, "hours");
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let first = validate_payload::<RegisterRequest>(
            br#"{"name":"  Ada Obi ","email":" ADA@Company.com","password":"s3cretPass","phone":" +2348031234567 "}"#,
        )
        .unwrap();

        let bytes = serde_json::to_vec(&first).unwrap();
        let second = validate_payload::<RegisterRequest>(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_path_id() {
        assert!(parse_path_id("65f1c0ffee0000000000abcd").is_ok());
        let err = parse_path_id("123").unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.field_errors[0].field, "id");
    }
}
