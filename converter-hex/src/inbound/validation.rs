//! Request validation for the two endpoints.
//!
//! Each endpoint has a validator that either yields the typed request or a
//! `ValidationErrors` map (field name → messages). Validators never touch the
//! store, so a rejected request leaves it unchanged.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use converter_types::{
    ConvertRequest, CurrencyCode, DomainError, InsertRequest, Rate, ValidationErrors,
};

pub const MISSING_FIELD: &str = "Missing data for required field.";
pub const NOT_A_NUMBER: &str = "Not a valid number.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer.";
pub const SPECIAL_NUMBER: &str = "Special numeric values (nan or infinity) are not permitted.";
pub const MERGE_NOT_ALLOWED: &str = "Must be one of: 0, 1.";
pub const NOT_A_MAPPING: &str = "Not a valid mapping type.";
pub const NULL_VALUE: &str = "Field may not be null.";
pub const INVALID_INPUT: &str = "Invalid input type.";
pub const NON_POSITIVE_RATE: &str = "Only positive not null values could be currency rates.";

/// Query parameters as received.
pub type Params = HashMap<String, String>;

// ─────────────────────────────────────────────────────────────────────────────
// Coercion rules
// ─────────────────────────────────────────────────────────────────────────────

/// Parses a decimal, integer or exponent-form number. Rejects nan/inf.
fn coerce_number(raw: &str) -> Result<f64, &'static str> {
    let value: f64 = raw.trim().parse().map_err(|_| NOT_A_NUMBER)?;
    if !value.is_finite() {
        return Err(SPECIAL_NUMBER);
    }
    Ok(value)
}

fn coerce_integer(raw: &str) -> Result<i64, &'static str> {
    raw.trim().parse().map_err(|_| NOT_AN_INTEGER)
}

fn coerce_json_number(value: &Value) -> Result<f64, &'static str> {
    match value {
        Value::Null => Err(NULL_VALUE),
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or(SPECIAL_NUMBER),
        Value::String(s) => coerce_number(s),
        _ => Err(NOT_A_NUMBER),
    }
}

fn check_rate(value: f64) -> Result<Rate, &'static str> {
    Rate::new(value).map_err(|err| match err {
        DomainError::NonFiniteRate => SPECIAL_NUMBER,
        DomainError::NonPositiveRate(_) | DomainError::InvalidRate(_) => NON_POSITIVE_RATE,
    })
}

fn check_merge_flag(value: i64) -> Result<bool, &'static str> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(MERGE_NOT_ALLOWED),
    }
}

/// Looks up a required query parameter and runs `coerce` on it, recording
/// the failure under `field`.
fn required_param<T>(
    params: &Params,
    field: &str,
    coerce: impl FnOnce(&str) -> Result<T, &'static str>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let Some(raw) = params.get(field) else {
        errors.add(field, MISSING_FIELD);
        return None;
    };
    match coerce(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Endpoint validators
// ─────────────────────────────────────────────────────────────────────────────

/// Validates `GET /convert/` query parameters.
pub fn validate_convert_query(params: &Params) -> Result<ConvertRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let from = required_param(params, "from", |s| Ok(CurrencyCode::new(s)), &mut errors);
    let to = required_param(params, "to", |s| Ok(CurrencyCode::new(s)), &mut errors);
    let amount = required_param(params, "amount", coerce_number, &mut errors);

    match (from, to, amount) {
        (Some(from), Some(to), Some(amount)) if errors.is_empty() => {
            Ok(ConvertRequest { from, to, amount })
        }
        _ => Err(errors),
    }
}

/// Validates the `merge` query parameter of `POST /database/`.
pub fn validate_insert_query(params: &Params) -> Result<bool, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let merge = required_param(
        params,
        "merge",
        |s| coerce_integer(s).and_then(check_merge_flag),
        &mut errors,
    );
    match merge {
        Some(merge) => Ok(merge),
        None => Err(errors),
    }
}

/// Validates the JSON body of `POST /database/`.
///
/// `None` stands for an empty body and is reported as a missing field.
pub fn validate_insert_body(
    body: Option<&Value>,
) -> Result<BTreeMap<CurrencyCode, Rate>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let object = match body {
        None => {
            errors.add("currencies", MISSING_FIELD);
            return Err(errors);
        }
        Some(Value::Object(object)) => object,
        Some(_) => {
            errors.add("_schema", INVALID_INPUT);
            return Err(errors);
        }
    };

    let currencies = match object.get("currencies") {
        None => {
            errors.add("currencies", MISSING_FIELD);
            return Err(errors);
        }
        Some(Value::Null) => {
            errors.add("currencies", NULL_VALUE);
            return Err(errors);
        }
        Some(Value::Object(currencies)) => currencies,
        Some(_) => {
            errors.add("currencies", NOT_A_MAPPING);
            return Err(errors);
        }
    };

    // Document order; a later key that differs only in case overwrites.
    let mut rates = BTreeMap::new();
    for (code, value) in currencies {
        match coerce_json_number(value).and_then(check_rate) {
            Ok(rate) => {
                rates.insert(CurrencyCode::new(code), rate);
            }
            Err(message) => errors.add_nested("currencies", code.as_str(), "value", message),
        }
    }

    errors.into_result(rates)
}

/// Validates query and body of `POST /database/` together, reporting the
/// failures of both in one map.
pub fn validate_insert(
    params: &Params,
    body: Option<&Value>,
) -> Result<InsertRequest, ValidationErrors> {
    match (validate_insert_query(params), validate_insert_body(body)) {
        (Ok(merge), Ok(currencies)) => Ok(InsertRequest { currencies, merge }),
        (Err(mut errors), Err(body_errors)) => {
            errors.merge(body_errors);
            Err(errors)
        }
        (Err(errors), Ok(_)) | (Ok(_), Err(errors)) => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_types::FieldErrors;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn messages(errors: &ValidationErrors, field: &str) -> Vec<String> {
        match errors.get(field) {
            Some(FieldErrors::Messages(messages)) => messages.clone(),
            other => panic!("expected messages for {field}, got {other:?}"),
        }
    }

    fn rate_messages(errors: &ValidationErrors, code: &str) -> Vec<String> {
        let Some(FieldErrors::Nested(codes)) = errors.get("currencies") else {
            panic!("expected nested currencies errors");
        };
        let Some(FieldErrors::Nested(fields)) = codes.get(code) else {
            panic!("expected errors for {code}");
        };
        match fields.get("value") {
            Some(FieldErrors::Messages(messages)) => messages.clone(),
            other => panic!("expected value messages, got {other:?}"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Convert
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_convert_query_valid() {
        let req = validate_convert_query(&params(&[
            ("from", "rub"),
            ("to", "Usd"),
            ("amount", "180"),
        ]))
        .unwrap();

        assert_eq!(req.from.as_str(), "RUB");
        assert_eq!(req.to.as_str(), "USD");
        assert_eq!(req.amount, 180.0);
    }

    #[test]
    fn test_convert_query_accepts_decimals_negatives_and_exponents() {
        for (raw, expected) in [("2.5", 2.5), ("-3", -3.0), ("0", 0.0), ("1e3", 1000.0), (" 7 ", 7.0)] {
            let req = validate_convert_query(&params(&[("from", "a"), ("to", "b"), ("amount", raw)]))
                .unwrap();
            assert_eq!(req.amount, expected);
        }
    }

    #[test]
    fn test_convert_query_reports_exactly_the_missing_fields() {
        let cases: [&[(&str, &str)]; 6] = [
            &[("from", "a")],
            &[("from", "a"), ("to", "b")],
            &[("from", "a"), ("amount", "1")],
            &[("to", "a")],
            &[("to", "a"), ("amount", "1")],
            &[("amount", "1")],
        ];

        for case in cases {
            let errors = validate_convert_query(&params(case)).unwrap_err();
            let expected: Vec<&str> = ["amount", "from", "to"]
                .into_iter()
                .filter(|field| !case.iter().any(|(k, _)| k == field))
                .collect();

            assert_eq!(errors.fields().collect::<Vec<_>>(), expected);
            for field in expected {
                assert_eq!(messages(&errors, field), vec![MISSING_FIELD]);
            }
        }
    }

    #[test]
    fn test_convert_query_rejects_non_numeric_amount() {
        let errors =
            validate_convert_query(&params(&[("from", "a"), ("to", "b"), ("amount", "TEST")]))
                .unwrap_err();
        assert_eq!(messages(&errors, "amount"), vec![NOT_A_NUMBER]);
    }

    #[test]
    fn test_convert_query_rejects_special_numbers() {
        for raw in ["nan", "inf", "-Infinity"] {
            let errors =
                validate_convert_query(&params(&[("from", "a"), ("to", "b"), ("amount", raw)]))
                    .unwrap_err();
            assert_eq!(messages(&errors, "amount"), vec![SPECIAL_NUMBER]);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Insert query
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_insert_query_merge_flag() {
        assert!(!validate_insert_query(&params(&[("merge", "0")])).unwrap());
        assert!(validate_insert_query(&params(&[("merge", "1")])).unwrap());
    }

    #[test]
    fn test_insert_query_merge_missing() {
        let errors = validate_insert_query(&params(&[])).unwrap_err();
        assert_eq!(messages(&errors, "merge"), vec![MISSING_FIELD]);
    }

    #[test]
    fn test_insert_query_merge_out_of_range() {
        for raw in ["2", "-1"] {
            let errors = validate_insert_query(&params(&[("merge", raw)])).unwrap_err();
            assert_eq!(messages(&errors, "merge"), vec![MERGE_NOT_ALLOWED]);
        }
    }

    #[test]
    fn test_insert_query_merge_not_integer() {
        for raw in ["yes", "1.0", ""] {
            let errors = validate_insert_query(&params(&[("merge", raw)])).unwrap_err();
            assert_eq!(messages(&errors, "merge"), vec![NOT_AN_INTEGER]);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Insert body
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_insert_body_valid() {
        let body = json!({ "currencies": { "cur": 25.0, "USD": 60, "EUR": "1.087" } });
        let rates = validate_insert_body(Some(&body)).unwrap();

        assert_eq!(rates.len(), 3);
        assert_eq!(rates[&CurrencyCode::new("CUR")].value(), 25.0);
        assert_eq!(rates[&CurrencyCode::new("USD")].value(), 60.0);
        assert_eq!(rates[&CurrencyCode::new("EUR")].value(), 1.087);
    }

    #[test]
    fn test_insert_body_empty_mapping_is_valid() {
        let body = json!({ "currencies": {} });
        assert!(validate_insert_body(Some(&body)).unwrap().is_empty());
    }

    #[test]
    fn test_insert_body_rejects_non_numeric_rate() {
        let body = json!({ "currencies": { "CUR": "abc" } });
        let errors = validate_insert_body(Some(&body)).unwrap_err();
        assert_eq!(rate_messages(&errors, "CUR"), vec![NOT_A_NUMBER]);
    }

    #[test]
    fn test_insert_body_rejects_booleans_and_containers() {
        let body = json!({ "currencies": { "A": true, "B": [1], "C": { "x": 1 } } });
        let errors = validate_insert_body(Some(&body)).unwrap_err();
        for code in ["A", "B", "C"] {
            assert_eq!(rate_messages(&errors, code), vec![NOT_A_NUMBER]);
        }
    }

    #[test]
    fn test_insert_body_rejects_null_rate() {
        let body = json!({ "currencies": { "CUR": null } });
        let errors = validate_insert_body(Some(&body)).unwrap_err();
        assert_eq!(rate_messages(&errors, "CUR"), vec![NULL_VALUE]);
    }

    #[test]
    fn test_insert_body_rejects_non_positive_rates() {
        for value in [json!(-1), json!(0), json!(-2.5), json!("0")] {
            let body = json!({ "currencies": { "CUR": value } });
            let errors = validate_insert_body(Some(&body)).unwrap_err();
            assert_eq!(rate_messages(&errors, "CUR"), vec![NON_POSITIVE_RATE]);
        }
    }

    #[test]
    fn test_insert_body_reports_only_bad_keys() {
        let body = json!({ "currencies": { "GOOD": 1.5, "BAD": -1 } });
        let errors = validate_insert_body(Some(&body)).unwrap_err();

        let Some(FieldErrors::Nested(codes)) = errors.get("currencies") else {
            panic!("expected nested errors");
        };
        assert!(codes.contains_key("BAD"));
        assert!(!codes.contains_key("GOOD"));
    }

    #[test]
    fn test_insert_body_last_case_variant_wins() {
        for (raw, expected) in [
            (r#"{"currencies": {"usd": 1, "USD": 2}}"#, 2.0),
            (r#"{"currencies": {"USD": 2, "usd": 1}}"#, 1.0),
        ] {
            let body: Value = serde_json::from_str(raw).unwrap();
            let rates = validate_insert_body(Some(&body)).unwrap();

            assert_eq!(rates.len(), 1);
            assert_eq!(rates[&CurrencyCode::new("USD")].value(), expected, "body {raw}");
        }
    }

    #[test]
    fn test_insert_body_missing_currencies() {
        let errors = validate_insert_body(Some(&json!({}))).unwrap_err();
        assert_eq!(messages(&errors, "currencies"), vec![MISSING_FIELD]);

        let errors = validate_insert_body(None).unwrap_err();
        assert_eq!(messages(&errors, "currencies"), vec![MISSING_FIELD]);
    }

    #[test]
    fn test_insert_body_currencies_not_a_mapping() {
        let errors = validate_insert_body(Some(&json!({ "currencies": [1, 2] }))).unwrap_err();
        assert_eq!(messages(&errors, "currencies"), vec![NOT_A_MAPPING]);
    }

    #[test]
    fn test_insert_body_not_an_object() {
        let errors = validate_insert_body(Some(&json!([1, 2]))).unwrap_err();
        assert_eq!(messages(&errors, "_schema"), vec![INVALID_INPUT]);
    }

    #[test]
    fn test_insert_merges_query_and_body_errors() {
        let body = json!({ "currencies": { "CUR": 0 } });
        let errors = validate_insert(&params(&[("merge", "5")]), Some(&body)).unwrap_err();

        assert_eq!(messages(&errors, "merge"), vec![MERGE_NOT_ALLOWED]);
        assert_eq!(rate_messages(&errors, "CUR"), vec![NON_POSITIVE_RATE]);
    }

    #[test]
    fn test_insert_valid() {
        let body = json!({ "currencies": { "usd": 30.0 } });
        let req = validate_insert(&params(&[("merge", "1")]), Some(&body)).unwrap();

        assert!(req.merge);
        assert_eq!(req.currencies[&CurrencyCode::new("USD")].value(), 30.0);
    }
}
