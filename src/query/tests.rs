//! Tests for the query module

use super::*;
use crate::error::Error;
use crate::types::QueryValue;
use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn pairs(spec: &QuerySpec) -> Vec<(String, String)> {
    spec.query_pairs()
}

fn has_key(spec: &QuerySpec, key: &str) -> bool {
    spec.query_pairs().iter().any(|(k, _)| k == key)
}

// ============================================================================
// PageSize Tests
// ============================================================================

#[test_case(1 ; "lower bound")]
#[test_case(30 ; "default")]
#[test_case(150 ; "middle")]
#[test_case(300 ; "upper bound")]
fn test_page_size_accepts_in_range(size: u32) {
    assert_eq!(PageSize::new(size).unwrap().get(), size);
}

#[test_case(0 ; "zero")]
#[test_case(301 ; "just above")]
#[test_case(1000 ; "far above")]
#[test_case(u32::MAX ; "max")]
fn test_page_size_rejects_out_of_range(size: u32) {
    let err = PageSize::new(size).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "page_size"));
}

#[test]
fn test_page_size_default() {
    assert_eq!(PageSize::default().get(), 30);
    assert_eq!(PageSize::DEFAULT, PageSize::new(30).unwrap());
}

#[test]
fn test_page_size_exhaustive_range() {
    for size in 0..=400u32 {
        let ok = PageSize::try_from(size).is_ok();
        assert_eq!(ok, (1..=300).contains(&size), "size {size}");
    }
}

// ============================================================================
// QuerySpec Tests
// ============================================================================

#[test]
fn test_query_spec_defaults() {
    let spec = QuerySpec::builder("phone/call_logs").build().unwrap();
    assert_eq!(spec.path(), "phone/call_logs");
    assert_eq!(spec.page_size().get(), 30);
    assert!(spec.page_token().is_none());
    assert_eq!(pairs(&spec), vec![("page_size".to_string(), "30".to_string())]);
}

#[test]
fn test_absent_params_are_omitted() {
    let spec = QuerySpec::builder("phone/call_logs")
        .param("site_id", None::<String>)
        .param("phone_number", None::<&str>)
        .param("type", Some("missed"))
        .build()
        .unwrap();

    assert!(!has_key(&spec, "site_id"));
    assert!(!has_key(&spec, "phone_number"));
    assert!(has_key(&spec, "type"));
    // Absent params are still declared
    assert_eq!(spec.params().len(), 3);
}

#[test]
fn test_param_order_is_preserved() {
    let spec = QuerySpec::builder("p")
        .value("b", "2")
        .value("a", 1_i64)
        .value("c", true)
        .page_token(Some("tok"))
        .build()
        .unwrap();

    assert_eq!(
        pairs(&spec),
        vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
            ("c".to_string(), "true".to_string()),
            ("page_size".to_string(), "30".to_string()),
            ("next_page_token".to_string(), "tok".to_string()),
        ]
    );
}

#[test]
fn test_redeclared_param_replaces_in_place() {
    let spec = QuerySpec::builder("p")
        .value("a", "1")
        .value("b", "2")
        .param("a", None::<String>)
        .build()
        .unwrap();

    assert_eq!(spec.params()[0], ("a".to_string(), None));
    assert!(!has_key(&spec, "a"));
}

#[test]
fn test_date_range_is_date_only() {
    let from = Utc.with_ymd_and_hms(2024, 1, 15, 18, 30, 0).unwrap();
    let to = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let spec = QuerySpec::builder("p")
        .date_range(&DateRange::between(from, to))
        .build()
        .unwrap();

    let wire = pairs(&spec);
    assert_eq!(wire[0], ("from".to_string(), "2024-01-15".to_string()));
    assert_eq!(wire[1], ("to".to_string(), "2024-02-01".to_string()));
    assert!(wire.iter().all(|(_, v)| !v.contains('T') && !v.contains(':')));
}

#[test]
fn test_open_date_range_omits_missing_bound() {
    let range = DateRange::new().since(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    let spec = QuerySpec::builder("p").date_range(&range).build().unwrap();

    assert!(has_key(&spec, "from"));
    assert!(!has_key(&spec, "to"));
    assert_eq!(
        spec.params()[0].1,
        Some(QueryValue::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()))
    );
}

#[test]
fn test_empty_page_token_is_absent() {
    let spec = QuerySpec::builder("p").page_token(Some("")).build().unwrap();
    assert!(spec.page_token().is_none());
    assert!(!has_key(&spec, "next_page_token"));
}

#[test]
fn test_page_token_passthrough() {
    let token = "Xz9+/=abc def";
    let spec = QuerySpec::builder("p").page_token(Some(token)).build().unwrap();
    assert_eq!(spec.page_token(), Some(token));
}

#[test]
fn test_try_page_size_fails_at_construction() {
    let err = QuerySpec::builder("p").try_page_size(301).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let spec = QuerySpec::builder("p")
        .try_page_size(300)
        .unwrap()
        .build()
        .unwrap();
    assert!(pairs(&spec).contains(&("page_size".to_string(), "300".to_string())));
}

#[test]
fn test_empty_path_rejected() {
    let err = QuerySpec::builder("  ").build().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { ref name, .. } if name == "path"));
}

#[test_case("page_size" ; "page size")]
#[test_case("next_page_token" ; "page token")]
fn test_reserved_param_names_rejected(name: &str) {
    let err = QuerySpec::builder("p").value(name, "x").build().unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}
