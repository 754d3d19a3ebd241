//! Range field mapping tests
//!
//! Covers:
//! - Mapping validation (doc_values, null_value, unknown properties)
//! - Coerce inheritance from index settings
//! - Field value parsing and field creation
//! - `now` asymmetry between field values and queries
//! - Queries against non-indexed fields

use pretty_assertions::assert_eq;
use rangefield::eval::InMemoryQueryFactory;
use rangefield::{
    Explicit, IndexSettings, QueryContext, RangeDomain, RangeError, RangeField, RangeFieldConfig,
    RangeFieldType, RangeFieldTypeBuilder, RangeRelation, RangeToken, RangeValue,
};
use rstest::rstest;
use serde_json::json;

// ============================================================================
// Test Helpers
// ============================================================================

fn field(domain: RangeDomain) -> RangeFieldType {
    RangeFieldTypeBuilder::new("field", domain)
        .store(true)
        .build(&IndexSettings::default())
        .unwrap()
}

fn mapped(properties: serde_json::Value, settings: IndexSettings) -> Result<RangeFieldType, RangeError> {
    let config = RangeFieldConfig::from_json("field", &properties)?;
    RangeFieldTypeBuilder::from_config("field", config).build(&settings)
}

// ============================================================================
// Mapping
// ============================================================================

#[rstest]
#[case(json!({"type": "long_range", "doc_values": true}))]
#[case(json!({"type": "long_range", "null_value": 5}))]
#[case(json!({"type": "long_range", "fielddata": true}))]
#[case(json!({"type": "long_range", "boost": -1.0}))]
#[case(json!({"type": "text"}))]
fn test_invalid_mappings(#[case] properties: serde_json::Value) {
    let err = mapped(properties, IndexSettings::default()).unwrap_err();
    assert!(matches!(err, RangeError::Mapping { .. }), "got {:?}", err);
}

#[test]
fn test_integer_range_alias() {
    let field = mapped(json!({"type": "integer_range"}), IndexSettings::default()).unwrap();
    assert_eq!(field.domain(), RangeDomain::Int32);
}

#[test]
fn test_mapping_defaults() {
    let field = mapped(json!({"type": "double_range", "doc_values": false}), IndexSettings::default()).unwrap();
    assert!(field.is_indexed());
    assert!(!field.is_stored());
    assert_eq!(field.boost(), 1.0);
}

#[rstest]
#[case(json!({"type": "int_range"}), true, Explicit::implicit(true))]
#[case(json!({"type": "int_range"}), false, Explicit::implicit(false))]
#[case(json!({"type": "int_range", "coerce": true}), false, Explicit::new(true, true))]
#[case(json!({"type": "int_range", "coerce": false}), true, Explicit::new(false, true))]
fn test_coerce_inheritance(
    #[case] properties: serde_json::Value,
    #[case] index_coerce: bool,
    #[case] expected: Explicit<bool>,
) {
    let field = mapped(properties, IndexSettings { coerce: index_coerce }).unwrap();
    assert_eq!(field.coerce(), expected);
}

// ============================================================================
// Field values
// ============================================================================

#[test]
fn test_parse_value_exclusive_bounds() {
    let range = field(RangeDomain::Int32)
        .parse_value(&json!({"gt": 1, "lte": 10}))
        .unwrap();
    assert_eq!(range.to_string(), "[2 : 10]");
}

#[test]
fn test_parse_value_open_ended() {
    let range = field(RangeDomain::Float32).parse_value(&json!({"gte": 1.5})).unwrap();
    assert_eq!(range.to_string(), "[1.5 : inf]");
}

#[test]
fn test_parse_value_requires_object() {
    let err = field(RangeDomain::Int64).parse_value(&json!(5)).unwrap_err();
    assert!(matches!(err, RangeError::Mapping { .. }));
}

#[test]
fn test_parse_value_conflicting_bounds() {
    let err = field(RangeDomain::Int64)
        .parse_value(&json!({"lt": 5, "lte": 6}))
        .unwrap_err();
    assert!(matches!(err, RangeError::Mapping { .. }));
}

#[test]
fn test_parse_value_coerce_disabled() {
    let field = mapped(json!({"type": "long_range", "coerce": false}), IndexSettings::default()).unwrap();
    let err = field.parse_value(&json!({"gte": 1.5})).unwrap_err();
    assert!(matches!(err, RangeError::InvalidValue { .. }));

    let field = mapped(json!({"type": "long_range"}), IndexSettings::default()).unwrap();
    let range = field.parse_value(&json!({"gte": 1.5, "lte": "4.9"})).unwrap();
    assert_eq!(range.to_string(), "[1 : 4]");
}

#[test]
fn test_parse_value_ip() {
    let range = field(RangeDomain::IpAddress)
        .parse_value(&json!({"gte": "192.168.0.0", "lt": "192.168.1.0"}))
        .unwrap();
    assert_eq!(range.to_string(), "[192.168.0.0 : 192.168.0.255]");
}

#[test]
fn test_create_fields() {
    let field = field(RangeDomain::Int64);
    let range = field.parse_value(&json!({"gte": 3, "lt": 8})).unwrap();
    let fields = field.create_fields(&range);
    assert_eq!(
        fields.as_slice(),
        &[
            RangeField::Indexed {
                name: "field".to_string(),
                lower: RangeValue::Long(3),
                upper: RangeValue::Long(7),
            },
            RangeField::Stored {
                name: "field".to_string(),
                text: "[3 : 7]".to_string(),
            },
        ]
    );
}

#[test]
fn test_index_value_pushes_stored_copy() {
    let field = field(RangeDomain::Timestamp);
    let mut sink: Vec<(String, String)> = Vec::new();
    let fields = field
        .index_value(&json!({"gte": 0, "lte": 1000}), &mut sink)
        .unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(sink, vec![("field".to_string(), "[0 : 1000]".to_string())]);
}

#[test]
fn test_unindexed_unstored_field_creates_nothing() {
    let field = RangeFieldTypeBuilder::new("field", RangeDomain::Int32)
        .index(false)
        .build(&IndexSettings::default())
        .unwrap();
    let range = field.parse_value(&json!({"gte": 1})).unwrap();
    assert!(field.create_fields(&range).is_empty());
}

// ============================================================================
// now asymmetry
// ============================================================================

#[test]
fn test_now_rejected_in_field_value() {
    let err = field(RangeDomain::Timestamp)
        .parse_value(&json!({"gte": "now"}))
        .unwrap_err();
    assert!(matches!(err, RangeError::NowNotAllowed { .. }));
}

#[test]
fn test_now_accepted_in_query() {
    let now = 1_700_000_000_000;
    let bounds = field(RangeDomain::Timestamp)
        .range_query(
            Some(&RangeToken::text("now-1d/d")),
            Some(&RangeToken::text("now")),
            true,
            true,
            RangeRelation::Intersects,
            &QueryContext::new().with_now(now),
        )
        .unwrap();
    // 2023-11-14T22:13:20Z, minus a day, rounded to midnight
    assert_eq!(
        bounds.into_pair(),
        (RangeValue::Date(1_699_833_600_000), RangeValue::Date(now))
    );
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_query_matches_indexed_value() {
    let field = field(RangeDomain::Int64);
    let indexed = field.parse_value(&json!({"gte": 6, "lte": 12})).unwrap();
    let predicate = field
        .range_query_with(
            &InMemoryQueryFactory,
            Some(&RangeToken::Int(5)),
            Some(&RangeToken::Int(15)),
            true,
            false,
            RangeRelation::Within,
            &QueryContext::new(),
        )
        .unwrap();
    assert!(predicate.matches(&indexed));
}

#[test]
fn test_term_query() {
    let field = field(RangeDomain::Float64);
    let bounds = field.term_query(&RangeToken::Float(2.5), &QueryContext::new()).unwrap();
    assert_eq!(bounds.into_pair(), (RangeValue::Double(2.5), RangeValue::Double(2.5)));
}

#[test]
fn test_query_on_unindexed_field() {
    let field = RangeFieldTypeBuilder::new("field", RangeDomain::Int32)
        .index(false)
        .build(&IndexSettings::default())
        .unwrap();
    let err = field.term_query(&RangeToken::Int(1), &QueryContext::new()).unwrap_err();
    assert_eq!(err, RangeError::not_indexed("field"));
}
