//! Tests for range domains
//!
//! Covers:
//! - Successor/predecessor stepping and saturation
//! - Float adjacency
//! - IP address stepping across octets
//! - Token coercion per domain
//! - Closure of successor/predecessor away from the edges

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rangefield_diagnostics::RangeError;
use rangefield_types::{CoerceContext, RangeDomain, RangeToken, RangeValue};
use rstest::rstest;
use std::net::{IpAddr, Ipv6Addr};

fn ip(text: &str) -> RangeValue {
    RangeValue::ip(text.parse::<IpAddr>().unwrap())
}

fn coerce(domain: RangeDomain, token: impl Into<RangeToken>) -> Result<RangeValue, RangeError> {
    domain
        .coerce(&token.into(), &CoerceContext::default())
        .map(|coercion| coercion.value)
}

// === Stepping ===

#[rstest]
#[case(RangeDomain::Int32, RangeValue::Int(41), RangeValue::Int(42))]
#[case(RangeDomain::Int64, RangeValue::Long(-1), RangeValue::Long(0))]
#[case(RangeDomain::Timestamp, RangeValue::Date(999), RangeValue::Date(1000))]
#[case(RangeDomain::IpAddress, ip("10.0.0.255"), ip("10.0.1.0"))]
fn test_successor(#[case] domain: RangeDomain, #[case] value: RangeValue, #[case] expected: RangeValue) {
    assert_eq!(domain.successor(&value), expected);
    assert_eq!(domain.predecessor(&expected), value);
}

#[rstest]
#[case(RangeDomain::Int32)]
#[case(RangeDomain::Int64)]
#[case(RangeDomain::Float32)]
#[case(RangeDomain::Float64)]
#[case(RangeDomain::Timestamp)]
#[case(RangeDomain::IpAddress)]
fn test_saturation_at_edges(#[case] domain: RangeDomain) {
    let min = domain.min_value();
    let max = domain.max_value();

    assert_eq!(domain.successor(&max), max);
    assert_eq!(domain.predecessor(&min), min);
    assert_eq!(domain.checked_successor(&max), None);
    assert_eq!(domain.checked_predecessor(&min), None);
}

#[test]
fn test_float_adjacency() {
    assert_eq!(
        RangeDomain::Float32.successor(&RangeValue::Float(1.0)),
        RangeValue::Float(1.0 + f32::EPSILON)
    );
    assert_eq!(
        RangeDomain::Float64.successor(&RangeValue::Double(1.0)),
        RangeValue::Double(1.0 + f64::EPSILON)
    );
    assert_eq!(
        RangeDomain::Float64.predecessor(&RangeValue::Double(1.0)),
        RangeValue::Double(1.0 - f64::EPSILON / 2.0)
    );
}

#[test]
fn test_float_steps_off_the_largest_finite_value() {
    assert_eq!(
        RangeDomain::Float64.successor(&RangeValue::Double(f64::MAX)),
        RangeValue::Double(f64::INFINITY)
    );
}

#[rstest]
#[case(RangeDomain::Float32, "0")]
#[case(RangeDomain::Float32, "-0.0")]
#[case(RangeDomain::Float64, "0")]
#[case(RangeDomain::Float64, "-0.0")]
fn test_float_zero_closure(#[case] domain: RangeDomain, #[case] text: &str) {
    let zero = coerce(domain, text).unwrap();
    assert_eq!(domain.successor(&domain.predecessor(&zero)), zero);
    assert_eq!(domain.predecessor(&domain.successor(&zero)), zero);
}

#[test]
fn test_float_steps_never_produce_negative_zero() {
    let below = RangeDomain::Float64.predecessor(&RangeValue::Double(0.0));
    assert_eq!(below, RangeValue::Double(-f64::from_bits(1)));
    assert_eq!(RangeDomain::Float64.successor(&below), RangeValue::Double(0.0));
    assert_eq!(
        RangeDomain::Float64.successor(&RangeValue::Double(-0.0)),
        RangeValue::Double(f64::from_bits(1))
    );
    assert_eq!(
        RangeDomain::Float32.successor(&RangeValue::Float(-f32::from_bits(1))),
        RangeValue::Float(0.0)
    );
}

#[test]
fn test_ip_saturation() {
    let min = RangeValue::Ip(Ipv6Addr::UNSPECIFIED);
    assert_eq!(RangeDomain::IpAddress.predecessor(&min), min);
    assert_eq!(RangeDomain::IpAddress.min_value().to_string(), "::");
    assert_eq!(
        RangeDomain::IpAddress.max_value().to_string(),
        "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"
    );
}

// === Coercion ===

#[rstest]
#[case(RangeDomain::Int32, RangeToken::Int(5), RangeValue::Int(5))]
#[case(RangeDomain::Int32, RangeToken::text("7"), RangeValue::Int(7))]
#[case(RangeDomain::Int32, RangeToken::text("2.0"), RangeValue::Int(2))]
#[case(RangeDomain::Int64, RangeToken::text("3000000000"), RangeValue::Long(3_000_000_000))]
#[case(RangeDomain::Int64, RangeToken::text("1e3"), RangeValue::Long(1000))]
#[case(RangeDomain::Float32, RangeToken::text("1.5"), RangeValue::Float(1.5))]
#[case(RangeDomain::Float64, RangeToken::Int(3), RangeValue::Double(3.0))]
#[case(RangeDomain::Timestamp, RangeToken::Int(1000), RangeValue::Date(1000))]
#[case(RangeDomain::Timestamp, RangeToken::text("1000"), RangeValue::Date(1000))]
#[case(RangeDomain::IpAddress, RangeToken::text("192.168.1.1"), ip("192.168.1.1"))]
#[case(RangeDomain::IpAddress, RangeToken::text("2001:db8::1"), ip("2001:db8::1"))]
fn test_coerce_valid(#[case] domain: RangeDomain, #[case] token: RangeToken, #[case] expected: RangeValue) {
    assert_eq!(coerce(domain, token).unwrap(), expected);
}

#[rstest]
#[case(RangeDomain::Int32, RangeToken::text("5.5"))]
#[case(RangeDomain::Int32, RangeToken::Float(5.5))]
#[case(RangeDomain::Int32, RangeToken::text("3000000000"))]
#[case(RangeDomain::Int32, RangeToken::Bool(true))]
#[case(RangeDomain::Int64, RangeToken::text("ten"))]
#[case(RangeDomain::Float32, RangeToken::text("NaN"))]
#[case(RangeDomain::Float32, RangeToken::Float(1e300))]
#[case(RangeDomain::Float64, RangeToken::text("inf"))]
#[case(RangeDomain::Float64, RangeToken::Float(f64::NAN))]
#[case(RangeDomain::IpAddress, RangeToken::Int(5))]
#[case(RangeDomain::IpAddress, RangeToken::text("10.0.0.256"))]
fn test_coerce_invalid(#[case] domain: RangeDomain, #[case] token: RangeToken) {
    let err = coerce(domain, token).unwrap_err();
    assert!(matches!(err, RangeError::InvalidValue { .. }), "got {:?}", err);
}

#[test]
fn test_coerce_truncates_when_allowed() {
    let ctx = CoerceContext::default().allow_coerce(true);
    let coercion = RangeDomain::Int64.coerce(&RangeToken::text("3.7"), &ctx).unwrap();
    assert_eq!(coercion.value, RangeValue::Long(3));
    assert!(coercion.truncated);

    let coercion = RangeDomain::Int64.coerce(&RangeToken::Int(3), &ctx).unwrap();
    assert!(!coercion.truncated);
}

#[test]
fn test_timestamp_now_without_reference_time() {
    let err = coerce(RangeDomain::Timestamp, "now").unwrap_err();
    assert!(matches!(err, RangeError::NowNotAllowed { .. }));
}

#[test]
fn test_timestamp_resolver_failure_is_parse_error() {
    let err = coerce(RangeDomain::Timestamp, "yesterday").unwrap_err();
    assert!(matches!(err, RangeError::Parse { .. }));
}

// === Closure ===

/// `succ(pred(v)) == v` unless `v` is MIN, `pred(succ(v)) == v` unless `v` is MAX
fn check_closure(domain: RangeDomain, token: RangeToken) -> Result<(), TestCaseError> {
    let value = coerce(domain, token).map_err(|err| TestCaseError::reject(err.to_string()))?;
    if value != domain.min_value() {
        prop_assert_eq!(domain.successor(&domain.predecessor(&value)), value);
    }
    if value != domain.max_value() {
        prop_assert_eq!(domain.predecessor(&domain.successor(&value)), value);
    }
    Ok(())
}

fn doubles() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("finite", |d| d.is_finite()),
        prop::sample::select(vec![
            0.0,
            -0.0,
            f64::from_bits(1),
            -f64::from_bits(1),
            f64::MIN_POSITIVE,
            f64::MAX,
            f64::MIN,
        ]),
    ]
}

fn floats() -> impl Strategy<Value = f32> {
    prop_oneof![
        any::<f32>().prop_filter("finite", |f| f.is_finite()),
        prop::sample::select(vec![
            0.0,
            -0.0,
            f32::from_bits(1),
            -f32::from_bits(1),
            f32::MIN_POSITIVE,
            f32::MAX,
            f32::MIN,
        ]),
    ]
}

proptest! {
    #[test]
    fn prop_int32_closure(v in any::<i32>()) {
        check_closure(RangeDomain::Int32, RangeToken::from(v))?;
    }

    #[test]
    fn prop_int64_closure(v in any::<i64>()) {
        check_closure(RangeDomain::Int64, RangeToken::from(v))?;
    }

    #[test]
    fn prop_float32_closure(v in floats()) {
        check_closure(RangeDomain::Float32, RangeToken::Float(f64::from(v)))?;
    }

    #[test]
    fn prop_float64_closure(v in doubles()) {
        check_closure(RangeDomain::Float64, RangeToken::Float(v))?;
    }

    #[test]
    fn prop_timestamp_closure(v in any::<i64>()) {
        check_closure(RangeDomain::Timestamp, RangeToken::Int(v))?;
    }

    #[test]
    fn prop_ip_closure(bits in any::<u128>()) {
        check_closure(RangeDomain::IpAddress, RangeToken::text(Ipv6Addr::from(bits).to_string()))?;
    }

    #[test]
    fn prop_float64_successor_is_adjacent(v in doubles()) {
        let value = RangeValue::double(v);
        let next = RangeDomain::Float64.successor(&value);
        prop_assert!(next > value);
        if let (RangeValue::Double(lo), RangeValue::Double(hi)) = (value, next) {
            // nothing representable lies strictly between
            prop_assert_eq!(lo.next_up(), hi);
        }
    }
}
