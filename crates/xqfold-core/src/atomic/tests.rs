use crate::{
    atomic::{Atomic, Type},
    error::ErrorCode,
    types::{DayTimeDuration, Decimal, Duration, Numeric, YearMonthDuration},
};

// ---- type hierarchy ----------------------------------------------------

#[test]
fn derived_types_are_instances_of_their_ancestors() {
    assert!(Type::Int.instance_of(Type::Dec));
    assert!(Type::Int.instance_of(Type::AnyAtomic));
    assert!(Type::Ymd.instance_of(Type::Dur));
    assert!(Type::Dtd.instance_of(Type::Dur));
    assert!(!Type::Dur.instance_of(Type::Ymd));
    assert!(!Type::Dbl.instance_of(Type::Dec));
    assert!(!Type::Ymd.instance_of(Type::Dtd));
}

#[test]
fn numeric_family_excludes_durations_and_untyped() {
    for kind in [Type::Int, Type::Dec, Type::Flt, Type::Dbl] {
        assert!(kind.is_numeric(), "{kind}");
    }
    for kind in [Type::Una, Type::Str, Type::Bool, Type::Dur, Type::Ymd, Type::Dtd] {
        assert!(!kind.is_numeric(), "{kind}");
    }
}

#[test]
fn dynamic_type_follows_payload() {
    assert_eq!(Atomic::untyped("1").kind(), Type::Una);
    assert_eq!(Atomic::int(1).kind(), Type::Int);
    assert_eq!(Atomic::dbl(1.0).kind(), Type::Dbl);
    assert_eq!(
        Atomic::from(YearMonthDuration::from_years(1)).kind(),
        Type::Ymd
    );
    assert_eq!(Atomic::from(DayTimeDuration::ZERO).kind(), Type::Dtd);
    assert_eq!(Atomic::from(Duration::ZERO).kind(), Type::Dur);
}

// ---- casting -----------------------------------------------------------

#[test]
fn untyped_casts_to_double() {
    assert_eq!(Atomic::untyped("3").cast(Type::Dbl), Ok(Atomic::dbl(3.0)));
    assert_eq!(Atomic::untyped(" 2.5e1 ").cast(Type::Dbl), Ok(Atomic::dbl(25.0)));
    assert_eq!(
        Atomic::untyped("-INF").cast(Type::Dbl),
        Ok(Atomic::dbl(f64::NEG_INFINITY))
    );
}

#[test]
fn non_xsd_special_values_are_rejected() {
    for lexical in ["inf", "infinity", "nan", "abc", "", "1,5"] {
        let err = Atomic::untyped(lexical).cast(Type::Dbl).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValueForCast, "{lexical}");
    }
}

#[test]
fn untyped_casts_to_durations() {
    assert_eq!(
        Atomic::untyped("P1Y").cast(Type::Ymd),
        Ok(Atomic::YearMonth(YearMonthDuration::from_months(12)))
    );
    assert_eq!(
        Atomic::untyped("PT1H").cast(Type::Dtd),
        Ok(Atomic::DayTime(DayTimeDuration::from_hours(1)))
    );
    let err = Atomic::untyped("PT1H").cast(Type::Ymd).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidValueForCast);
}

#[test]
fn string_casts_to_exact_numerics() {
    assert_eq!(Atomic::string("+42").cast(Type::Int), Ok(Atomic::int(42)));
    assert_eq!(
        Atomic::string("-1.50").cast(Type::Dec),
        Ok(Atomic::dec(Decimal::new(-15, 1)))
    );
    assert!(Atomic::string("1e3").cast(Type::Dec).is_err());
    assert!(Atomic::string("1.0").cast(Type::Int).is_err());
}

#[test]
fn numeric_casts_between_family_members() {
    assert_eq!(Atomic::int(7).cast(Type::Dbl), Ok(Atomic::dbl(7.0)));
    assert_eq!(
        Atomic::dbl(2.75).cast(Type::Dec),
        Ok(Atomic::dec(Decimal::new(275, 2)))
    );
    assert_eq!(Atomic::dbl(-2.75).cast(Type::Int), Ok(Atomic::int(-2)));
    assert_eq!(
        Atomic::dbl(f64::NAN).cast(Type::Int).unwrap_err().code,
        ErrorCode::InvalidValueForCast
    );
}

#[test]
fn everything_casts_to_string_forms() {
    assert_eq!(Atomic::int(5).cast(Type::Str), Ok(Atomic::string("5")));
    assert_eq!(
        Atomic::from(YearMonthDuration::from_months(18)).cast(Type::Una),
        Ok(Atomic::untyped("P1Y6M"))
    );
}

#[test]
fn duration_subtypes_cast_through_the_general_duration() {
    let general = Atomic::untyped("P1Y2DT3H").cast(Type::Dur).unwrap();
    assert_eq!(
        general.cast(Type::Ymd),
        Ok(Atomic::YearMonth(YearMonthDuration::from_months(12)))
    );
    assert_eq!(
        general.cast(Type::Dtd),
        Ok(Atomic::DayTime(DayTimeDuration::from_hours(51)))
    );
}

#[test]
fn unsupported_pairs_fail_with_invalid_cast() {
    let err = Atomic::from(YearMonthDuration::ZERO)
        .cast(Type::Dbl)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCast);

    let err = Atomic::int(1).cast(Type::Ymd).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidCast);
}

#[test]
fn identity_cast_returns_the_same_value() {
    let value = Atomic::Numeric(Numeric::Flt(1.5));
    assert_eq!(value.cast(Type::Flt), Ok(value));
}
