use crate::{
    atomic::{Atomic, Type},
    error::QueryError,
    types::{DayTimeDuration, Decimal, Duration, Numeric, YearMonthDuration},
};
use num_bigint::BigInt;
use num_traits::FromPrimitive;
use std::str::FromStr;

pub(super) fn cast(value: &Atomic, target: Type) -> Result<Atomic, QueryError> {
    let source = value.kind();
    if source == target {
        return Ok(value.clone());
    }

    match (value, target) {
        (_, Type::AnyAtomic) => Err(QueryError::invalid_cast(source, target)),
        (_, Type::Str) => Ok(Atomic::Str(value.to_string())),
        (_, Type::Una) => Ok(Atomic::Untyped(value.to_string())),
        (Atomic::Untyped(lexical) | Atomic::Str(lexical), _) => parse(lexical, target),

        (Atomic::Numeric(n), t) if t.is_numeric() => numeric_to_numeric(n, t),
        (Atomic::Numeric(n), Type::Bool) => {
            let v = n.to_f64();
            Ok(Atomic::Bool(v != 0.0 && !v.is_nan()))
        }
        (Atomic::Bool(b), t) if t.is_numeric() => {
            numeric_to_numeric(&Numeric::from(i64::from(*b)), t)
        }

        (Atomic::Duration(d), Type::Ymd) => Ok(Atomic::YearMonth(d.year_month())),
        (Atomic::Duration(d), Type::Dtd) => Ok(Atomic::DayTime(d.day_time())),
        (Atomic::YearMonth(d), Type::Dur) => Ok(Atomic::Duration(Duration::from(*d))),
        (Atomic::DayTime(d), Type::Dur) => Ok(Atomic::Duration(Duration::from(*d))),
        (Atomic::YearMonth(_), Type::Dtd) => Ok(Atomic::DayTime(DayTimeDuration::ZERO)),
        (Atomic::DayTime(_), Type::Ymd) => Ok(Atomic::YearMonth(YearMonthDuration::ZERO)),

        _ => Err(QueryError::invalid_cast(source, target)),
    }
}

fn parse(lexical: &str, target: Type) -> Result<Atomic, QueryError> {
    let trimmed = lexical.trim();
    let invalid = || QueryError::invalid_lexical(target, lexical);

    match target {
        Type::Dbl => parse_double(trimmed).map(Atomic::dbl).ok_or_else(invalid),
        Type::Flt => parse_double(trimmed)
            .map(|v| Atomic::flt(v as f32))
            .ok_or_else(invalid),
        Type::Dec => parse_decimal(trimmed).map(Atomic::dec).ok_or_else(invalid),
        Type::Int => parse_integer(trimmed).map(Atomic::integer).ok_or_else(invalid),
        Type::Bool => match trimmed {
            "true" | "1" => Ok(Atomic::Bool(true)),
            "false" | "0" => Ok(Atomic::Bool(false)),
            _ => Err(invalid()),
        },
        Type::Ymd => YearMonthDuration::parse(trimmed).map(Atomic::YearMonth),
        Type::Dtd => DayTimeDuration::parse(trimmed).map(Atomic::DayTime),
        Type::Dur => Duration::parse(trimmed).map(Atomic::Duration),
        Type::AnyAtomic | Type::Una | Type::Str => {
            Err(QueryError::invalid_cast(Type::Str, target))
        }
    }
}

fn split_sign(lexical: &str) -> (&str, &str) {
    match lexical.as_bytes().first() {
        Some(b'+' | b'-') => lexical.split_at(1),
        _ => ("", lexical),
    }
}

fn parse_integer(lexical: &str) -> Option<BigInt> {
    let (sign, digits) = split_sign(lexical);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude: BigInt = digits.parse().ok()?;
    Some(if sign == "-" { -magnitude } else { magnitude })
}

fn parse_decimal(lexical: &str) -> Option<Decimal> {
    let (sign, digits) = split_sign(lexical);
    let has_digit = digits.bytes().any(|b| b.is_ascii_digit());
    let well_formed = digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && digits.bytes().filter(|&b| b == b'.').count() <= 1;
    if !has_digit || !well_formed {
        return None;
    }

    let unsigned = if sign == "-" {
        format!("-{digits}")
    } else {
        digits.to_string()
    };

    Decimal::from_str(&unsigned).ok()
}

// Only the XSD spellings of the special values are accepted; Rust's
// `f64::from_str` would also take "inf" or "infinity".
fn parse_double(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" | "+INF" => return Some(f64::INFINITY),
        "-INF" => return Some(f64::NEG_INFINITY),
        "NaN" => return Some(f64::NAN),
        _ => {}
    }

    let well_formed = lexical
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !well_formed || !lexical.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    lexical.parse().ok()
}

fn numeric_to_numeric(n: &Numeric, target: Type) -> Result<Atomic, QueryError> {
    let out_of_range = || QueryError::invalid_lexical(target, &n.to_string());

    let converted = match (n, target) {
        (_, Type::Dbl) => Numeric::Dbl(n.to_f64()),
        (_, Type::Flt) => Numeric::Flt(n.to_f64() as f32),

        (Numeric::Int(v), Type::Dec) => {
            Numeric::Dec(Decimal::from_bigint(v).ok_or_else(out_of_range)?)
        }
        (Numeric::Dec(v), Type::Dec) => Numeric::Dec(*v),
        (Numeric::Flt(_) | Numeric::Dbl(_), Type::Dec) => {
            Numeric::Dec(Decimal::from_f64(n.to_f64()).ok_or_else(out_of_range)?)
        }

        (Numeric::Int(v), Type::Int) => Numeric::Int(v.clone()),
        (Numeric::Dec(v), Type::Int) => Numeric::Int(v.to_bigint()),
        (Numeric::Flt(_) | Numeric::Dbl(_), Type::Int) => {
            Numeric::Int(BigInt::from_f64(n.to_f64().trunc()).ok_or_else(out_of_range)?)
        }

        _ => return Err(QueryError::invalid_cast(n.kind(), target)),
    };

    Ok(Atomic::Numeric(converted))
}
