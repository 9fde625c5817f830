use crate::{atomic::Type, error::QueryError};
use std::fmt;

// ratio constants
const MONTHS_PER_YEAR: u64 = 12;
const MICROS_PER_SEC: u64 = 1_000_000;
const MICROS_PER_MIN: u64 = 60 * MICROS_PER_SEC;
const MICROS_PER_HOUR: u64 = 60 * MICROS_PER_MIN;
const MICROS_PER_DAY: u64 = 24 * MICROS_PER_HOUR;

// 2^63: whole divisors below this magnitude fit i64
const MAX_EXACT_DIVISOR: f64 = 9_223_372_036_854_775_808.0;

///
/// YearMonthDuration
/// (signed months)
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct YearMonthDuration(i32);

impl YearMonthDuration {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_months(months: i32) -> Self {
        Self(months)
    }

    #[must_use]
    pub const fn from_years(years: i32) -> Self {
        Self(years.saturating_mul(MONTHS_PER_YEAR as i32))
    }

    #[must_use]
    pub const fn months(self) -> i32 {
        self.0
    }

    pub fn parse(lexical: &str) -> Result<Self, QueryError> {
        let parts = DurationParts::parse(lexical)
            .filter(|p| !p.has_day_time)
            .ok_or_else(|| QueryError::invalid_lexical(Type::Ymd, lexical))?;

        parts
            .signed_months()
            .map(Self)
            .ok_or_else(|| QueryError::duration_overflow(Type::Ymd))
    }

    pub fn add(self, rhs: Self) -> Result<Self, QueryError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| QueryError::duration_overflow(Type::Ymd))
    }

    /// Divide by a double, rounding to the nearest month (halves round up).
    pub fn divide(self, divisor: f64) -> Result<Self, QueryError> {
        let months = divide_rounded(i64::from(self.0), divisor, Type::Ymd)?;

        i32::try_from(months)
            .map(Self)
            .map_err(|_| QueryError::duration_overflow(Type::Ymd))
    }
}

impl fmt::Display for YearMonthDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("P0M");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        write_year_month(f, u64::from(self.0.unsigned_abs()))
    }
}

///
/// DayTimeDuration
/// (signed microseconds)
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct DayTimeDuration(i64);

impl DayTimeDuration {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(MICROS_PER_SEC as i64))
    }

    #[must_use]
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours.saturating_mul(MICROS_PER_HOUR as i64))
    }

    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        Self(days.saturating_mul(MICROS_PER_DAY as i64))
    }

    #[must_use]
    pub const fn micros(self) -> i64 {
        self.0
    }

    pub fn parse(lexical: &str) -> Result<Self, QueryError> {
        let parts = DurationParts::parse(lexical)
            .filter(|p| !p.has_year_month)
            .ok_or_else(|| QueryError::invalid_lexical(Type::Dtd, lexical))?;

        parts
            .signed_micros()
            .map(Self)
            .ok_or_else(|| QueryError::duration_overflow(Type::Dtd))
    }

    pub fn add(self, rhs: Self) -> Result<Self, QueryError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| QueryError::duration_overflow(Type::Dtd))
    }

    /// Divide by a double, rounding to the nearest microsecond.
    pub fn divide(self, divisor: f64) -> Result<Self, QueryError> {
        let micros = divide_rounded(self.0, divisor, Type::Dtd)?;

        i64::try_from(micros)
            .map(Self)
            .map_err(|_| QueryError::duration_overflow(Type::Dtd))
    }
}

impl fmt::Display for DayTimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("PT0S");
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        write_day_time(f, self.0.unsigned_abs())
    }
}

///
/// Duration
///
/// General `xs:duration`: a month component and a microsecond component.
/// Both components carry the same sign.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Duration {
    months: i32,
    micros: i64,
}

impl Duration {
    pub const ZERO: Self = Self {
        months: 0,
        micros: 0,
    };

    #[must_use]
    pub const fn year_month(self) -> YearMonthDuration {
        YearMonthDuration(self.months)
    }

    #[must_use]
    pub const fn day_time(self) -> DayTimeDuration {
        DayTimeDuration(self.micros)
    }

    pub fn parse(lexical: &str) -> Result<Self, QueryError> {
        let parts = DurationParts::parse(lexical)
            .ok_or_else(|| QueryError::invalid_lexical(Type::Dur, lexical))?;

        match (parts.signed_months(), parts.signed_micros()) {
            (Some(months), Some(micros)) => Ok(Self { months, micros }),
            _ => Err(QueryError::duration_overflow(Type::Dur)),
        }
    }
}

impl From<YearMonthDuration> for Duration {
    fn from(d: YearMonthDuration) -> Self {
        Self {
            months: d.0,
            micros: 0,
        }
    }
}

impl From<DayTimeDuration> for Duration {
    fn from(d: DayTimeDuration) -> Self {
        Self {
            months: 0,
            micros: d.0,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months == 0 {
            return self.day_time().fmt(f);
        }
        if self.months < 0 {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        write_year_month(f, u64::from(self.months.unsigned_abs()))?;
        if self.micros != 0 {
            write_day_time(f, self.micros.unsigned_abs())?;
        }

        Ok(())
    }
}

// Shared scalar division for both duration kinds, rounding half up.
// Whole divisors (every average count) divide exactly in integers; any
// other divisor goes through a double.
fn divide_rounded(value: i64, divisor: f64, kind: Type) -> Result<i128, QueryError> {
    if divisor.is_nan() {
        return Err(QueryError::nan_supplied(kind));
    }
    if divisor == 0.0 {
        return Err(QueryError::duration_overflow(kind));
    }
    if divisor.is_infinite() {
        return Ok(0);
    }

    if divisor.fract() == 0.0 && divisor.abs() < MAX_EXACT_DIVISOR {
        // floor(v / d + 1/2) == floor((2v + d) / 2d)
        let d = divisor as i128;
        let (num, den) = (2 * i128::from(value) + d, 2 * d);
        let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };

        return Ok(num.div_euclid(den));
    }

    let quotient = (value as f64 / divisor + 0.5).floor();
    if !quotient.is_finite() || quotient.abs() >= MAX_EXACT_DIVISOR {
        return Err(QueryError::duration_overflow(kind));
    }

    Ok(quotient as i128)
}

fn write_year_month(f: &mut fmt::Formatter<'_>, months: u64) -> fmt::Result {
    let years = months / MONTHS_PER_YEAR;
    let months = months % MONTHS_PER_YEAR;
    if years > 0 {
        write!(f, "{years}Y")?;
    }
    if months > 0 {
        write!(f, "{months}M")?;
    }

    Ok(())
}

fn write_day_time(f: &mut fmt::Formatter<'_>, micros: u64) -> fmt::Result {
    let days = micros / MICROS_PER_DAY;
    let rest = micros % MICROS_PER_DAY;
    if days > 0 {
        write!(f, "{days}D")?;
    }
    if rest == 0 {
        return Ok(());
    }

    f.write_str("T")?;
    let hours = rest / MICROS_PER_HOUR;
    let minutes = rest % MICROS_PER_HOUR / MICROS_PER_MIN;
    let secs = rest % MICROS_PER_MIN / MICROS_PER_SEC;
    let fraction = rest % MICROS_PER_SEC;
    if hours > 0 {
        write!(f, "{hours}H")?;
    }
    if minutes > 0 {
        write!(f, "{minutes}M")?;
    }
    if secs > 0 || fraction > 0 {
        write!(f, "{secs}")?;
        if fraction > 0 {
            let digits = format!("{fraction:06}");
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        f.write_str("S")?;
    }

    Ok(())
}

///
/// DurationParts
///
/// Unsigned components of a parsed `-?PnYnMnDTnHnMn.nS` literal.
///

#[derive(Debug, Default)]
struct DurationParts {
    negative: bool,
    years: u64,
    months: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    micros: u64,
    has_year_month: bool,
    has_day_time: bool,
}

impl DurationParts {
    // Designators in their mandatory order; the bool marks the time section.
    const DESIGNATORS: [(char, bool); 6] = [
        ('Y', false),
        ('M', false),
        ('D', false),
        ('H', true),
        ('M', true),
        ('S', true),
    ];

    fn parse(lexical: &str) -> Option<Self> {
        let mut parts = Self::default();
        let mut rest = lexical.trim();
        if let Some(stripped) = rest.strip_prefix('-') {
            parts.negative = true;
            rest = stripped;
        }
        rest = rest.strip_prefix('P')?;

        let mut in_time = false;
        let mut time_components = 0usize;
        let mut next_slot = 0usize;
        let mut number = String::new();
        let mut any = false;

        for c in rest.chars() {
            if c.is_ascii_digit() || c == '.' {
                number.push(c);
                continue;
            }
            if c == 'T' {
                if in_time || !number.is_empty() {
                    return None;
                }
                in_time = true;
                next_slot = next_slot.max(3);
                continue;
            }

            let slot = (next_slot..Self::DESIGNATORS.len())
                .find(|&i| Self::DESIGNATORS[i] == (c, in_time))?;
            if number.is_empty() || (number.contains('.') && c != 'S') {
                return None;
            }
            parts.set(slot, &number)?;
            number.clear();
            next_slot = slot + 1;
            any = true;
            if in_time {
                time_components += 1;
            }
        }

        if !number.is_empty() || !any || (in_time && time_components == 0) {
            return None;
        }

        Some(parts)
    }

    fn set(&mut self, slot: usize, number: &str) -> Option<()> {
        if slot == 5 {
            self.micros = parse_seconds(number)?;
            self.has_day_time = true;
            return Some(());
        }

        let value: u64 = number.parse().ok()?;
        match slot {
            0 => self.years = value,
            1 => self.months = value,
            2 => self.days = value,
            3 => self.hours = value,
            _ => self.minutes = value,
        }
        if slot < 2 {
            self.has_year_month = true;
        } else {
            self.has_day_time = true;
        }

        Some(())
    }

    fn signed_months(&self) -> Option<i32> {
        let total = self
            .years
            .checked_mul(MONTHS_PER_YEAR)?
            .checked_add(self.months)?;
        let total = i32::try_from(total).ok()?;

        Some(if self.negative { -total } else { total })
    }

    fn signed_micros(&self) -> Option<i64> {
        let total = self
            .days
            .checked_mul(MICROS_PER_DAY)?
            .checked_add(self.hours.checked_mul(MICROS_PER_HOUR)?)?
            .checked_add(self.minutes.checked_mul(MICROS_PER_MIN)?)?
            .checked_add(self.micros)?;
        let total = i64::try_from(total).ok()?;

        Some(if self.negative { -total } else { total })
    }
}

// Seconds with an optional fraction; digits past microseconds are dropped.
fn parse_seconds(number: &str) -> Option<u64> {
    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };
    if whole.is_empty() || fraction.contains('.') || (number.contains('.') && fraction.is_empty()) {
        return None;
    }

    let secs: u64 = whole.parse().ok()?;
    let mut micros = 0u64;
    for (i, digit) in fraction.chars().take(6).enumerate() {
        let d = u64::from(digit.to_digit(10)?);
        micros += d * 10u64.pow(5 - i as u32);
    }

    secs.checked_mul(MICROS_PER_SEC)?.checked_add(micros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn year_month_lexical_round_trip() {
        for lexical in ["P1Y", "P6M", "P1Y6M", "-P2Y3M", "P0M"] {
            let d = YearMonthDuration::parse(lexical).expect(lexical);
            assert_eq!(d.to_string(), lexical);
        }
        assert_eq!(YearMonthDuration::parse("P18M").unwrap().to_string(), "P1Y6M");
    }

    #[test]
    fn day_time_lexical_forms() {
        assert_eq!(
            DayTimeDuration::parse("P1DT2H").unwrap(),
            DayTimeDuration::from_hours(26)
        );
        assert_eq!(
            DayTimeDuration::parse("PT1.5S").unwrap().micros(),
            1_500_000
        );
        assert_eq!(DayTimeDuration::parse("PT90M").unwrap().to_string(), "PT1H30M");
        assert_eq!(DayTimeDuration::ZERO.to_string(), "PT0S");
        assert_eq!(
            DayTimeDuration::from_micros(-2_250_000).to_string(),
            "-PT2.25S"
        );
    }

    #[test]
    fn malformed_literals_are_rejected() {
        for lexical in ["", "P", "PT", "1Y", "P1S", "PT1Y", "P1.5Y", "P1M1Y", "P1YT", "PT1.S"] {
            assert!(DurationParts::parse(lexical).is_none(), "{lexical}");
        }
    }

    #[test]
    fn subtype_parsers_reject_foreign_components() {
        let err = YearMonthDuration::parse("P1D").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValueForCast);

        let err = DayTimeDuration::parse("P1Y").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidValueForCast);
    }

    #[test]
    fn general_duration_keeps_both_components() {
        let d = Duration::parse("P1Y2M3DT4H").unwrap();
        assert_eq!(d.year_month(), YearMonthDuration::from_months(14));
        assert_eq!(d.day_time(), DayTimeDuration::from_hours(76));
        assert_eq!(d.to_string(), "P1Y2M3DT4H");
    }

    #[test]
    fn year_month_divide_rounds_half_up() {
        let d = YearMonthDuration::from_months(36);
        assert_eq!(d.divide(2.0).unwrap().to_string(), "P1Y6M");
        assert_eq!(YearMonthDuration::from_months(3).divide(2.0).unwrap().months(), 2);
        assert_eq!(YearMonthDuration::from_months(-3).divide(2.0).unwrap().months(), -1);
    }

    #[test]
    fn whole_divisor_keeps_full_microsecond_precision() {
        // 2^53 + 1 has no exact double
        let d = DayTimeDuration::from_micros(9_007_199_254_740_993);
        assert_eq!(d.divide(1.0).unwrap(), d);
        assert_eq!(
            DayTimeDuration::from_micros(i64::MAX).divide(1.0).unwrap(),
            DayTimeDuration::from_micros(i64::MAX)
        );
        assert_eq!(
            DayTimeDuration::from_micros(9_007_199_254_740_993)
                .divide(-2.0)
                .unwrap()
                .micros(),
            -4_503_599_627_370_496
        );
    }

    #[test]
    fn fractional_divisor_rounds_through_double() {
        let d = DayTimeDuration::from_secs(3);
        assert_eq!(d.divide(0.5).unwrap(), DayTimeDuration::from_secs(6));
        assert_eq!(
            YearMonthDuration::from_months(i32::MAX).divide(0.5).unwrap_err().code,
            ErrorCode::DurationOverflow
        );
    }

    #[test]
    fn divide_by_special_values() {
        let d = DayTimeDuration::from_secs(10);
        assert_eq!(d.divide(f64::NAN).unwrap_err().code, ErrorCode::NaNSupplied);
        assert_eq!(d.divide(0.0).unwrap_err().code, ErrorCode::DurationOverflow);
        assert_eq!(d.divide(f64::INFINITY).unwrap(), DayTimeDuration::ZERO);
    }

    #[test]
    fn addition_overflow_is_reported() {
        let err = YearMonthDuration::from_months(i32::MAX)
            .add(YearMonthDuration::from_months(1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DurationOverflow);
    }
}
