use bincode::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A signed currency amount added to the bundle price when an option is picked.
///
/// Stored as minor units (cents) so repeated edits never accumulate float
/// error; payloads carry it as a plain decimal number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct PriceAdjustment(i64);

impl PriceAdjustment {
    pub const ZERO: PriceAdjustment = PriceAdjustment(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a currency amount, rounding to the nearest cent.
    /// Non-finite amounts become zero.
    pub fn from_amount(amount: f64) -> Self {
        if amount.is_finite() {
            Self((amount * 100.0).round() as i64)
        } else {
            Self::ZERO
        }
    }

    pub fn amount(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Reads the numeric prefix of free-form text the way a form field does.
    /// Anything that does not start with a number yields zero.
    pub fn parse_lenient(raw: &str) -> Self {
        leading_float(raw).map_or(Self::ZERO, Self::from_amount)
    }
}

impl fmt::Display for PriceAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for PriceAdjustment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.amount())
    }
}

impl<'de> Deserialize<'de> for PriceAdjustment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Self::from_amount(amount))
    }
}

/// Parses the longest prefix of `raw` that reads as a decimal number,
/// skipping leading whitespace. Returns `None` when there is no such prefix.
pub(crate) fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    end = skip_digits(bytes, end);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_end = skip_digits(bytes, exp_end);
        if exp_digits_end > exp_end {
            end = exp_digits_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses the leading integer of `raw`, skipping leading whitespace.
/// Values too large for `i64` saturate.
pub(crate) fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let start = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }
    match s[start..end].parse::<i64>() {
        Ok(n) if negative => Some(-n),
        Ok(n) => Some(n),
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn skip_digits(bytes: &[u8], mut at: usize) -> usize {
    while bytes.get(at).is_some_and(u8::is_ascii_digit) {
        at += 1;
    }
    at
}
