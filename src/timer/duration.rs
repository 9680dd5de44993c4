//! Duration resolution from noodle and softness slot values
//!
//! Numeric input always wins over the named-softness table: "7" means seven
//! minutes whatever noodle was named.

use std::fmt;
use thiserror::Error;

/// Shortest timer the skill will create
pub const MIN_MINUTES: u32 = 1;

/// Longest timer the platform accepts (24 hours)
pub const MAX_MINUTES: u32 = 24 * 60;

/// Errors resolving slot values into a duration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("unknown noodle: {0:?}")]
    UnknownNoodle(String),
    #[error("unknown softness: {0:?}")]
    UnknownSoftness(String),
    #[error("duration of {0} minutes is outside {MIN_MINUTES}..={MAX_MINUTES}")]
    OutOfRange(i64),
    #[error("not a whole number of minutes: {0:?}")]
    FractionalMinutes(String),
    #[error("not an ISO-8601 minutes duration: {0:?}")]
    Malformed(String),
}

/// Cup noodle products with a known standard waiting time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoodleKind {
    Raoh,
    Donbei,
}

impl NoodleKind {
    pub const ALL: [NoodleKind; 2] = [NoodleKind::Raoh, NoodleKind::Donbei];

    /// Look up a noodle by its canonical slot name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Canonical slot name
    pub fn name(self) -> &'static str {
        match self {
            NoodleKind::Raoh => "ラ王",
            NoodleKind::Donbei => "どん兵衛",
        }
    }

    pub fn base_minutes(self) -> i64 {
        match self {
            NoodleKind::Raoh => 3,
            NoodleKind::Donbei => 5,
        }
    }
}

/// Named softness modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Firmness {
    Firm,
    Soft,
}

impl Firmness {
    pub const ALL: [Firmness; 2] = [Firmness::Firm, Firmness::Soft];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|firmness| firmness.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Firmness::Firm => "かため",
            Firmness::Soft => "やわらかめ",
        }
    }

    /// Signed adjustment to the noodle's base time
    pub fn delta_minutes(self) -> i64 {
        match self {
            Firmness::Firm => -1,
            Firmness::Soft => 1,
        }
    }
}

/// The softness slot after classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Softness {
    /// Nothing said about softness
    Standard,
    Named(Firmness),
    /// Raw minutes, bypassing the noodle table
    Minutes(i64),
}

impl Softness {
    /// Classify a raw slot value. Anything numeric is minutes.
    ///
    /// Magnitudes beyond `i64` saturate so the range check rejects them, and a
    /// non-zero fraction is an error rather than a softness name.
    pub fn parse(raw: &str) -> Result<Self, DurationError> {
        let raw = raw.trim();
        if let Some((negative, whole, fraction)) = split_number(raw) {
            if fraction.bytes().any(|b| b != b'0') {
                return Err(DurationError::FractionalMinutes(raw.to_string()));
            }
            let minutes = match whole.parse::<i64>() {
                Ok(m) if negative => -m,
                Ok(m) => m,
                Err(_) if negative => i64::MIN,
                Err(_) => i64::MAX,
            };
            return Ok(Softness::Minutes(minutes));
        }
        if raw.is_empty() {
            return Ok(Softness::Standard);
        }
        Firmness::from_name(raw)
            .map(Softness::Named)
            .ok_or_else(|| DurationError::UnknownSoftness(raw.to_string()))
    }

    /// How the softness is spoken back to the user
    pub fn display(&self) -> String {
        match self {
            Softness::Standard => "ふつう".to_string(),
            Softness::Named(firmness) => firmness.name().to_string(),
            Softness::Minutes(minutes) => format!("{minutes}分"),
        }
    }
}

/// Sign, integer digits and fraction digits of a decimal number such as
/// `"+5"`, `"-3"` or `"5.5"`; `None` for anything else
fn split_number(raw: &str) -> Option<(bool, &str, &str)> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    (!whole.is_empty() && digits_only(whole) && digits_only(fraction))
        .then_some((negative, whole, fraction))
}

/// A validated timer length in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Minutes(u32);

impl Minutes {
    pub fn new(minutes: i64) -> Result<Self, DurationError> {
        match u32::try_from(minutes) {
            Ok(m) if (MIN_MINUTES..=MAX_MINUTES).contains(&m) => Ok(Self(m)),
            _ => Err(DurationError::OutOfRange(minutes)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// ISO-8601 duration, e.g. `PT4M`
    pub fn to_iso8601(self) -> String {
        format!("PT{}M", self.0)
    }

    /// Inverse of [`Minutes::to_iso8601`]; accepts only the `PT<N>M` form
    pub fn parse_iso8601(text: &str) -> Result<Self, DurationError> {
        let digits = text
            .strip_prefix("PT")
            .and_then(|rest| rest.strip_suffix('M'))
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| DurationError::Malformed(text.to_string()))?;
        let minutes: i64 = digits
            .parse()
            .map_err(|_| DurationError::Malformed(text.to_string()))?;
        Self::new(minutes)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}分", self.0)
    }
}

/// Resolve slot values into a timer length.
///
/// `softness_or_minutes` is tried as an integer first; only when that fails is
/// the noodle looked up and the named softness applied to its base time.
pub fn resolve(noodle: &str, softness_or_minutes: &str) -> Result<Minutes, DurationError> {
    match Softness::parse(softness_or_minutes)? {
        Softness::Minutes(minutes) => Minutes::new(minutes),
        softness => {
            let kind = NoodleKind::from_name(noodle)
                .ok_or_else(|| DurationError::UnknownNoodle(noodle.to_string()))?;
            let delta = match softness {
                Softness::Named(firmness) => firmness.delta_minutes(),
                _ => 0,
            };
            Minutes::new(kind.base_minutes() + delta)
        }
    }
}
