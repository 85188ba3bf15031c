use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building a `Day` from a raw number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DayError {
    #[error("day must be >= 1")]
    Zero,

    #[error("day out of range: {0}")]
    OutOfRange(i64),

    #[error("failed to parse day from {0:?}")]
    Parse(String),
}

/// 1-based position of a word in the content sequence.
///
/// A day is both the identity of a `WordRecord` and the unit of progression.
/// Serialized as a bare integer so persisted sets stay plain JSON arrays.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Day(u32);

impl Day {
    pub const FIRST: Day = Day(1);

    /// Creates a new `Day`.
    ///
    /// # Errors
    ///
    /// Returns `DayError::Zero` for `0`.
    pub fn new(value: u32) -> Result<Self, DayError> {
        if value == 0 {
            return Err(DayError::Zero);
        }
        Ok(Self(value))
    }

    /// Day for a 0-based position in the content sequence.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let value = u32::try_from(index).ok()?.checked_add(1)?;
        Some(Self(value))
    }

    /// Returns the underlying 1-based value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// 0-based position of this day in the content sequence.
    #[must_use]
    pub fn index(self) -> usize {
        usize::try_from(self.0 - 1).unwrap_or(usize::MAX)
    }

    #[must_use]
    pub fn is_first(self) -> bool {
        self.0 == 1
    }

    /// The day before this one, or `None` on day 1.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        if self.is_first() {
            None
        } else {
            Some(Self(self.0 - 1))
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<u32> for Day {
    type Error = DayError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Day {
    type Error = DayError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = u32::try_from(value).map_err(|_| DayError::OutOfRange(value))?;
        Self::new(value)
    }
}

impl From<Day> for u32 {
    fn from(day: Day) -> Self {
        day.0
    }
}

impl fmt::Debug for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day({})", self.0)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| DayError::Parse(s.to_string()))?;
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(Day::new(0).unwrap_err(), DayError::Zero);
        assert_eq!("0".parse::<Day>().unwrap_err(), DayError::Zero);
    }

    #[test]
    fn from_str_trims_and_parses() {
        let day: Day = " 12 ".parse().unwrap();
        assert_eq!(day.value(), 12);
        assert!("twelve".parse::<Day>().is_err());
        assert!("-3".parse::<Day>().is_err());
    }

    #[test]
    fn index_and_from_index_agree() {
        let day = Day::from_index(4).unwrap();
        assert_eq!(day.value(), 5);
        assert_eq!(day.index(), 4);
    }

    #[test]
    fn previous_stops_at_first_day() {
        assert_eq!(Day::FIRST.previous(), None);
        assert_eq!(Day::new(3).unwrap().previous(), Some(Day::new(2).unwrap()));
        assert_eq!(Day::FIRST.next(), Some(Day::new(2).unwrap()));
    }

    #[test]
    fn negative_i64_is_out_of_range() {
        assert_eq!(Day::try_from(-1_i64).unwrap_err(), DayError::OutOfRange(-1));
        assert_eq!(Day::try_from(7_i64).unwrap().value(), 7);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&[Day::FIRST, Day::new(4).unwrap()]).unwrap();
        assert_eq!(json, "[1,4]");
        assert!(serde_json::from_str::<Vec<Day>>("[0]").is_err());
    }
}
