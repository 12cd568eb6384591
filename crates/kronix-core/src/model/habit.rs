use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Number of cells in the monthly habit grid.
pub const MONTH_DAYS: u32 = 31;

/// Set of marked day-of-month numbers, each in `1..=31`.
///
/// Stored as a bitset so uniqueness and range hold by construction. On the
/// wire it is the comma-separated string used by existing backups
/// (`"1,5,12"`); an integer array is accepted as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u32);

impl DaySet {
    pub fn new() -> Self {
        Self(0)
    }

    fn bit(day: u32) -> Result<u32, ValidationError> {
        if (1..=MONTH_DAYS).contains(&day) {
            Ok(1 << (day - 1))
        } else {
            Err(ValidationError::DayOutOfRange(day))
        }
    }

    pub fn contains(&self, day: u32) -> bool {
        Self::bit(day).map(|b| self.0 & b != 0).unwrap_or(false)
    }

    pub fn insert(&mut self, day: u32) -> Result<bool, ValidationError> {
        let b = Self::bit(day)?;
        let added = self.0 & b == 0;
        self.0 |= b;
        Ok(added)
    }

    /// Flip membership of `day`. Returns whether it is marked afterwards.
    pub fn toggle(&mut self, day: u32) -> Result<bool, ValidationError> {
        let b = Self::bit(day)?;
        self.0 ^= b;
        Ok(self.0 & b != 0)
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Marked days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=MONTH_DAYS).filter(move |d| self.contains(*d))
    }

    /// Parse the delimited form. Blank input is the empty set.
    pub fn parse(s: &str) -> Result<Self, String> {
        let mut set = Self::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let day: u32 = part
                .parse()
                .map_err(|_| format!("invalid habit day '{part}'"))?;
            set.insert(day).map_err(|e| e.to_string())?;
        }
        Ok(set)
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{day}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<u32> for DaySet {
    /// Out-of-range days are dropped.
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            let _ = set.insert(day);
        }
        set
    }
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DaySetVisitor;

        impl<'de> Visitor<'de> for DaySetVisitor {
            type Value = DaySet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a comma-separated day list or an array of days")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DaySet, E> {
                DaySet::parse(v).map_err(E::custom)
            }

            fn visit_unit<E: de::Error>(self) -> Result<DaySet, E> {
                Ok(DaySet::new())
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DaySet, A::Error> {
                let mut set = DaySet::new();
                while let Some(day) = seq.next_element::<u32>()? {
                    set.insert(day).map_err(de::Error::custom)?;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(DaySetVisitor)
    }
}

/// A habit tracked on the monthly grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub completed_days: DaySet,
}

impl Habit {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed_days: DaySet::new(),
        }
    }

    /// Share of the month grid that is marked, 0.0..=1.0.
    pub fn completion_ratio(&self) -> f64 {
        f64::from(self.completed_days.len()) / f64::from(MONTH_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores() {
        let mut set = DaySet::parse("3,9").unwrap();
        let before = set;
        assert!(set.toggle(12).unwrap());
        assert!(!set.toggle(12).unwrap());
        assert_eq!(set, before);
    }

    #[test]
    fn rejects_out_of_range() {
        let mut set = DaySet::new();
        assert_eq!(set.toggle(0), Err(ValidationError::DayOutOfRange(0)));
        assert_eq!(set.toggle(32), Err(ValidationError::DayOutOfRange(32)));
        assert!(set.is_empty());
        assert!(DaySet::parse("1,40").is_err());
        assert!(DaySet::parse("1,x").is_err());
    }

    #[test]
    fn parse_collapses_duplicates_and_ignores_order() {
        let set = DaySet::parse("12, 1,5,1").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "1,5,12");
    }

    #[test]
    fn serde_accepts_string_array_and_empty() {
        let h: Habit = serde_json::from_str(r#"{"id":1,"name":"read","completed_days":"2,4"}"#).unwrap();
        assert_eq!(h.completed_days.len(), 2);
        let h: Habit = serde_json::from_str(r#"{"id":1,"name":"read","completed_days":[2,4,6]}"#).unwrap();
        assert_eq!(h.completed_days.len(), 3);
        let h: Habit = serde_json::from_str(r#"{"id":1,"name":"read","completed_days":""}"#).unwrap();
        assert!(h.completed_days.is_empty());
        let h: Habit = serde_json::from_str(r#"{"id":1,"name":"read"}"#).unwrap();
        assert!(h.completed_days.is_empty());
    }

    #[test]
    fn serializes_as_delimited_string() {
        let mut h = Habit::new(1, "run");
        h.completed_days.insert(7).unwrap();
        h.completed_days.insert(2).unwrap();
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["completed_days"], "2,7");
    }

    #[test]
    fn completion_ratio_counts_days() {
        let mut h = Habit::new(1, "run");
        for d in 1..=31 {
            h.completed_days.insert(d).unwrap();
        }
        assert!((h.completion_ratio() - 1.0).abs() < f64::EPSILON);
    }
}
