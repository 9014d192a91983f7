//! Sort orders supported by [`OrderedIndexedMap::sort`](crate::OrderedIndexedMap::sort).
//!
//! Every order is a stable sort: entries that compare equal keep their
//! relative position, including under the descending variants.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Named sort orders for reordering a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Keys, lexicographically ascending
    KeyAsc,
    /// Keys, lexicographically descending
    KeyDesc,
    /// Values, lexicographically ascending
    ValueAsc,
    /// Values, lexicographically descending
    ValueDesc,
    /// Key length (in characters), shortest first
    KeyLenAsc,
    /// Key length (in characters), longest first
    KeyLenDesc,
    /// Value length (in characters), shortest first
    ValueLenAsc,
    /// Value length (in characters), longest first
    ValueLenDesc,
    /// Keys parsed as numbers, ascending.
    ///
    /// Numeric keys compare by value. Keys that do not parse as a finite
    /// number compare lexicographically among themselves and always sort
    /// after every numeric key, so `["#tag", "5"]` sorts to `["5", "#tag"]`.
    NumericAsc,
    /// Keys parsed as numbers, descending. The exact reverse of
    /// [`SortOrder::NumericAsc`], so non-numeric keys come first.
    NumericDesc,
}

impl SortOrder {
    /// All sort orders, in declaration order.
    pub const ALL: [SortOrder; 10] = [
        SortOrder::KeyAsc,
        SortOrder::KeyDesc,
        SortOrder::ValueAsc,
        SortOrder::ValueDesc,
        SortOrder::KeyLenAsc,
        SortOrder::KeyLenDesc,
        SortOrder::ValueLenAsc,
        SortOrder::ValueLenDesc,
        SortOrder::NumericAsc,
        SortOrder::NumericDesc,
    ];

    /// Returns the constant name hosts use for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::KeyAsc => "KEY_ASC",
            SortOrder::KeyDesc => "KEY_DESC",
            SortOrder::ValueAsc => "VALUE_ASC",
            SortOrder::ValueDesc => "VALUE_DESC",
            SortOrder::KeyLenAsc => "KEY_LEN_ASC",
            SortOrder::KeyLenDesc => "KEY_LEN_DESC",
            SortOrder::ValueLenAsc => "VALUE_LEN_ASC",
            SortOrder::ValueLenDesc => "VALUE_LEN_DESC",
            SortOrder::NumericAsc => "NUMERIC_ASC",
            SortOrder::NumericDesc => "NUMERIC_DESC",
        }
    }

    /// Returns true for the descending variants.
    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            SortOrder::KeyDesc
                | SortOrder::ValueDesc
                | SortOrder::KeyLenDesc
                | SortOrder::ValueLenDesc
                | SortOrder::NumericDesc
        )
    }

    /// Compares two entries under this order.
    pub fn compare(&self, a: (&str, &str), b: (&str, &str)) -> Ordering {
        let (ak, av) = a;
        let (bk, bv) = b;
        let ordering = match self {
            SortOrder::KeyAsc | SortOrder::KeyDesc => ak.cmp(bk),
            SortOrder::ValueAsc | SortOrder::ValueDesc => av.cmp(bv),
            SortOrder::KeyLenAsc | SortOrder::KeyLenDesc => {
                ak.chars().count().cmp(&bk.chars().count())
            }
            SortOrder::ValueLenAsc | SortOrder::ValueLenDesc => {
                av.chars().count().cmp(&bv.chars().count())
            }
            SortOrder::NumericAsc | SortOrder::NumericDesc => compare_numeric(ak, bk),
        };

        if self.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Parses a key as a finite number.
fn parse_number(key: &str) -> Option<f64> {
    key.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric key comparison.
///
/// Two numeric keys compare by value, ties broken by the raw text. Two
/// non-numeric keys compare lexicographically. A numeric key sorts before a
/// non-numeric one, which keeps the comparator a total order.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SortOrder::ALL
            .iter()
            .copied()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidOperation(format!("unknown sort order: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for order in SortOrder::ALL {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
        assert_eq!("numeric_asc".parse::<SortOrder>().unwrap(), SortOrder::NumericAsc);
        assert!("SIDEWAYS".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_numeric_compare() {
        assert_eq!(compare_numeric("2", "10"), Ordering::Less);
        assert_eq!(compare_numeric("-1.5", "-1"), Ordering::Less);
        assert_eq!(compare_numeric("1e2", "99"), Ordering::Greater);
        assert_eq!(compare_numeric("10", "abc"), Ordering::Less);
        // Non-numeric keys sort after numbers even when they sort first as text
        assert_eq!(compare_numeric("5", "#tag"), Ordering::Less);
        assert_eq!(
            SortOrder::NumericDesc.compare(("5", ""), ("#tag", "")),
            Ordering::Greater
        );
        assert_eq!(compare_numeric("abc", "abd"), Ordering::Less);
        // Equal values, different spellings
        assert_eq!(compare_numeric("1.0", "1"), Ordering::Greater);
        // NaN and infinities are treated as text
        assert_eq!(compare_numeric("NaN", "5"), Ordering::Greater);
        assert_eq!(compare_numeric("inf", "5"), Ordering::Greater);
    }

    #[test]
    fn test_length_counts_characters() {
        let order = SortOrder::KeyLenAsc;
        assert_eq!(order.compare(("äö", ""), ("abc", "")), Ordering::Less);
    }

    #[test]
    fn test_descending_reverses() {
        let a = ("a", "1");
        let b = ("b", "2");
        assert_eq!(SortOrder::KeyAsc.compare(a, b), Ordering::Less);
        assert_eq!(SortOrder::KeyDesc.compare(a, b), Ordering::Greater);
        assert_eq!(SortOrder::ValueDesc.compare(a, b), Ordering::Greater);
        assert_eq!(SortOrder::KeyLenDesc.compare(a, b), Ordering::Equal);
    }
}
