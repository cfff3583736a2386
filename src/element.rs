//! The three elemental types and their conversions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoltError, BoltResult};

/// Elemental identity of a bolt.  Fixed for the bolt's whole lifetime.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementalType {
    Fire,
    Water,
    Earth,
}

impl ElementalType {
    /// All elements in bucket order.  Iteration over the store follows this order.
    pub const ALL: [ElementalType; 3] = [
        ElementalType::Fire,
        ElementalType::Water,
        ElementalType::Earth,
    ];

    /// Stable numeric id, also the bucket index.
    #[inline]
    pub fn id(self) -> u8 {
        match self {
            ElementalType::Fire => 0,
            ElementalType::Water => 1,
            ElementalType::Earth => 2,
        }
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            ElementalType::Fire => "fire",
            ElementalType::Water => "water",
            ElementalType::Earth => "earth",
        }
    }

    /// The element this one defeats: Fire → Water → Earth → Fire.
    #[inline]
    pub fn prey(self) -> ElementalType {
        match self {
            ElementalType::Fire => ElementalType::Water,
            ElementalType::Water => ElementalType::Earth,
            ElementalType::Earth => ElementalType::Fire,
        }
    }

    /// Returns `true` when `self` wins a collision against `other`.
    #[inline]
    pub fn beats(self, other: ElementalType) -> bool {
        self.prey() == other
    }
}

impl TryFrom<u8> for ElementalType {
    type Error = BoltError;

    fn try_from(raw: u8) -> BoltResult<Self> {
        match raw {
            0 => Ok(ElementalType::Fire),
            1 => Ok(ElementalType::Water),
            2 => Ok(ElementalType::Earth),
            _ => Err(BoltError::InvalidType {
                raw: raw.to_string(),
            }),
        }
    }
}

impl FromStr for ElementalType {
    type Err = BoltError;

    fn from_str(s: &str) -> BoltResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire" => Ok(ElementalType::Fire),
            "water" => Ok(ElementalType::Water),
            "earth" => Ok(ElementalType::Earth),
            _ => Err(BoltError::InvalidType { raw: s.to_string() }),
        }
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_and_match_bucket_order() {
        for (idx, element) in ElementalType::ALL.iter().enumerate() {
            assert_eq!(element.id() as usize, idx);
            assert_eq!(ElementalType::try_from(element.id()), Ok(*element));
        }
    }

    #[test]
    fn out_of_range_id_is_invalid_type() {
        assert_eq!(
            ElementalType::try_from(3),
            Err(BoltError::InvalidType { raw: "3".into() })
        );
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Fire".parse::<ElementalType>(), Ok(ElementalType::Fire));
        assert_eq!(" WATER ".parse::<ElementalType>(), Ok(ElementalType::Water));
        assert!("lightning".parse::<ElementalType>().is_err());
    }

    #[test]
    fn every_element_beats_exactly_one_other() {
        for a in ElementalType::ALL {
            let wins = ElementalType::ALL.iter().filter(|b| a.beats(**b)).count();
            assert_eq!(wins, 1);
            assert!(!a.beats(a));
        }
    }
}
