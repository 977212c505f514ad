//! Domain primitives for the gym registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier of a gym record.
///
/// # Examples
///
/// ```rust
/// use gymreg::domain::GymId;
///
/// let id = GymId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GymId(i32);

impl GymId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for GymId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GymId> for i32 {
    fn from(id: GymId) -> Self {
        id.0
    }
}

impl From<i32> for GymId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for GymId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for GymId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Self::new)
    }
}

/// Title-cases a free-text location: each whitespace-separated word gets an
/// uppercase first character and a lowercase remainder, joined by single spaces.
///
/// This is a plain heuristic. "o'NEIL" becomes "O'neil" and "McALLEN" becomes
/// "Mcallen".
#[must_use]
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
