//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `FloorId` ordering is the physical
//! ordering of floors (0 = ground), which the dispatcher relies on when it
//! compares floors against a travel direction.

use std::fmt;
use std::str::FromStr;

use crate::{LiftError, LiftResult};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Sequential id handed out by the spawn factory.
    pub struct PassengerId(u32);
}

typed_id! {
    /// Index of a car in the simulation's car list.
    pub struct CarId(u16);
}

typed_id! {
    /// A floor number, 0 being the ground floor.
    pub struct FloorId(u32);
}

impl FloorId {
    /// The floor as a continuous shaft coordinate.
    #[inline]
    pub fn as_position(self) -> f64 {
        self.0 as f64
    }

    /// Number of floors between `self` and `other`.
    #[inline]
    pub fn distance(self, other: FloorId) -> u32 {
        self.0.abs_diff(other.0)
    }

    /// Reject floors that do not exist in a building of `floor_count` floors.
    pub fn ensure_within(self, floor_count: u32) -> LiftResult<()> {
        if self.0 < floor_count {
            Ok(())
        } else {
            Err(LiftError::FloorOutOfRange { floor: self, floor_count })
        }
    }
}

// ── SpawnPointId ──────────────────────────────────────────────────────────────

/// Identifies a spawn location as `"<floor>-<ordinal>"`, e.g. `"0-1"`.
///
/// Ordinals start at 1 and follow the locations' x order on their floor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPointId {
    pub floor:   FloorId,
    pub ordinal: u16,
}

impl SpawnPointId {
    #[inline]
    pub fn new(floor: FloorId, ordinal: u16) -> Self {
        Self { floor, ordinal }
    }
}

impl fmt::Display for SpawnPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.floor.0, self.ordinal)
    }
}

impl FromStr for SpawnPointId {
    type Err = LiftError;

    fn from_str(s: &str) -> LiftResult<Self> {
        let bad = || LiftError::Parse(format!("invalid spawn location {s:?}: expected \"<floor>-<n>\""));
        let (floor, ordinal) = s.trim().split_once('-').ok_or_else(bad)?;
        let floor = floor.parse::<u32>().map_err(|_| bad())?;
        let ordinal = ordinal.parse::<u16>().map_err(|_| bad())?;
        if ordinal == 0 {
            return Err(bad());
        }
        Ok(SpawnPointId::new(FloorId(floor), ordinal))
    }
}
