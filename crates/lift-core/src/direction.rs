//! Travel direction shared by passengers and cars.

use crate::FloorId;

/// Which way a car is (or was last) travelling.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`, or `None` when they are equal.
    #[inline]
    pub fn between(from: FloorId, to: FloorId) -> Option<Direction> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Direction::Up),
            std::cmp::Ordering::Less    => Some(Direction::Down),
            std::cmp::Ordering::Equal   => None,
        }
    }

    /// `true` if `floor` lies strictly beyond `origin` in this direction.
    #[inline]
    pub fn is_ahead(self, origin: FloorId, floor: FloorId) -> bool {
        match self {
            Direction::Up   => floor > origin,
            Direction::Down => floor < origin,
        }
    }

    #[inline]
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up   => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// `+1.0` for up, `-1.0` for down.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up   => 1.0,
            Direction::Down => -1.0,
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
