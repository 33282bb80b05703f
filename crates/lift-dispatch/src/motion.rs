//! Car motion state and kinematic parameters.

/// What the car is physically doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionState {
    /// Doors closed, no pending stops.
    #[default]
    Idle,
    /// Travelling toward the head of the target sequence.
    Moving,
    /// Stopped at a floor with doors open for `dwell_secs` so far.
    DoorOpen { dwell_secs: f64 },
}

impl MotionState {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionState::Idle            => "idle",
            MotionState::Moving          => "moving",
            MotionState::DoorOpen { .. } => "door_open",
        }
    }

    #[inline]
    pub fn doors_open(self) -> bool {
        matches!(self, MotionState::DoorOpen { .. })
    }
}

impl std::fmt::Display for MotionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-car kinematics and planning bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarParams {
    /// Travel speed in floors per second.
    pub speed_floors_per_sec: f64,
    /// How long doors stay open once nobody is walking toward them.
    pub door_dwell_secs: f64,
    /// Slack when deciding that the car has reached a floor.
    pub arrival_epsilon: f64,
    /// Upper bound on the length of the look-ahead sequence.
    pub max_lookahead: usize,
}

impl Default for CarParams {
    fn default() -> Self {
        Self {
            // 150 units/s over 160-unit floors.
            speed_floors_per_sec: 0.9375,
            door_dwell_secs:      2.0,
            arrival_epsilon:      1e-6,
            max_lookahead:        32,
        }
    }
}
