//! The penalty model: a time- and priority-weighted cost of serving one
//! passenger.
//!
//! With `X` = request time, `Y` = assignment time, `Z` = delivery time:
//!
//! ```text
//! before assignment : (now - X) * apc * cipc
//! before delivery   : ((Y - X) * apc + (now - Y) * dpc) * cipc
//! delivered (final) : ((Y - X) * apc + (Z - Y) * dpc) * cipc
//! ```
//!
//! Once `Z` is set the value no longer depends on `now`.

/// Passenger importance, fixed at spawn.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    #[default]
    Normal,
    High,
}

impl Priority {
    /// The coefficient set attached to this priority.
    #[inline]
    pub fn coefficients(self) -> PenaltyCoefficients {
        match self {
            Priority::Normal => PenaltyCoefficients::NORMAL,
            Priority::High   => PenaltyCoefficients::HIGH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::High   => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weights applied to the waiting and riding parts of a passenger's service.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyCoefficients {
    /// Assignment coefficient: weight of time spent before a car is chosen.
    pub apc: f64,
    /// Delivery coefficient: weight of time from assignment to delivery.
    pub dpc: f64,
    /// Importance coefficient: multiplies the whole sum.
    pub cipc: f64,
}

impl PenaltyCoefficients {
    pub const NORMAL: PenaltyCoefficients = PenaltyCoefficients { apc: 1.0, dpc: 2.0, cipc: 1.0 };
    pub const HIGH:   PenaltyCoefficients = PenaltyCoefficients { apc: 3.0, dpc: 4.0, cipc: 2.0 };
}

/// The three service timestamps of a passenger, in simulated seconds.
///
/// `assignment` and `delivery` start unset and are each written once.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceTimes {
    pub request:    f64,
    pub assignment: Option<f64>,
    pub delivery:   Option<f64>,
}

impl ServiceTimes {
    pub fn requested_at(request: f64) -> Self {
        Self { request, assignment: None, delivery: None }
    }
}

/// Penalty accrued up to `now`.
///
/// Pure: the result depends only on the arguments.  After delivery the
/// result is the final score and `now` is ignored.
pub fn penalty(coeffs: PenaltyCoefficients, times: &ServiceTimes, now: f64) -> f64 {
    let Some(assigned) = times.assignment else {
        return (now - times.request) * coeffs.apc * coeffs.cipc;
    };
    let waiting = (assigned - times.request) * coeffs.apc;
    let riding  = (times.delivery.unwrap_or(now) - assigned) * coeffs.dpc;
    (waiting + riding) * coeffs.cipc
}
