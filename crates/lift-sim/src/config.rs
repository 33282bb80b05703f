//! Run configuration: cars, kinematics, walking, and the clock.

use lift_core::SimConfig;
use lift_dispatch::CarParams;
use lift_passenger::WalkParams;

/// One car's identity on screen: its name and where its doors are.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarSpec {
    pub name:   String,
    pub door_x: f32,
}

impl CarSpec {
    pub fn new(name: impl Into<String>, door_x: f32) -> Self {
        Self { name: name.into(), door_x }
    }

    /// The standard two-car layout on an 800-unit floor: `A` left of
    /// centre, `B` right of it.
    pub fn default_pair() -> Vec<CarSpec> {
        vec![CarSpec::new("A", 350.0), CarSpec::new("B", 450.0)]
    }
}

/// Everything tunable about a run, loadable from a config file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    pub sim:  SimConfig,
    pub car:  CarParams,
    pub walk: WalkParams,
    pub cars: Vec<CarSpec>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sim:  SimConfig::default(),
            car:  CarParams::default(),
            walk: WalkParams::default(),
            cars: CarSpec::default_pair(),
        }
    }
}
