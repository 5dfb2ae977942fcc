use serde_derive::{Deserialize, Serialize};

/// What has to be present in a frame to fire the warning.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningTrigger {
    /// Some vehicle and some pedestrian are currently tracked.
    Tracked,
    /// The frame itself has a vehicle in the road zone and a pedestrian in a
    /// crosswalk zone.
    Detections,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct WarningConfig {
    pub trigger: WarningTrigger,
    /// How long the warning stays on after the last trigger, in seconds of
    /// frame time.
    pub hold_seconds: f64,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            trigger: WarningTrigger::Tracked,
            hold_seconds: 5.0,
        }
    }
}

/// Warning signal state. Every trigger restarts the hold period.
#[derive(Debug, Clone)]
pub struct Warning {
    hold_seconds: f64,
    active_until: Option<f64>,
}

impl Warning {
    pub fn new(hold_seconds: f64) -> Self {
        assert!(hold_seconds >= 0.0);

        Self {
            hold_seconds,
            active_until: None,
        }
    }

    pub fn trigger(&mut self, timestamp: f64) {
        if !self.is_active(timestamp) {
            tracing::info!(timestamp, "warning activated");
        }

        self.active_until = Some(timestamp + self.hold_seconds);
    }

    #[inline]
    pub fn is_active(&self, timestamp: f64) -> bool {
        self.active_until.map_or(false, |until| timestamp < until)
    }
}
