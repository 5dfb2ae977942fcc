use serde_derive::{Deserialize, Serialize};

use crate::detection::Detection;

/// Detections of both cameras for one processing cycle.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Frame {
    pub timestamp: f64, // in seconds
    #[serde(default)]
    pub crosswalk: Vec<Detection>,
    #[serde(default)]
    pub road: Vec<Detection>,
}

impl Frame {
    pub fn new(timestamp: f64, crosswalk: Vec<Detection>, road: Vec<Detection>) -> Self {
        Self {
            timestamp,
            crosswalk,
            road,
        }
    }
}
