use serde_derive::{Deserialize, Serialize};
use std::path::Path;

use crate::detection::ClassMap;
use crate::error::Error;
use crate::tracker::TrackerConfig;
use crate::warning::WarningConfig;
use crate::zone::Zones;

/// Monitor configuration, read from JSON. Every field can be omitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub pedestrian_classes: Vec<String>,
    pub vehicle_classes: Vec<String>,
    pub zones: Zones,
    pub warning: WarningConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            pedestrian_classes: vec!["person".into(), "bicycle".into()],
            vehicle_classes: vec![
                "car".into(),
                "motorcycle".into(),
                "bus".into(),
                "truck".into(),
            ],
            zones: Zones::default(),
            warning: WarningConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path)?;

        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(data)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.tracker.validate()?;
        self.zones.validate()?;

        if !(self.warning.hold_seconds.is_finite() && self.warning.hold_seconds >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "warning.hold_seconds must be a non negative number, got {}",
                self.warning.hold_seconds
            )));
        }

        if let Some(label) = self
            .pedestrian_classes
            .iter()
            .find(|x| self.vehicle_classes.contains(*x))
        {
            return Err(Error::InvalidConfig(format!(
                "class `{}` is both a pedestrian and a vehicle class",
                label
            )));
        }

        Ok(())
    }

    pub fn class_map(&self) -> ClassMap {
        ClassMap::new(self.pedestrian_classes.clone(), self.vehicle_classes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::WarningTrigger;

    #[test]
    fn empty_json_gives_defaults() {
        let config = Config::from_json("{}").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.tracker.max_distance_to_assign, 15.0);
        assert_eq!(config.tracker.max_frames_to_skip, 10);
    }

    #[test]
    fn partial_sections() {
        let config = Config::from_json(
            r#"{
                "tracker": {"max_distance_to_assign": 40},
                "warning": {"trigger": "detections"},
                "zones": {
                    "crosswalk_up": [[0, 0], [100, 0], [100, 50]],
                    "crosswalk_down": [[0, 50], [100, 50], [100, 100]],
                    "road": [[0, 0], [10, 0], [10, 10], [0, 10]]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.tracker.max_distance_to_assign, 40.0);
        assert_eq!(config.tracker.large_cost_sentinel, 50_000.0);
        assert_eq!(config.warning.trigger, WarningTrigger::Detections);
        assert_eq!(config.warning.hold_seconds, 5.0);
        assert!(config.zones.road.contains(nalgebra::Point2::new(5.0, 5.0)));
        assert!(!config.zones.road.contains(nalgebra::Point2::new(50.0, 5.0)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_json(r#"{"tracker": {"max_distance_to_assign": -1}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"warning": {"hold_seconds": -2}}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"vehicle_classes": ["person"]}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"tracker": "x"}"#),
            Err(Error::JsonError(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"tracker": {"max_frames_to_skip": -1}}"#),
            Err(Error::JsonError(_))
        ));
    }
}
