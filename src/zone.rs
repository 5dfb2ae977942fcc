use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::error::Error;
use crate::math::in_bounds;

/// Region of interest polygon in frame coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "Vec<[f32; 2]>", into = "Vec<[f32; 2]>")]
pub struct Zone {
    poly: Vec<na::Point2<f32>>,
}

impl Zone {
    pub fn new(poly: Vec<na::Point2<f32>>) -> Self {
        Self { poly }
    }

    /// Zone covering the whole `width x height` frame.
    pub fn full_frame(width: f32, height: f32) -> Self {
        Self::new(vec![
            na::Point2::new(0.0, 0.0),
            na::Point2::new(width, 0.0),
            na::Point2::new(width, height),
            na::Point2::new(0.0, height),
        ])
    }

    #[inline]
    pub fn contains(&self, p: na::Point2<f32>) -> bool {
        in_bounds(p, &self.poly)
    }

    pub fn validate(&self, name: &str) -> Result<(), Error> {
        if self.poly.len() < 3 {
            return Err(Error::InvalidConfig(format!(
                "zone `{}` needs at least 3 vertices, got {}",
                name,
                self.poly.len()
            )));
        }

        if self.poly.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(Error::InvalidConfig(format!(
                "zone `{}` has a non finite vertex",
                name
            )));
        }

        Ok(())
    }
}

impl From<Vec<[f32; 2]>> for Zone {
    fn from(v: Vec<[f32; 2]>) -> Self {
        Self::new(v.into_iter().map(|[x, y]| na::Point2::new(x, y)).collect())
    }
}

impl From<Zone> for Vec<[f32; 2]> {
    fn from(z: Zone) -> Self {
        z.poly.into_iter().map(|p| [p.x, p.y]).collect()
    }
}

/// The three regions the monitor filters detections with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Zones {
    pub crosswalk_up: Zone,
    pub crosswalk_down: Zone,
    pub road: Zone,
}

impl Default for Zones {
    fn default() -> Self {
        let frame = Zone::full_frame(640.0, 480.0);

        Self {
            crosswalk_up: frame.clone(),
            crosswalk_down: frame.clone(),
            road: frame,
        }
    }
}

impl Zones {
    pub fn validate(&self) -> Result<(), Error> {
        self.crosswalk_up.validate("crosswalk_up")?;
        self.crosswalk_down.validate("crosswalk_down")?;
        self.road.validate("road")
    }
}
