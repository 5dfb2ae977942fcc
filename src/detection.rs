use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb, Xywh};

/// Single detection coming out of the external detector: class label,
/// rectangle corners and the center point the trackers work with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "DetectionRecord")]
pub struct Detection {
    pub label: String,
    #[serde(rename = "p")]
    pub confidence: f32,
    pub bbox: BBox<Ltrb>,
    center: [f32; 2],
}

impl Detection {
    /// Center is derived from the rectangle.
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BBox<Ltrb>) -> Self {
        let c = bbox.center();

        Self {
            label: label.into(),
            confidence,
            bbox,
            center: [c.x, c.y],
        }
    }

    /// Some detectors report their own center, keep it as is.
    pub fn with_center(
        label: impl Into<String>,
        confidence: f32,
        bbox: BBox<Ltrb>,
        center: na::Point2<f32>,
    ) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
            center: [center.x, center.y],
        }
    }

    #[inline(always)]
    pub fn center(&self) -> na::Point2<f32> {
        na::Point2::new(self.center[0], self.center[1])
    }
}

/// Wire form of a detection. The rectangle comes either as corners (`bbox`)
/// or as center and size (`xywh`).
#[derive(Deserialize)]
struct DetectionRecord {
    label: String,
    #[serde(rename = "p", default = "full_confidence")]
    confidence: f32,
    #[serde(default)]
    bbox: Option<BBox<Ltrb>>,
    #[serde(default)]
    xywh: Option<BBox<Xywh>>,
    #[serde(default)]
    center: Option<[f32; 2]>,
}

fn full_confidence() -> f32 {
    1.0
}

impl TryFrom<DetectionRecord> for Detection {
    type Error = String;

    fn try_from(r: DetectionRecord) -> Result<Self, Self::Error> {
        let (bbox, reported) = match (r.bbox, r.xywh) {
            (Some(bbox), _) => (bbox, None),
            (None, Some(xywh)) => (xywh.as_ltrb(), Some([xywh.cx(), xywh.cy()])),
            (None, None) => {
                return Err(format!("detection `{}` has neither `bbox` nor `xywh`", r.label));
            }
        };

        Ok(match r.center.or(reported) {
            Some([x, y]) => {
                Detection::with_center(r.label, r.confidence, bbox, na::Point2::new(x, y))
            }
            None => Detection::new(r.label, r.confidence, bbox),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    Pedestrian,
    Vehicle,
    Other,
}

/// Maps detector labels to the classes the monitor cares about.
#[derive(Debug, Clone)]
pub struct ClassMap {
    pedestrian: Vec<String>,
    vehicle: Vec<String>,
}

impl ClassMap {
    pub fn new(pedestrian: Vec<String>, vehicle: Vec<String>) -> Self {
        Self {
            pedestrian,
            vehicle,
        }
    }

    pub fn classify(&self, label: &str) -> ObjectClass {
        if self.pedestrian.iter().any(|x| x == label) {
            ObjectClass::Pedestrian
        } else if self.vehicle.iter().any(|x| x == label) {
            ObjectClass::Vehicle
        } else {
            ObjectClass::Other
        }
    }
}
