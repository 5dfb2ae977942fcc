use serde_derive::{Deserialize, Serialize};

use crate::classify::{PedestrianTracking, VehicleTracking};
use crate::config::Config;
use crate::counters::Counters;
use crate::detection::{ClassMap, Detection, ObjectClass};
use crate::error::Error;
use crate::frame::Frame;
use crate::trace::TraceId;
use crate::tracker::Tracker;
use crate::warning::{Warning, WarningTrigger};
use crate::zone::Zones;

/// Outcome of one processed frame.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub timestamp: f64,
    pub new_vehicles: Vec<TraceId>,
    pub going_up: Vec<TraceId>,
    pub going_down: Vec<TraceId>,
    pub pedestrians_tracked: usize,
    pub vehicles_tracked: usize,
    pub warning_triggered: bool,
    pub warning_active: bool,
}

struct PedestrianCandidate<'a> {
    det: &'a Detection,
    up: bool,
    down: bool,
}

/// Crosswalk monitor: filters each frame's detections through the zones,
/// tracks pedestrians and vehicles, counts crossings and drives the warning.
///
/// Pedestrians of both crosswalk zones share one tracker so that somebody
/// walking from one zone into the other keeps the same id.
pub struct Monitor {
    classes: ClassMap,
    zones: Zones,
    trigger: WarningTrigger,
    pedestrian_tracker: Tracker,
    vehicle_tracker: Tracker,
    pedestrians: PedestrianTracking,
    vehicles: VehicleTracking,
    counters: Counters,
    warning: Warning,
}

impl Monitor {
    pub fn new(config: &Config) -> Self {
        Self {
            classes: config.class_map(),
            zones: config.zones.clone(),
            trigger: config.warning.trigger,
            pedestrian_tracker: Tracker::new(config.tracker),
            vehicle_tracker: Tracker::new(config.tracker),
            pedestrians: PedestrianTracking::new(),
            vehicles: VehicleTracking::new(),
            counters: Counters::new(),
            warning: Warning::new(config.warning.hold_seconds),
        }
    }

    #[inline]
    pub fn pedestrians(&self) -> &PedestrianTracking {
        &self.pedestrians
    }

    #[inline]
    pub fn vehicles(&self) -> &VehicleTracking {
        &self.vehicles
    }

    #[inline]
    pub fn pedestrian_tracker(&self) -> &Tracker {
        &self.pedestrian_tracker
    }

    #[inline]
    pub fn vehicle_tracker(&self) -> &Tracker {
        &self.vehicle_tracker
    }

    #[inline]
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    #[inline]
    pub fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    #[inline]
    pub fn is_warning_active(&self, timestamp: f64) -> bool {
        self.warning.is_active(timestamp)
    }

    fn pedestrian_candidates<'a>(&self, dets: &'a [Detection]) -> Vec<PedestrianCandidate<'a>> {
        dets.iter()
            .filter(|d| self.classes.classify(&d.label) == ObjectClass::Pedestrian)
            .filter_map(|det| {
                let c = det.center();
                let up = self.zones.crosswalk_up.contains(c);
                let down = self.zones.crosswalk_down.contains(c);

                if up || down {
                    Some(PedestrianCandidate { det, up, down })
                } else {
                    None
                }
            })
            .collect()
    }

    fn vehicle_candidates<'a>(&self, dets: &'a [Detection]) -> Vec<&'a Detection> {
        dets.iter()
            .filter(|d| self.classes.classify(&d.label) == ObjectClass::Vehicle)
            .filter(|d| self.zones.road.contains(d.center()))
            .collect()
    }

    pub fn process(&mut self, frame: &Frame) -> Result<FrameReport, Error> {
        let ts = frame.timestamp;

        let peds = self.pedestrian_candidates(&frame.crosswalk);
        let vehs = self.vehicle_candidates(&frame.road);

        let ped_points: Vec<_> = peds.iter().map(|p| p.det.center()).collect();
        let ped_assignment = self.pedestrian_tracker.assign_incoming_positions(&ped_points)?;

        let mut up_ids = Vec::new();
        let mut up_bboxes = Vec::new();
        let mut down_ids = Vec::new();
        let mut down_bboxes = Vec::new();

        for (cand, &id) in peds.iter().zip(&ped_assignment.associated_ids) {
            if cand.up {
                up_ids.push(id);
                up_bboxes.push(cand.det.clone());
            }

            if cand.down {
                down_ids.push(id);
                down_bboxes.push(cand.det.clone());
            }
        }

        let changes = self.pedestrians.update_pos(
            &ped_assignment.retired_ids,
            &up_ids,
            up_bboxes,
            &down_ids,
            down_bboxes,
        );

        let veh_points: Vec<_> = vehs.iter().map(|d| d.center()).collect();
        let veh_assignment = self.vehicle_tracker.assign_incoming_positions(&veh_points)?;

        let new_vehicles = self.vehicles.update_pos(
            &veh_assignment.retired_ids,
            &veh_assignment.associated_ids,
            vehs.iter().map(|&d| d.clone()).collect(),
        );

        self.counters.add_vehicles(new_vehicles.len() as u64);
        self.counters.add_peds_up(changes.going_up.len() as u64);
        self.counters.add_peds_down(changes.going_down.len() as u64);

        let warning_triggered = match self.trigger {
            WarningTrigger::Tracked => {
                self.vehicles.any_currently_tracked() && self.pedestrians.any_currently_tracked()
            }
            WarningTrigger::Detections => !vehs.is_empty() && !peds.is_empty(),
        };

        if warning_triggered {
            self.warning.trigger(ts);
        }

        tracing::debug!(
            timestamp = ts,
            crosswalk_detections = frame.crosswalk.len(),
            road_detections = frame.road.len(),
            pedestrians = peds.len(),
            vehicles = vehs.len(),
            new_vehicles = new_vehicles.len(),
            going_up = changes.going_up.len(),
            going_down = changes.going_down.len(),
            "frame processed"
        );

        Ok(FrameReport {
            timestamp: ts,
            new_vehicles,
            going_up: changes.going_up,
            going_down: changes.going_down,
            pedestrians_tracked: self.pedestrians.tracked_bboxes().len(),
            vehicles_tracked: self.vehicles.tracked_bboxes().len(),
            warning_triggered,
            warning_active: self.warning.is_active(ts),
        })
    }
}
