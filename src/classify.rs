use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::detection::Detection;
use crate::trace::TraceId;

/// Crosswalk zone a pedestrian was last seen in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Detection tagged with the direction of the zone it was assigned in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackedBox {
    pub detection: Detection,
    pub direction: Direction,
}

/// Keeps the last box of every tracked pedestrian and reports the ones whose
/// zone changed.
#[derive(Debug, Default)]
pub struct PedestrianTracking {
    positions: HashMap<TraceId, TrackedBox>,
}

/// Ids whose direction flipped in one `update_pos` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionChanges {
    pub going_up: Vec<TraceId>,
    pub going_down: Vec<TraceId>,
}

impl PedestrianTracking {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn any_currently_tracked(&self) -> bool {
        !self.positions.is_empty()
    }

    #[inline]
    pub fn tracked_bboxes(&self) -> &HashMap<TraceId, TrackedBox> {
        &self.positions
    }

    /// Drops `retired` ids, then stores the up zone boxes followed by the down
    /// zone boxes.
    ///
    /// An id already stored with the other direction is reported as going in
    /// the new one. Flips are only seen at the moment of reassignment, an id
    /// that alternates zones every frame gets reported every frame.
    pub fn update_pos(
        &mut self,
        retired: &[TraceId],
        up_ids: &[TraceId],
        up_bboxes: Vec<Detection>,
        down_ids: &[TraceId],
        down_bboxes: Vec<Detection>,
    ) -> DirectionChanges {
        assert_eq!(up_ids.len(), up_bboxes.len());
        assert_eq!(down_ids.len(), down_bboxes.len());

        for id in retired {
            self.positions.remove(id);
        }

        let mut changes = DirectionChanges::default();

        let zones = [
            (up_ids, up_bboxes, Direction::Up),
            (down_ids, down_bboxes, Direction::Down),
        ];

        for (ids, bboxes, direction) in zones {
            for (&id, det) in ids.iter().zip(bboxes.into_iter()) {
                let flipped = self
                    .positions
                    .get(&id)
                    .map_or(false, |prev| prev.direction == direction.opposite());

                if flipped {
                    match direction {
                        Direction::Up => changes.going_up.push(id),
                        Direction::Down => changes.going_down.push(id),
                    }
                }

                self.positions.insert(
                    id,
                    TrackedBox {
                        detection: det,
                        direction,
                    },
                );
            }
        }

        changes
    }
}

/// Keeps the last box of every tracked vehicle and reports first sightings.
#[derive(Debug, Default)]
pub struct VehicleTracking {
    positions: HashMap<TraceId, Detection>,
}

impl VehicleTracking {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn any_currently_tracked(&self) -> bool {
        !self.positions.is_empty()
    }

    #[inline]
    pub fn tracked_bboxes(&self) -> &HashMap<TraceId, Detection> {
        &self.positions
    }

    /// Drops `retired` ids and stores the present boxes. Returns the ids that
    /// were not tracked before this call.
    pub fn update_pos(
        &mut self,
        retired: &[TraceId],
        present_ids: &[TraceId],
        bboxes: Vec<Detection>,
    ) -> Vec<TraceId> {
        assert_eq!(present_ids.len(), bboxes.len());

        for id in retired {
            self.positions.remove(id);
        }

        let mut are_new = Vec::new();
        for (&id, det) in present_ids.iter().zip(bboxes.into_iter()) {
            if self.positions.insert(id, det).is_none() {
                are_new.push(id);
            }
        }

        are_new
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BBox;

    fn det(x: f32) -> Detection {
        Detection::new("person", 1.0, BBox::ltrb(x, 0.0, x + 10.0, 20.0))
    }

    #[test]
    fn pedestrian_flip_reported_once() {
        let mut p = PedestrianTracking::new();

        let c = p.update_pos(&[], &[3], vec![det(0.0)], &[], vec![]);
        assert_eq!(c, DirectionChanges::default());

        let c = p.update_pos(&[], &[3], vec![det(1.0)], &[], vec![]);
        assert_eq!(c, DirectionChanges::default());

        let c = p.update_pos(&[], &[], vec![], &[3], vec![det(2.0)]);
        assert_eq!(c.going_down, vec![3]);
        assert!(c.going_up.is_empty());

        let c = p.update_pos(&[], &[], vec![], &[3], vec![det(3.0)]);
        assert_eq!(c, DirectionChanges::default());

        assert_eq!(p.tracked_bboxes()[&3].direction, Direction::Down);
        assert_eq!(p.tracked_bboxes()[&3].detection, det(3.0));
    }

    #[test]
    fn pedestrian_in_both_zones_ends_down() {
        let mut p = PedestrianTracking::new();
        p.update_pos(&[], &[1], vec![det(0.0)], &[], vec![]);

        let c = p.update_pos(&[], &[1], vec![det(0.0)], &[1], vec![det(0.0)]);
        assert_eq!(c.going_down, vec![1]);
        assert_eq!(p.tracked_bboxes()[&1].direction, Direction::Down);
    }

    #[test]
    fn retired_pedestrian_forgets_direction() {
        let mut p = PedestrianTracking::new();
        p.update_pos(&[], &[5], vec![det(0.0)], &[], vec![]);
        assert!(p.any_currently_tracked());

        p.update_pos(&[5], &[], vec![], &[], vec![]);
        assert!(!p.any_currently_tracked());

        let c = p.update_pos(&[], &[], vec![], &[5], vec![det(0.0)]);
        assert!(c.going_down.is_empty());
    }

    #[test]
    fn vehicle_new_only_once() {
        let mut v = VehicleTracking::new();

        assert_eq!(v.update_pos(&[], &[0, 1], vec![det(0.0), det(50.0)]), vec![0, 1]);
        assert!(v.update_pos(&[], &[0, 1], vec![det(1.0), det(51.0)]).is_empty());
        assert_eq!(v.update_pos(&[0], &[1, 2], vec![det(52.0), det(90.0)]), vec![2]);

        assert_eq!(v.tracked_bboxes().len(), 2);
        assert!(!v.tracked_bboxes().contains_key(&0));
    }
}
