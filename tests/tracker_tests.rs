//! Tracker behaviour over long frame sequences.

use crossguard::{Tracker, TrackerConfig};
use nalgebra as na;
use std::collections::HashSet;

fn pt(x: f32, y: f32) -> na::Point2<f32> {
    na::Point2::new(x, y)
}

/// Small deterministic generator, good enough to scatter points.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn coord(&mut self) -> f32 {
        (self.next() % 640) as f32
    }
}

#[test]
fn every_position_gets_one_id() {
    let mut tracker = Tracker::new(TrackerConfig::new(15.0, 3));
    let mut rng = Lcg(7);

    for _ in 0..200 {
        let n = (rng.next() % 6) as usize;
        let positions: Vec<_> = (0..n).map(|_| pt(rng.coord(), rng.coord())).collect();

        let res = tracker.assign_incoming_positions(&positions).unwrap();
        assert_eq!(res.associated_ids.len(), positions.len());

        let unique: HashSet<_> = res.associated_ids.iter().collect();
        assert_eq!(unique.len(), positions.len(), "one trace per position");

        for id in &res.associated_ids {
            assert!(tracker.active_traces().iter().any(|t| t.id() == *id));
        }
    }
}

#[test]
fn ids_are_never_reused() {
    let mut tracker = Tracker::new(TrackerConfig::new(15.0, 1));
    let mut rng = Lcg(42);
    let mut retired = HashSet::new();
    let mut last_next = tracker.next_trace_id();

    for _ in 0..300 {
        let n = (rng.next() % 4) as usize;
        let positions: Vec<_> = (0..n).map(|_| pt(rng.coord(), rng.coord())).collect();

        let res = tracker.assign_incoming_positions(&positions).unwrap();

        for id in &res.associated_ids {
            assert!(!retired.contains(id), "retired id {} came back", id);
        }

        for id in res.retired_ids {
            assert!(retired.insert(id), "id {} retired twice", id);
        }

        assert!(tracker.next_trace_id() >= last_next);
        last_next = tracker.next_trace_id();
    }

    assert!(!retired.is_empty());
}

#[test]
fn skip_counts_match_history() {
    let mut tracker = Tracker::new(TrackerConfig::new(15.0, 5));
    let mut rng = Lcg(3);

    for _ in 0..100 {
        let n = (rng.next() % 3) as usize;
        let positions: Vec<_> = (0..n).map(|_| pt(rng.coord() / 8.0, rng.coord() / 8.0)).collect();
        tracker.assign_incoming_positions(&positions).unwrap();

        for t in tracker.active_traces() {
            let trailing = t
                .positions()
                .iter()
                .rev()
                .take_while(|p| p.point().is_none())
                .count();

            assert_eq!(trailing as u32, t.skipped_frames());
            assert!(t.skipped_frames() <= 5);
        }
    }
}

#[test]
fn two_walkers_crossing_paths_keep_ids() {
    // two objects moving towards each other on parallel lanes 10px apart
    let mut tracker = Tracker::new(TrackerConfig::new(15.0, 10));

    let first = tracker
        .assign_incoming_positions(&[pt(0.0, 0.0), pt(100.0, 10.0)])
        .unwrap();
    assert_eq!(first.associated_ids, vec![0, 1]);

    for i in 1..=20 {
        let step = i as f32 * 5.0;
        // feed in reverse order to make sure ids follow positions, not indices
        let res = tracker
            .assign_incoming_positions(&[pt(100.0 - step, 10.0), pt(step, 0.0)])
            .unwrap();

        assert_eq!(res.associated_ids, vec![1, 0], "frame {}", i);
        assert!(res.retired_ids.is_empty());
    }
}

#[test]
fn far_jump_retires_old_trace_later() {
    let mut tracker = Tracker::new(TrackerConfig::new(15.0, 2));
    tracker.assign_incoming_positions(&[pt(0.0, 0.0)]).unwrap();

    let mut retired = Vec::new();
    for _ in 0..3 {
        let res = tracker.assign_incoming_positions(&[pt(100.0, 100.0)]).unwrap();
        assert_eq!(res.associated_ids, vec![1]);
        retired.extend(res.retired_ids);
    }

    assert_eq!(retired, vec![0]);
    assert_eq!(tracker.active_traces().len(), 1);
    assert_eq!(tracker.active_traces()[0].id(), 1);
}
