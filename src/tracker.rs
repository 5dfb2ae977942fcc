use munkres::{solve_assignment, WeightMatrix};
use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::error::Error;
use crate::math;
use crate::trace::{Trace, TraceId};

/// Tracker tuning.
///
/// `large_cost_sentinel` replaces every distance above
/// `max_distance_to_assign` in the cost matrix. It has to dominate any real
/// distance in the frame's coordinate space (sentinel >> max distance >> any
/// distance between objects), otherwise the solver may pick a capped pair over
/// a valid one. It is not derived from the frame size, so a change of camera
/// resolution needs it re-tuned.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub max_distance_to_assign: f32,
    pub max_frames_to_skip: u32,
    pub large_cost_sentinel: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance_to_assign: 15.0,
            max_frames_to_skip: 10,
            large_cost_sentinel: 50_000.0,
        }
    }
}

impl TrackerConfig {
    pub fn new(max_distance_to_assign: f32, max_frames_to_skip: u32) -> Self {
        Self {
            max_distance_to_assign,
            max_frames_to_skip,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.max_distance_to_assign.is_finite() && self.max_distance_to_assign > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "max_distance_to_assign must be a positive number, got {}",
                self.max_distance_to_assign
            )));
        }

        if !(self.large_cost_sentinel.is_finite()
            && self.large_cost_sentinel > self.max_distance_to_assign)
        {
            return Err(Error::InvalidConfig(format!(
                "large_cost_sentinel ({}) must be finite and greater than max_distance_to_assign ({})",
                self.large_cost_sentinel, self.max_distance_to_assign
            )));
        }

        Ok(())
    }
}

/// Result of one [`Tracker::assign_incoming_positions`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// Trace id of every incoming position, index aligned with the input.
    pub associated_ids: Vec<TraceId>,
    /// Traces dropped during this call, in no particular order.
    pub retired_ids: Vec<TraceId>,
}

/// Frame to frame centroid tracker.
///
/// Incoming positions are matched against the last observed position of every
/// active trace by solving the minimum cost assignment over euclidean
/// distances. Unmatched positions start new traces, unmatched traces skip a
/// frame and are dropped once they skipped more than `max_frames_to_skip`
/// frames in a row.
#[derive(Debug)]
pub struct Tracker {
    config: TrackerConfig,
    active_traces: Vec<Trace>,
    next_trace_id: TraceId,
}

impl Tracker {
    /// # Panics
    ///
    /// Panics on a config rejected by [`TrackerConfig::validate`].
    pub fn new(config: TrackerConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("{}", err);
        }

        Self {
            config,
            active_traces: Vec::with_capacity(32),
            next_trace_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn active_traces(&self) -> &[Trace] {
        &self.active_traces
    }

    #[inline]
    pub fn next_trace_id(&self) -> TraceId {
        self.next_trace_id
    }

    fn new_trace(&mut self, pos: na::Point2<f32>) -> TraceId {
        let id = self.next_trace_id;
        self.next_trace_id += 1;
        self.active_traces.push(Trace::new(id, pos));

        tracing::debug!(id, x = pos.x, y = pos.y, "trace started");

        id
    }

    fn retire_stale(&mut self) -> Vec<TraceId> {
        let max_skip = self.config.max_frames_to_skip;
        let mut retired = Vec::new();

        self.active_traces.retain(|t| {
            if t.skipped_frames() > max_skip {
                tracing::debug!(id = t.id(), "trace retired");
                retired.push(t.id());
                false
            } else {
                true
            }
        });

        retired
    }

    /// Returns `(trace_index, position_index)` pairs accepted for this frame.
    fn solve(&self, new_positions: &[na::Point2<f32>]) -> Result<Vec<(usize, usize)>, Error> {
        let max_dist = self.config.max_distance_to_assign;
        let sentinel = self.config.large_cost_sentinel;

        let last_positions: Vec<_> = self
            .active_traces
            .iter()
            .map(Trace::last_known_position)
            .collect();

        let mut costs = math::cost_matrix(&last_positions, new_positions);
        assert_eq!(costs.dim(), (last_positions.len(), new_positions.len()));

        costs.mapv_inplace(|c| if c > max_dist { sentinel } else { c });

        let (rows, cols) = costs.dim();
        let n = rows.max(cols);

        // munkres wants a square matrix, padding cells share one value so
        // they do not change which real pairs are optimal
        let mut mat = WeightMatrix::from_fn(n, |(r, c)| {
            if r < rows && c < cols {
                costs[[r, c]] as f64
            } else {
                sentinel as f64
            }
        });

        let solution =
            solve_assignment(&mut mat).map_err(|err| Error::Unsolvable(format!("{:?}", err)))?;

        Ok(solution
            .into_iter()
            .filter(|p| p.row < rows && p.column < cols)
            .filter(|p| costs[[p.row, p.column]] < max_dist)
            .map(|p| (p.row, p.column))
            .collect())
    }

    /// Associates this frame's positions with active traces.
    ///
    /// Every position gets exactly one id, either of the trace it was
    /// matched to or of a trace started for it.
    pub fn assign_incoming_positions(
        &mut self,
        new_positions: &[na::Point2<f32>],
    ) -> Result<Assignment, Error> {
        let mut matched: Vec<Option<TraceId>> = vec![None; new_positions.len()];
        let mut retired_ids = Vec::new();

        if !self.active_traces.is_empty() {
            let mut assigned = vec![false; self.active_traces.len()];

            if !new_positions.is_empty() {
                for (ti, pi) in self.solve(new_positions)? {
                    let trace = &mut self.active_traces[ti];
                    trace.add_position(new_positions[pi]);
                    matched[pi] = Some(trace.id());
                    assigned[ti] = true;
                }
            }

            for (trace, assigned) in self.active_traces.iter_mut().zip(assigned) {
                if !assigned {
                    trace.skipped();
                }
            }

            retired_ids = self.retire_stale();
        }

        let associated_ids = matched
            .into_iter()
            .zip(new_positions)
            .map(|(id, pos)| match id {
                Some(id) => id,
                None => self.new_trace(*pos),
            })
            .collect();

        Ok(Assignment {
            associated_ids,
            retired_ids,
        })
    }
}
