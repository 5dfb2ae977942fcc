use nalgebra as na;

pub type TraceId = u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TracePosition {
    Present(na::Point2<f32>),
    Skipped,
}

impl TracePosition {
    #[inline]
    pub fn point(&self) -> Option<na::Point2<f32>> {
        match self {
            TracePosition::Present(p) => Some(*p),
            TracePosition::Skipped => None,
        }
    }
}

/// Position history of one tracked object.
///
/// `skipped_frames` always equals the number of trailing `Skipped` entries in
/// the history.
#[derive(Debug, Clone)]
pub struct Trace {
    id: TraceId,
    positions: Vec<TracePosition>,
    skipped_frames: u32,
}

impl Trace {
    pub fn new(id: TraceId, initial: na::Point2<f32>) -> Self {
        Self {
            id,
            positions: vec![TracePosition::Present(initial)],
            skipped_frames: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> TraceId {
        self.id
    }

    #[inline]
    pub fn skipped_frames(&self) -> u32 {
        self.skipped_frames
    }

    #[inline]
    pub fn positions(&self) -> &[TracePosition] {
        &self.positions
    }

    /// Last position that was actually observed.
    pub fn last_known_position(&self) -> na::Point2<f32> {
        self.positions
            .iter()
            .rev()
            .find_map(TracePosition::point)
            .unwrap_or_else(|| unreachable!("trace {} has no observed position", self.id))
    }

    pub fn add_position(&mut self, pos: na::Point2<f32>) {
        self.positions.push(TracePosition::Present(pos));
        self.skipped_frames = 0;
    }

    pub fn skipped(&mut self) {
        self.positions.push(TracePosition::Skipped);
        self.skipped_frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_follow_trailing_history() {
        let mut t = Trace::new(7, na::Point2::new(1.0, 2.0));
        t.skipped();
        t.skipped();

        assert_eq!(t.skipped_frames(), 2);
        assert_eq!(t.positions()[2], TracePosition::Skipped);
        assert_eq!(t.last_known_position(), na::Point2::new(1.0, 2.0));

        t.add_position(na::Point2::new(3.0, 4.0));
        t.skipped();

        assert_eq!(t.skipped_frames(), 1);
        assert_eq!(t.positions().len(), 5);
        assert_eq!(t.last_known_position(), na::Point2::new(3.0, 4.0));
        assert_eq!(
            t.positions().iter().filter_map(TracePosition::point).collect::<Vec<_>>(),
            vec![na::Point2::new(1.0, 2.0), na::Point2::new(3.0, 4.0)]
        );
    }
}
