use crate::{CellId, ColumnKey, Point, Size};

/// What a drag gesture is resizing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionTarget {
    Header(ColumnKey),
    Cell(CellId),
}

/// State for one drag gesture, from pointer-down to pointer-up.
///
/// For header sessions only `width` is meaningful in `start` and `latest`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    pub target: SessionTarget,
    pub origin: Point,
    pub start: Size,
    pub latest: Size,
    active: bool,
}

impl ResizeSession {
    pub fn begin(target: SessionTarget, origin: Point, start: Size) -> Self {
        Self {
            target,
            origin,
            start,
            latest: start,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Records the latest candidate. Ignored once the session has ended.
    pub fn update(&mut self, latest: Size) {
        if self.active {
            self.latest = latest;
        }
    }

    /// Ends the gesture and returns the final candidate.
    pub fn end(&mut self) -> Size {
        self.active = false;
        self.latest
    }

    pub fn delta_x(&self, pointer: Point) -> f32 {
        pointer.x - self.origin.x
    }
}
