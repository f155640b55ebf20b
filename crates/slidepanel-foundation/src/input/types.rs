use crate::geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample delivered by the host.
///
/// `position` is in container coordinates. `uptime_ms` is a monotonic
/// timestamp used for velocity tracking; only differences between samples of
/// one stream matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub uptime_ms: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, uptime_ms: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            uptime_ms,
        }
    }

    pub fn down(x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), uptime_ms)
    }

    pub fn moved(x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), uptime_ms)
    }

    pub fn up(x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), uptime_ms)
    }

    pub fn cancel(x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y), uptime_ms)
    }

    /// Tags the event with a pointer id.
    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Whether this event ends the gesture stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    Horizontal = 0,
    Vertical = 1,
}

/// Set of axes a nested scroll is happening on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollAxes(u8);

impl ScrollAxes {
    pub const NONE: Self = Self(0);
    pub const HORIZONTAL: Self = Self(1 << ScrollAxis::Horizontal as u8);
    pub const VERTICAL: Self = Self(1 << ScrollAxis::Vertical as u8);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, axis: ScrollAxis) -> Self {
        self.insert(axis);
        self
    }

    pub fn insert(&mut self, axis: ScrollAxis) {
        self.0 |= 1 << (axis as u8);
    }

    pub fn remove(&mut self, axis: ScrollAxis) {
        self.0 &= !(1 << (axis as u8));
    }

    pub fn contains(&self, axis: ScrollAxis) -> bool {
        (self.0 & (1 << (axis as u8))) != 0
    }

    pub fn is_vertical(&self) -> bool {
        self.contains(ScrollAxis::Vertical)
    }
}

impl Default for ScrollAxes {
    fn default() -> Self {
        Self::NONE
    }
}
