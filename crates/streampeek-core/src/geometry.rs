// crates/streampeek-core/src/geometry.rs
//
// Minimal point/size/rect types shared between the controller, the drag
// math, and the link classifier. streampeek-ui converts to and from egui's
// own geometry at the boundary — this crate stays egui-free.

/// A point in screen coordinates (logical pixels, origin top-left).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width × height in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle, `min` = top-left.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub min: Pos,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { min: Pos::new(x, y), size: Size::new(w, h) }
    }

    pub fn from_pos_size(min: Pos, size: Size) -> Self {
        Self { min, size }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn right(&self) -> f32 {
        self.min.x + self.size.w
    }

    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.h
    }

    pub fn width(&self) -> f32 {
        self.size.w
    }

    /// True iff `p` lies within the rect (edges inclusive).
    pub fn contains(&self, p: Pos) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_edge_inclusive() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Pos::new(10.0, 20.0)));
        assert!(r.contains(Pos::new(110.0, 70.0)));
        assert!(!r.contains(Pos::new(110.1, 70.0)));
        assert!(!r.contains(Pos::new(9.9, 20.0)));
    }

    #[test]
    fn edges_derive_from_min_and_size() {
        let r = Rect::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.bottom(), 14.0);
    }
}
