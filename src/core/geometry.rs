use glam::Vec2;

/// The rectangle the entity lives in, in CSS pixels.
///
/// `origin` is the region's top-left corner in client coordinates and is only
/// used to convert pointer events; everything else works in region-local
/// coordinates where (0, 0) is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Region {
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(origin_x: f32, origin_y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(origin_x, origin_y),
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Convert a client-space point into region-local coordinates.
    #[inline]
    pub fn to_local(&self, client_x: f32, client_y: f32) -> Vec2 {
        Vec2::new(client_x, client_y) - self.origin
    }

    /// The sub-rectangle the entity center may occupy.
    pub fn movable(&self, margin: [f32; 2]) -> Movable {
        Movable {
            min: Vec2::new(margin[0], margin[1]),
            max: Vec2::new(self.width - margin[0], self.height - margin[1]),
        }
    }
}

/// Region shrunk by the margin on every side. On an axis where the region is
/// narrower than two margins, `min > max` and that axis collapses to its midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movable {
    pub min: Vec2,
    pub max: Vec2,
}

impl Movable {
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp_axis(p.x, self.min.x, self.max.x),
            clamp_axis(p.y, self.min.y, self.max.y),
        )
    }

    /// Position as a fraction of the movable extent, clamped to [0, 1].
    /// A zero (or inverted) extent normalizes to 0.
    pub fn normalize(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            normalize_axis(p.x, self.min.x, self.max.x),
            normalize_axis(p.y, self.min.y, self.max.y),
        )
    }
}

#[inline]
fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) * 0.5
    } else {
        v.clamp(lo, hi)
    }
}

#[inline]
fn normalize_axis(v: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if span > 0.0 {
        ((v - lo) / span).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Last known pointer position in region-local coordinates, or `None` once
/// the pointer has left the region.
pub type PointerState = Option<Vec2>;

/// Region and measured entity size, captured together by the shell on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub region: Region,
    /// Half of the rendered entity size, when it could be measured.
    pub half_extent: Option<[f32; 2]>,
}
