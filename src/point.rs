use glam::{I16Vec3, IVec3, U8Vec3};

/// A single point as stored in the file, coordinates untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointData {
    pub position: I16Vec3,
    pub color: Option<U8Vec3>,
}

/// Axis aligned bounds in raw file units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aabb {
    pub min: I16Vec3,
    pub max: I16Vec3,
}

impl Aabb {
    pub fn new(min: I16Vec3, max: I16Vec3) -> Self {
        Self { min, max }
    }

    /// Degenerate box containing a single point.
    pub fn from_point(point: I16Vec3) -> Self {
        Self::new(point, point)
    }

    /// Grow the box so it contains `point`.
    pub fn extend(&mut self, point: I16Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn contains(&self, point: I16Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Extent along each axis. Widened to `i32`, a full `i16` span overflows.
    pub fn size(&self) -> IVec3 {
        self.max.as_ivec3() - self.min.as_ivec3()
    }
}
