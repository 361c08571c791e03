//! Planar vectors and axis-aligned bounds.

use bytemuck::{Pod, Zeroable};

/// Tolerance used when a fractional pixel coordinate is snapped to the integer below it.
pub const EPS_PIXEL: f64 = 1.0e-9;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    /// Point in the z = 0 plane.
    #[must_use]
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
    #[must_use]
    pub fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
    #[must_use]
    pub fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
    #[must_use]
    pub fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
    #[must_use]
    pub fn dot(self, o: Self) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }
    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }
    #[must_use]
    pub fn normalized(self) -> Self {
        let l = self.length();
        if l == 0.0 {
            self
        } else {
            self.mul(1.0 / l)
        }
    }
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Axis-aligned bounding box `(xmin, xmax, ymin, ymax, zmin, zmax)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl Bounds {
    /// Planar bounds with a flat z extent at 0.
    #[must_use]
    pub const fn planar(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self { xmin, xmax, ymin, ymax, zmin: 0.0, zmax: 0.0 }
    }

    /// From `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    #[must_use]
    pub const fn from_array(b: [f64; 6]) -> Self {
        Self { xmin: b[0], xmax: b[1], ymin: b[2], ymax: b[3], zmin: b[4], zmax: b[5] }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 6] {
        [self.xmin, self.xmax, self.ymin, self.ymax, self.zmin, self.zmax]
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// True when both planar extents are finite and strictly positive.
    #[must_use]
    pub fn has_area(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
    }

    /// Inclusive containment test in x/y; z is ignored.
    #[must_use]
    pub fn contains_xy(&self, p: Vec3) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Map fractional coordinates `(u, v)` in [0,1]² into the box (z = zmin).
    #[must_use]
    pub fn lerp_xy(&self, u: f64, v: f64) -> Vec3 {
        Vec3::new(lerp(self.xmin, self.xmax, u), lerp(self.ymin, self.ymax, v), self.zmin)
    }
}

/// `a + t (b - a)`; `t = 0` returns `a` exactly.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
