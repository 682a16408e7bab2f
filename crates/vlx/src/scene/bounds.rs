//! Bounding volumes of renderables

use crate::foundation::math::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Smallest sphere enclosing the box
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::new(self.center(), self.extents().norm())
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros())
    }
}

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Sphere center
    pub center: Vec3,
    /// Sphere radius
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Vec3::zeros(), 0.0)
    }
}

/// Cached bounds of a renderable
///
/// Bounds start dirty; only clean bounds are written to documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    aabb: Aabb,
    sphere: Sphere,
    dirty: bool,
}

impl Bounds {
    /// Bounding box
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Bounding sphere
    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    /// True when the bounds must be recomputed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Store a bounding box and mark the bounds clean
    pub fn set_aabb(&mut self, aabb: Aabb) {
        self.aabb = aabb;
        self.dirty = false;
    }

    /// Store a bounding sphere and mark the bounds clean
    pub fn set_sphere(&mut self, sphere: Sphere) {
        self.sphere = sphere;
        self.dirty = false;
    }

    /// Flag the bounds for recomputation
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            aabb: Aabb::default(),
            sphere: Sphere::default(),
            dirty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_setting_bounds_cleans_them() {
        let mut bounds = Bounds::default();
        assert!(bounds.is_dirty());
        bounds.set_aabb(Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)));
        assert!(!bounds.is_dirty());
        bounds.mark_dirty();
        assert!(bounds.is_dirty());
    }

    #[test]
    fn test_enclosing_sphere() {
        let aabb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let sphere = aabb.bounding_sphere();
        assert_relative_eq!(sphere.center, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(sphere.radius, 3.0_f32.sqrt(), epsilon = 1e-6);
    }
}
