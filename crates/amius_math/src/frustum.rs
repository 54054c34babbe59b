//! View frustum planes
//!
//! A camera looks along [`forward_from_rotation`], which for a zero rotation
//! is +Z. Pitch (rotation.x) tilts the view downward, yaw (rotation.y) turns it
//! toward -X.

use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Compute the unit forward vector for an Euler rotation
///
/// `normalize(-cos(rx)·sin(ry), -sin(rx), cos(rx)·cos(ry))`
pub fn forward_from_rotation(rotation: Vec3) -> Vec3 {
    let (sin_x, cos_x) = rotation.x.sin_cos();
    let (sin_y, cos_y) = rotation.y.sin_cos();
    Vec3::new(-cos_x * sin_y, -sin_x, cos_x * cos_y).normalized()
}

/// A plane in point/normal form
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// A point on the plane
    pub point: Vec3,
    /// Unit normal pointing into the visible volume
    pub normal: Vec3,
    /// Distance from the camera eye along its forward axis
    /// (near/far clip distance for those planes, 0 for the side planes)
    pub distance: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 0.0,
        }
    }
}

impl Plane {
    /// Create a plane from a point, a normal and a clip distance
    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            point,
            normal: normal.normalized(),
            distance,
        }
    }

    /// Signed distance from the plane; positive on the side the normal points to
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p - self.point)
    }
}

/// Six planes bounding a camera's visible volume
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub top: Plane,
    pub bottom: Plane,
    pub right: Plane,
    pub left: Plane,
    pub near: Plane,
    pub far: Plane,
}

impl Frustum {
    /// Build the frustum of a camera pose
    ///
    /// `fov_y` is the vertical field of view in radians.
    pub fn from_camera(
        position: Vec3,
        rotation: Vec3,
        z_near: f32,
        z_far: f32,
        fov_y: f32,
        aspect: f32,
    ) -> Self {
        let forward = forward_from_rotation(rotation);
        // Always perpendicular to forward and never degenerate, even when
        // looking straight up or down.
        let (sin_y, cos_y) = rotation.y.sin_cos();
        let right = Vec3::new(-cos_y, 0.0, -sin_y);
        let up = right.cross(forward);

        let half_v = z_far * (fov_y * 0.5).tan();
        let half_h = half_v * aspect;
        let front_far = forward * z_far;

        Self {
            near: Plane::new(position + forward * z_near, forward, z_near),
            far: Plane::new(position + forward * z_far, -forward, z_far),
            left: Plane::new(position, (front_far - right * half_h).cross(up), 0.0),
            right: Plane::new(position, up.cross(front_far + right * half_h), 0.0),
            bottom: Plane::new(position, right.cross(front_far - up * half_v), 0.0),
            top: Plane::new(position, (front_far + up * half_v).cross(right), 0.0),
        }
    }

    /// All six planes
    pub fn planes(&self) -> [&Plane; 6] {
        [&self.top, &self.bottom, &self.right, &self.left, &self.near, &self.far]
    }

    /// Check whether a point lies inside (or on) every plane
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.planes().iter().all(|plane| plane.signed_distance(p) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    fn test_frustum() -> Frustum {
        Frustum::from_camera(Vec3::ZERO, Vec3::ZERO, 0.1, 100.0, FRAC_PI_2, 1.0)
    }

    #[test]
    fn test_forward_identity_is_positive_z() {
        assert!(vec_approx_eq(forward_from_rotation(Vec3::ZERO), Vec3::Z));
    }

    #[test]
    fn test_forward_yaw_and_pitch() {
        let yawed = forward_from_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(vec_approx_eq(yawed, -Vec3::X), "got {:?}", yawed);

        let pitched = forward_from_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        assert!(vec_approx_eq(pitched, -Vec3::Y), "got {:?}", pitched);

        let f = forward_from_rotation(Vec3::new(0.3, 1.2, 0.0));
        assert!((f.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_near_far_planes() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let rotation = Vec3::new(0.2, -0.4, 0.0);
        let frustum = Frustum::from_camera(position, rotation, 0.5, 50.0, FRAC_PI_4, 1.5);
        let forward = forward_from_rotation(rotation);

        assert!(vec_approx_eq(frustum.near.point, position + forward * 0.5));
        assert_eq!(frustum.near.distance, 0.5);
        assert!(vec_approx_eq(frustum.far.point, position + forward * 50.0));
        assert_eq!(frustum.far.distance, 50.0);
    }

    #[test]
    fn test_contains_point_ahead() {
        let frustum = test_frustum();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        assert!(frustum.contains_point(Vec3::new(5.0, -5.0, 10.0)));
    }

    #[test]
    fn test_rejects_behind_and_beyond() {
        let frustum = test_frustum();
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -1.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 0.05)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 150.0)));
    }

    #[test]
    fn test_rejects_outside_sides() {
        let frustum = test_frustum();
        // 90° fov with aspect 1: the visible half-width at depth 10 is 10
        assert!(!frustum.left.signed_distance(Vec3::new(20.0, 0.0, 10.0)).is_sign_positive());
        assert!(!frustum.right.signed_distance(Vec3::new(-20.0, 0.0, 10.0)).is_sign_positive());
        assert!(!frustum.top.signed_distance(Vec3::new(0.0, 20.0, 10.0)).is_sign_positive());
        assert!(!frustum.bottom.signed_distance(Vec3::new(0.0, -20.0, 10.0)).is_sign_positive());
        assert!(!frustum.contains_point(Vec3::new(20.0, 0.0, 10.0)));
    }

    #[test]
    fn test_plane_normals_are_unit() {
        let frustum = Frustum::from_camera(Vec3::ZERO, Vec3::new(0.7, 0.3, 0.0), 0.1, 10.0, 1.0, 1.3);
        for plane in frustum.planes() {
            assert!((plane.normal.length() - 1.0).abs() < EPSILON);
        }
    }
}
