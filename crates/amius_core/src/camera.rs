//! Scene camera
//!
//! The camera keeps its view transform and frustum in one cache, refreshed
//! together the first time either is read after a change.

use std::fmt;

use amius_input::InputState;
use amius_math::{forward_from_rotation, mat4, Frustum, Mat4, Vec3};

use crate::context::SceneCtx;

/// Per-tick behavior of a camera
pub type CameraTick = Box<dyn FnMut(&mut Camera, &SceneCtx, &InputState)>;

/// A perspective camera with an Euler-angle pose
pub struct Camera {
    position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    rotation: Vec3,
    z_near: f32,
    z_far: f32,
    /// Vertical field of view in radians
    fov_y: f32,
    aspect: f32,
    dirty: bool,
    view: Mat4,
    frustum: Frustum,
    pub(crate) tick: Option<CameraTick>,
    pub(crate) tick_replaced: bool,
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("z_near", &self.z_near)
            .field("z_far", &self.z_far)
            .field("fov_y", &self.fov_y)
            .field("aspect", &self.aspect)
            .field("dirty", &self.dirty)
            .field("has_tick", &self.tick.is_some())
            .finish()
    }
}

impl Camera {
    /// Create a camera; its cache is computed on first read
    pub fn new(position: Vec3, rotation: Vec3, z_near: f32, z_far: f32, fov_y: f32, aspect: f32) -> Self {
        Self {
            position,
            rotation,
            z_near,
            z_far,
            fov_y,
            aspect,
            dirty: true,
            view: mat4::IDENTITY,
            frustum: Frustum::default(),
            tick: None,
            tick_replaced: false,
        }
    }

    /// Attach a per-tick behavior
    pub fn with_tick<F>(mut self, tick: F) -> Self
    where
        F: FnMut(&mut Camera, &SceneCtx, &InputState) + 'static,
    {
        self.tick = Some(Box::new(tick));
        self
    }

    /// Replace the per-tick behavior; `None` stops ticking
    pub fn set_tick(&mut self, tick: Option<CameraTick>) {
        self.tick = tick;
        self.tick_replaced = true;
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    #[inline]
    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    #[inline]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Change the clip distances
    pub fn set_clip(&mut self, z_near: f32, z_far: f32) {
        self.z_near = z_near;
        self.z_far = z_far;
        self.dirty = true;
    }

    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
        self.dirty = true;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.dirty = true;
    }

    /// Unit view direction derived from the rotation
    pub fn forward(&self) -> Vec3 {
        forward_from_rotation(self.rotation)
    }

    /// Rotate so that [`forward`](Self::forward) points at `target`
    ///
    /// Roll is kept. Does nothing if `target` is the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalized();
        if dir == Vec3::ZERO {
            return;
        }
        // Invert forward = (-cos rx sin ry, -sin rx, cos rx cos ry)
        self.rotation.x = (-dir.y).clamp(-1.0, 1.0).asin();
        self.rotation.y = (-dir.x).atan2(dir.z);
        self.dirty = true;
    }

    /// Recompute the view transform and frustum if anything changed
    pub fn refresh_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        let pose = mat4::translate_rotate(mat4::IDENTITY, self.position, self.rotation);
        self.view = match mat4::inverse(pose) {
            Some(view) => view,
            None => {
                log::warn!("Camera pose is not invertible, using identity view");
                mat4::IDENTITY
            }
        };
        self.frustum = Frustum::from_camera(
            self.position,
            self.rotation,
            self.z_near,
            self.z_far,
            self.fov_y,
            self.aspect,
        );
        self.dirty = false;
    }

    /// View transform: the inverse of the camera pose
    pub fn view_transform(&mut self) -> Mat4 {
        self.refresh_if_dirty();
        self.view
    }

    pub fn frustum(&mut self) -> Frustum {
        self.refresh_if_dirty();
        self.frustum
    }

    /// Perspective projection for the current lens settings
    pub fn projection(&self) -> Mat4 {
        mat4::perspective(self.fov_y, self.aspect, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn test_camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::ZERO, 0.01, 1000.0, 40f32.to_radians(), 800.0 / 600.0)
    }

    #[test]
    fn test_new_camera_is_dirty() {
        let camera = test_camera();
        assert!(camera.is_dirty());
    }

    #[test]
    fn test_refresh_clears_dirty_and_fills_both_caches() {
        let mut camera = test_camera();
        camera.set_position(Vec3::new(0.0, 0.0, 5.0));
        camera.refresh_if_dirty();
        assert!(!camera.is_dirty());

        let view = camera.view_transform();
        let origin = mat4::transform_point(view, Vec3::new(0.0, 0.0, 5.0));
        assert!(vec_approx_eq(origin, Vec3::ZERO));

        let frustum = camera.frustum();
        assert!(vec_approx_eq(frustum.near.point, Vec3::new(0.0, 0.0, 5.01)));
        assert!((frustum.far.distance - 1000.0).abs() < EPSILON);
    }

    #[test]
    fn test_frustum_then_transform_see_same_pose() {
        let mut camera = test_camera();
        camera.view_transform();
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));

        // Either read order refreshes both
        let frustum = camera.frustum();
        let view = camera.view_transform();
        assert!(vec_approx_eq(frustum.near.point, Vec3::new(1.0, 2.0, 3.01)));
        assert!(vec_approx_eq(mat4::transform_point(view, Vec3::new(1.0, 2.0, 3.0)), Vec3::ZERO));
    }

    #[test]
    fn test_view_inverts_rotation() {
        let mut camera = test_camera();
        camera.set_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let view = camera.view_transform();
        let pose = mat4::translate_rotate(mat4::IDENTITY, Vec3::ZERO, Vec3::new(0.0, FRAC_PI_2, 0.0));
        let product = mat4::mul(view, pose);
        for (col, column) in product.iter().enumerate() {
            for (row, value) in column.iter().enumerate() {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert!((value - expected).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_forward_default_is_positive_z() {
        let camera = test_camera();
        assert!(vec_approx_eq(camera.forward(), Vec3::Z));
    }

    #[test]
    fn test_look_at() {
        let mut camera = test_camera();
        camera.set_position(Vec3::new(1.0, 1.0, 1.0));
        camera.refresh_if_dirty();

        let target = Vec3::new(-2.0, 4.0, 3.0);
        camera.look_at(target);
        assert!(camera.is_dirty());
        let expected = (target - camera.position()).normalized();
        assert!(vec_approx_eq(camera.forward(), expected));
    }

    #[test]
    fn test_look_at_own_position_is_noop() {
        let mut camera = test_camera();
        camera.set_rotation(Vec3::new(0.3, 0.2, 0.1));
        camera.refresh_if_dirty();
        camera.look_at(Vec3::ZERO);
        assert_eq!(camera.rotation(), Vec3::new(0.3, 0.2, 0.1));
        assert!(!camera.is_dirty());
    }

    #[test]
    fn test_lens_setters_mark_dirty() {
        let mut camera = test_camera();
        camera.refresh_if_dirty();
        camera.set_fov_y(1.0);
        assert!(camera.is_dirty());

        camera.refresh_if_dirty();
        camera.set_clip(0.1, 100.0);
        assert!(camera.is_dirty());
        assert!((camera.frustum().far.distance - 100.0).abs() < EPSILON);

        camera.set_aspect(2.0);
        assert!(camera.is_dirty());
    }

    #[test]
    fn test_projection_uses_lens() {
        let camera = test_camera();
        assert_eq!(
            camera.projection(),
            mat4::perspective(40f32.to_radians(), 800.0 / 600.0, 0.01, 1000.0)
        );
    }
}
