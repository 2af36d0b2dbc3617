//! Orbit camera and pointer un-projection.
//!
//! The camera orbits a target point: dragging changes yaw and pitch, the
//! scroll wheel changes distance. The pointer is mapped onto the ground
//! plane `y = 0` by casting a ray from the eye through the cursor.

use glam::{Mat4, Vec2, Vec3, Vec4};

pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    pub const DEFAULT_EYE: Vec3 = Vec3::new(100.0, 200.0, 0.0);

    const ORBIT_SPEED: f32 = 0.005;
    const ZOOM_SPEED: f32 = 0.1;
    const MAX_PITCH: f32 = 1.5;

    /// Create a camera at `eye` orbiting `target`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
            fov_y: 60.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 3000.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Rotate around the target by a drag of `(dx, dy)` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * Self::ORBIT_SPEED;
        self.pitch = (self.pitch + dy * Self::ORBIT_SPEED).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    /// Move toward (positive) or away from (negative) the target.
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * Self::ZOOM_SPEED).max(0.1);
        self.distance = (self.distance * factor).clamp(self.near * 2.0, self.far * 0.9);
    }

    /// Update the aspect ratio after a resize.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Un-project a point in normalized device coordinates on the near plane.
    pub fn unproject(&self, ndc: Vec2) -> Vec3 {
        let world = self.view_proj().inverse() * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        world.truncate() / world.w
    }

    /// World position under the cursor on the `y = 0` plane.
    ///
    /// Not guarded: when the ray is (nearly) parallel to the ground the
    /// result is extreme or non-finite, and rays pointing away from the
    /// ground hit it behind the camera.
    pub fn pointer_on_ground(&self, ndc: Vec2) -> Vec3 {
        let eye = self.eye();
        let dir = (self.unproject(ndc) - eye).normalize();
        intersect_ground(eye, dir)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Self::DEFAULT_EYE, Vec3::ZERO)
    }
}

/// Convert a physical-pixel position to normalized device coordinates.
///
/// Origin at the window centre, X right, Y up.
pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (screen.x / viewport.x) * 2.0 - 1.0,
        -(screen.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Intersect the ray `origin + t * dir` with the plane `y = 0`.
pub fn intersect_ground(origin: Vec3, dir: Vec3) -> Vec3 {
    let t = -origin.y / dir.y;
    origin + dir * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3, tolerance: f32) {
        assert!((a - b).length() < tolerance, "{a:?} != {b:?}");
    }

    #[test]
    fn test_looking_at_keeps_eye() {
        let eye = Vec3::new(100.0, 200.0, 0.0);
        let camera = OrbitCamera::looking_at(eye, Vec3::new(250.0, 0.0, 250.0));
        assert_close(camera.eye(), eye, 1e-3);
    }

    #[test]
    fn test_default_projection() {
        let camera = OrbitCamera::default();
        assert!((camera.fov_y - 60.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 3000.0);
        assert!(!camera.view_proj().col(0).x.is_nan());
    }

    #[test]
    fn test_screen_to_ndc() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(screen_to_ndc(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
        assert_eq!(screen_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(viewport, viewport), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_screen_centre_hits_target() {
        let target = Vec3::new(250.0, 0.0, 250.0);
        let camera = OrbitCamera::looking_at(Vec3::new(100.0, 200.0, 0.0), target);
        let hit = camera.pointer_on_ground(Vec2::ZERO);
        assert!(hit.y.abs() < 1e-3);
        assert_close(hit, target, 0.5);
    }

    #[test]
    fn test_off_centre_hits_ground() {
        let camera = OrbitCamera::looking_at(Vec3::new(0.0, 100.0, 100.0), Vec3::ZERO);
        let hit = camera.pointer_on_ground(Vec2::new(0.3, -0.2));
        assert!(hit.y.abs() < 1e-3);
        assert!(hit.x > 0.0);
    }

    #[test]
    fn test_parallel_ray_is_not_finite() {
        let hit = intersect_ground(Vec3::new(0.0, 10.0, 0.0), Vec3::X);
        assert!(!hit.is_finite());
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = OrbitCamera::default();
        camera.orbit(0.0, 10_000.0);
        assert_eq!(camera.pitch, 1.5);
        camera.orbit(0.0, -100_000.0);
        assert_eq!(camera.pitch, -1.5);
    }

    #[test]
    fn test_zoom_moves_toward_target() {
        let mut camera = OrbitCamera::default();
        let before = camera.distance;
        camera.zoom(1.0);
        assert!(camera.distance < before);
        camera.zoom(-2.0);
        assert!(camera.distance > before * 0.9);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = OrbitCamera::default();
        camera.set_aspect(1920, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect(100, 0);
        assert_eq!(camera.aspect, 100.0);
    }
}
