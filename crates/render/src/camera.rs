use glam::{Mat4, Vec3};

/// Orbit camera: rotates around a fixed target, subject to configured
/// limits. Projection parameters live here too; the aspect ratio must be
/// re-set on every viewport resize.
///
/// Spherical convention: `polar` is measured from +Y (straight up), so the
/// horizon sits at `pi/2`. Clamping `polar` below `max_polar` keeps the
/// camera from dipping under the floor.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    radius: f32,
    polar: f32,
    azimuth: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_pan: bool,
    pub sensitivity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let mut cam = Self {
            target: Vec3::ZERO,
            fov: 40.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
            radius: 1.0,
            polar: std::f32::consts::FRAC_PI_2,
            azimuth: 0.0,
            max_polar: 0.9 * std::f32::consts::FRAC_PI_2,
            min_distance: 1.0,
            max_distance: 10_000.0,
            enable_pan: false,
            sensitivity: 0.005,
        };
        cam.set_position(Vec3::new(700.0, 200.0, -500.0));
        cam
    }
}

impl OrbitCamera {
    /// Place the camera at a world position, recomputing orbit angles
    /// relative to the current target.
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.radius = offset.length().clamp(self.min_distance, self.max_distance);
        if self.radius > 0.0 {
            self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
            self.azimuth = offset.x.atan2(offset.z);
        }
        self.clamp_orbit();
    }

    /// Current world position derived from the orbit state.
    pub fn position(&self) -> Vec3 {
        let sin_p = self.polar.sin();
        self.target
            + self.radius
                * Vec3::new(
                    sin_p * self.azimuth.sin(),
                    self.polar.cos(),
                    sin_p * self.azimuth.cos(),
                )
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Orbit by a mouse delta. Polar angle is clamped to `max_polar`.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.sensitivity;
        self.polar -= dy * self.sensitivity;
        self.clamp_orbit();
    }

    /// Zoom toward/away from the target. Distance is clamped to
    /// `[min_distance, max_distance]`.
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius * (1.0 - delta * 0.1))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Move the orbit target. Disabled by configuration; a pan request is
    /// ignored unless `enable_pan` is set.
    pub fn pan(&mut self, delta: Vec3) {
        if self.enable_pan {
            self.target += delta;
        }
    }

    /// Re-establish the aspect invariant from viewport dimensions.
    /// Leaves position, fov, and clipping planes untouched.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn clamp_orbit(&mut self) {
        // Keep a hair away from the pole so look_at keeps a valid up vector.
        self.polar = self.polar.clamp(0.01, self.max_polar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_position_and_fov() {
        let cam = OrbitCamera::default();
        let p = cam.position();
        let expected = Vec3::new(700.0, 200.0, -500.0);
        assert!((p - expected).length() < 0.5, "got {p}");
        assert!((cam.fov - 40.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 10_000.0);
        assert!(!cam.enable_pan);
    }

    #[test]
    fn set_aspect_is_exact_and_preserves_the_rest() {
        let mut cam = OrbitCamera::default();
        let position = cam.position();
        let fov = cam.fov;

        cam.set_aspect(1920, 1080);
        assert_eq!(cam.aspect, 1920.0 / 1080.0);
        cam.set_aspect(800, 600);
        assert_eq!(cam.aspect, 800.0 / 600.0);

        assert_eq!(cam.position(), position);
        assert_eq!(cam.fov, fov);
    }

    #[test]
    fn set_aspect_survives_zero_height() {
        let mut cam = OrbitCamera::default();
        cam.set_aspect(1280, 0);
        assert!(cam.aspect.is_finite());
    }

    #[test]
    fn polar_clamp_keeps_camera_above_horizon() {
        let mut cam = OrbitCamera::default();
        // Drag hard downward: polar would pass pi/2 without the clamp.
        cam.rotate(0.0, -10_000.0);
        assert!(cam.position().y >= 0.0);
        // Exactly at the limit, not past it.
        let limit_y = cam.distance() * (0.9 * std::f32::consts::FRAC_PI_2).cos();
        assert!((cam.position().y - limit_y).abs() < 1e-2);
    }

    #[test]
    fn zoom_clamps_to_max_distance() {
        let mut cam = OrbitCamera::default();
        for _ in 0..200 {
            cam.zoom(-1.0);
        }
        assert!(cam.distance() <= 10_000.0);
        for _ in 0..500 {
            cam.zoom(1.0);
        }
        assert!(cam.distance() >= cam.min_distance);
    }

    #[test]
    fn pan_is_disabled() {
        let mut cam = OrbitCamera::default();
        cam.pan(Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn view_projection_is_valid() {
        let cam = OrbitCamera::default();
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn rotate_orbits_at_constant_distance() {
        let mut cam = OrbitCamera::default();
        let d0 = cam.distance();
        cam.rotate(300.0, 40.0);
        assert!((cam.distance() - d0).abs() < 1e-4);
        assert!((cam.position() - cam.target).length() - d0 < 1e-3);
    }
}
