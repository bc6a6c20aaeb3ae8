use super::camera_utils::{Camera, CameraUniform, OrbitControl};
use cgmath::*;
use std::f32::consts::PI;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Keeps the eye off the poles where `look_at` degenerates
const POLE_EPSILON: f32 = 1e-6;

/// Y-up camera orbiting a target point
///
/// `azimuth` turns around +Y (0 looks down -Z from +Z), `polar` is measured from +Y
/// (0 is straight above the target, π straight below).
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, azimuth: f32, polar: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            azimuth,
            polar,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        OrbitControl::update(&mut camera);
        camera
    }

    /// Places the camera at `eye`, orbiting `target`
    pub fn looking_at(eye: Vector3<f32>, target: Vector3<f32>, aspect: f32) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude();
        let (azimuth, polar) = if distance > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        Self::new(distance, azimuth, polar, target, aspect)
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        OrbitControl::update(self);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = self.build_view_projection_matrix().into();
    }
}

impl OrbitControl for OrbitCamera {
    fn set_azimuthal_angle(&mut self, radians: f32) {
        let mut bounded = radians;
        if let Some(min_azimuth) = self.bounds.min_azimuth {
            bounded = bounded.max(min_azimuth);
        }
        if let Some(max_azimuth) = self.bounds.max_azimuth {
            bounded = bounded.min(max_azimuth);
        }
        self.azimuth = bounded;
    }

    fn set_polar_angle(&mut self, radians: f32) {
        self.polar = radians
            .clamp(self.bounds.min_polar, self.bounds.max_polar)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }

    /// Recomputes the eye from `distance`, `azimuth` and `polar`, then the matrices
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.azimuth, self.polar, self.distance, self.target);
        self.update_view_proj();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: Option<f32>,
    pub max_azimuth: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_polar: 0.0,
            max_polar: PI,
            min_azimuth: None,
            max_azimuth: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    azimuth: f32,
    polar: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
    target
        + Vector3::new(
            distance * sin_polar * sin_azimuth,
            distance * cos_polar,
            distance * sin_polar * cos_azimuth,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_looking_at_round_trips_eye() {
        let camera = OrbitCamera::looking_at(Vector3::new(0.0, 2.0, 5.0), Vector3::zero(), 1.5);

        assert_relative_eq!(camera.distance, 29f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(camera.azimuth, 0.0);
        assert_relative_eq!(camera.eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.eye.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(camera.eye.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_setters_wait_for_update() {
        let mut camera = OrbitCamera::new(4.0, 0.0, PI / 2.0, Vector3::zero(), 1.0);
        let before = camera.eye;

        camera.set_azimuthal_angle(PI / 2.0);
        assert_eq!(camera.eye, before);

        camera.update();
        assert_relative_eq!(camera.eye.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(camera.eye.z, 0.0, epsilon = 1e-5);
        assert_eq!(camera.uniform.view_position[0], camera.eye.x);
    }

    #[test]
    fn test_polar_respects_bounds() {
        let mut camera = OrbitCamera::new(4.0, 0.0, 1.0, Vector3::zero(), 1.0);

        camera.set_polar_angle(4.0);
        assert!(camera.polar < PI);

        camera.bounds.min_polar = 0.5;
        camera.set_polar_angle(0.1);
        assert_eq!(camera.polar, 0.5);
    }
}
