//! Pointer-driven camera orbit
//!
//! Every frame the latest normalized pointer position is mapped straight to orbit
//! angles. The mapping is recomputed from scratch each tick, never accumulated, so
//! the camera always sits at the same place for the same pointer position.

use cgmath::{Deg, Rad};

use super::camera_utils::OrbitControl;

/// Angle covered by one unit of pointer travel
pub const ORBIT_STEP_DEGREES: f32 = 5.0;
/// Pointer-y offset placing the resting camera slightly above the horizon
pub const POLAR_OFFSET: f32 = 5.5;

pub fn to_radians(degrees: f32) -> f32 {
    Rad::from(Deg(degrees)).0
}

/// Pointer position normalized to `[-1, 1]` on both axes, +y up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub const CENTER: PointerSample = PointerSample { x: 0.0, y: 0.0 };

    /// Builds a sample, clamping out-of-range coordinates into `[-1, 1]`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Orbit angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub azimuth: f32,
    pub polar: f32,
}

/// Maps pointer samples onto a camera's orbit control once per frame
#[derive(Debug, Clone, Copy)]
pub struct PointerCameraRig {
    step: f32,
    polar_offset: f32,
}

impl Default for PointerCameraRig {
    fn default() -> Self {
        Self {
            step: to_radians(ORBIT_STEP_DEGREES),
            polar_offset: POLAR_OFFSET,
        }
    }
}

impl PointerCameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orbit angles for `pointer`; pure, depends on nothing but the sample
    pub fn orbit_for(&self, pointer: PointerSample) -> OrbitState {
        let pointer = pointer.clamped();
        OrbitState {
            azimuth: -pointer.x * self.step,
            polar: (pointer.y + self.polar_offset) * self.step,
        }
    }

    /// Frame tick: applies the orbit for `pointer` to `control` and asks it to
    /// recompute its matrices.
    ///
    /// Returns `None` without doing anything when no control is attached yet.
    pub fn tick<C>(&self, pointer: PointerSample, control: Option<&mut C>) -> Option<OrbitState>
    where
        C: OrbitControl + ?Sized,
    {
        let control = control?;
        let orbit = self.orbit_for(pointer);
        control.set_azimuthal_angle(orbit.azimuth);
        control.set_polar_angle(orbit.polar);
        control.update();
        Some(orbit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::OrbitCamera;
    use approx::assert_relative_eq;
    use cgmath::Vector3;
    use std::f32::consts::PI;

    #[derive(Default)]
    struct RecordingControl {
        calls: Vec<&'static str>,
        azimuth: f32,
        polar: f32,
    }

    impl OrbitControl for RecordingControl {
        fn set_azimuthal_angle(&mut self, radians: f32) {
            self.calls.push("azimuth");
            self.azimuth = radians;
        }

        fn set_polar_angle(&mut self, radians: f32) {
            self.calls.push("polar");
            self.polar = radians;
        }

        fn update(&mut self) {
            self.calls.push("update");
        }
    }

    #[test]
    fn test_five_degrees_in_radians() {
        assert_relative_eq!(to_radians(5.0), 5.0 * PI / 180.0);
    }

    #[test]
    fn test_center_pointer() {
        let orbit = PointerCameraRig::new().orbit_for(PointerSample::CENTER);
        assert_eq!(orbit.azimuth, 0.0);
        assert_relative_eq!(orbit.polar, 0.4799, epsilon = 1e-4);
    }

    #[test]
    fn test_mapping_over_the_unit_square() {
        let rig = PointerCameraRig::new();
        let step = 5.0 * PI / 180.0;
        for i in -4..=4 {
            for j in -4..=4 {
                let (x, y) = (i as f32 / 4.0, j as f32 / 4.0);
                let orbit = rig.orbit_for(PointerSample::new(x, y));
                assert_relative_eq!(orbit.azimuth, -x * step, epsilon = 1e-6);
                assert_relative_eq!(orbit.polar, (y + 5.5) * step, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_no_state_carried_between_frames() {
        let rig = PointerCameraRig::new();
        let mut control = RecordingControl::default();
        let sample = PointerSample::new(0.3, -0.6);

        let first = rig.tick(sample, Some(&mut control));
        rig.tick(PointerSample::new(-1.0, 1.0), Some(&mut control));
        let again = rig.tick(sample, Some(&mut control));
        assert_eq!(first, again);
    }

    #[test]
    fn test_tick_drives_control_in_order() {
        let rig = PointerCameraRig::new();
        let mut control = RecordingControl::default();
        let orbit = rig
            .tick(PointerSample::new(1.0, 0.0), Some(&mut control))
            .unwrap();

        assert_eq!(control.calls, vec!["azimuth", "polar", "update"]);
        assert_eq!(control.azimuth, orbit.azimuth);
        assert_eq!(control.polar, orbit.polar);
    }

    #[test]
    fn test_tick_without_control_is_a_noop() {
        let rig = PointerCameraRig::new();
        assert_eq!(
            rig.tick::<RecordingControl>(PointerSample::CENTER, None),
            None
        );
    }

    #[test]
    fn test_out_of_range_pointer_is_clamped() {
        let rig = PointerCameraRig::new();
        let raw = PointerSample { x: 3.0, y: -40.0 };
        assert_eq!(rig.orbit_for(raw), rig.orbit_for(PointerSample::new(1.0, -1.0)));
        assert_eq!(PointerSample::new(f32::NAN, 0.5), PointerSample::new(0.0, 0.5));
    }

    #[test]
    fn test_rig_moves_orbit_camera() {
        let rig = PointerCameraRig::new();
        let mut camera = OrbitCamera::new(5.0, 0.0, 1.0, Vector3::new(0.0, 0.0, 0.0), 1.0);
        let orbit = rig
            .tick(PointerSample::CENTER, Some(&mut camera))
            .unwrap();

        assert_relative_eq!(camera.polar, orbit.polar);
        assert_relative_eq!(camera.eye.y, 5.0 * orbit.polar.cos(), epsilon = 1e-5);
        assert_relative_eq!(camera.eye.x, 0.0, epsilon = 1e-5);
    }
}
