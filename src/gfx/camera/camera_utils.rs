use cgmath::{Matrix4, SquareMatrix};

/// Camera output interface driven by the pointer rig
///
/// Angles are in radians. Setters only record the requested angles; `update`
/// recomputes position and matrices from them.
pub trait OrbitControl {
    /// Horizontal orbit angle around the target's vertical axis
    fn set_azimuthal_angle(&mut self, radians: f32);
    /// Vertical orbit angle measured from the up axis
    fn set_polar_angle(&mut self, radians: f32);
    fn update(&mut self);
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}
