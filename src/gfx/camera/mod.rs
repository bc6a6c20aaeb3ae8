pub mod camera_utils;
pub mod orbit_camera;
pub mod pointer_rig;
pub mod pointer_tracker;

// Re-export main types
pub use camera_utils::{Camera, CameraUniform, OrbitControl};
pub use orbit_camera::OrbitCamera;
pub use pointer_rig::{OrbitState, PointerCameraRig, PointerSample};
pub use pointer_tracker::PointerTracker;
