//! GPU resource management
//!
//! Global uniform bindings, textures uploaded from decoded assets, and the depth
//! buffer.

pub mod global_bindings;
pub mod texture_resource;

pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent};
pub use texture_resource::TextureResource;
