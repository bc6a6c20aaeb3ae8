use std::{cell::RefCell, rc::Weak};

use cgmath::Vector3;

use crate::{
    assets::{AssetBundle, AssetLoadError, MaterialTextures},
    gfx::{
        camera::OrbitCamera,
        geometry::{generate_plane, generate_sphere},
    },
};

use super::node::{
    EnvironmentNode, LightNode, MeshNode, ModelNode, SurfaceMaterial, Transform,
};

/// Scene contents and camera
pub struct Scene {
    pub camera: OrbitCamera,
    pub meshes: Vec<MeshNode>,
    pub models: Vec<ModelNode>,
    pub lights: Vec<LightNode>,
    pub environment: EnvironmentNode,
}

impl Scene {
    pub const BALL: &'static str = "ball";
    pub const FLOOR: &'static str = "floor";
    pub const ENVIRONMENT_COLOR: &'static str = "#068b85";

    pub fn new(camera: OrbitCamera, environment: EnvironmentNode) -> Self {
        Self {
            camera,
            meshes: Vec::new(),
            models: Vec::new(),
            lights: Vec::new(),
            environment,
        }
    }

    /// The product showcase: leather ball on a marble floor, a car model and four lights
    ///
    /// Textures are named `<material>_<resolution>_<channel>.<extension>`.
    pub fn showcase(resolution: &str, extension: &str, aspect: f32) -> Self {
        let camera = OrbitCamera::looking_at(
            Vector3::new(0.0, 2.0, 5.0),
            Vector3::new(0.0, 0.0, 0.0),
            aspect,
        );
        let mut scene = Self::new(
            camera,
            EnvironmentNode::from_hex(Self::ENVIRONMENT_COLOR, 100.0),
        );

        scene.meshes.push(
            MeshNode::new(
                Self::BALL,
                generate_sphere(0.5, 100, 100),
                Transform::from_position(0.0, 0.5, 0.0),
                SurfaceMaterial::new(MaterialTextures::leather(resolution, extension)),
            )
            .casting_shadow(),
        );

        scene.meshes.push(
            MeshNode::new(
                Self::FLOOR,
                generate_plane(7.0, 7.0, 1, 1),
                Transform::default().with_rotation(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
                SurfaceMaterial::new(MaterialTextures::marble(resolution, extension)),
            )
            .receiving_shadow(),
        );

        scene.models.push(ModelNode {
            name: "car".to_string(),
            source: "models/car.glb".to_string(),
            transform: Transform::default().shared(),
            cast_shadow: true,
        });

        scene.lights = vec![
            LightNode::Ambient { intensity: 0.4 },
            LightNode::Directional {
                position: Vector3::new(2.5, 8.0, 5.0),
                intensity: 1.5,
                cast_shadow: true,
                shadow_map_size: 1024,
            },
            LightNode::Point {
                position: Vector3::new(-10.0, 0.0, -20.0),
                color: [1.0, 1.0, 1.0],
                intensity: 2.5,
            },
            LightNode::Point {
                position: Vector3::new(0.0, -10.0, 0.0),
                color: [1.0, 1.0, 1.0],
                intensity: 1.5,
            },
        ];

        scene
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshNode> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    /// Weak handle on the ball's transform, the target of the entrance animation
    pub fn focal_target(&self) -> Option<Weak<RefCell<Transform>>> {
        self.mesh(Self::BALL)
            .map(|ball| std::rc::Rc::downgrade(&ball.transform))
    }

    /// Every texture the scene's meshes sample, as one bundle
    pub fn texture_bundle(&self) -> Result<AssetBundle, AssetLoadError> {
        self.meshes.iter().try_fold(AssetBundle::new(), |bundle, mesh| {
            bundle.with_material(&mesh.material.textures, &mesh.material.channels)
        })
    }

    /// Recomputes camera matrices
    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }
}
