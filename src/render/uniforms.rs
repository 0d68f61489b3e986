use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};
use glam::Mat3;
use log::warn;

use crate::shader::{ShaderProgram, UniformValue};

/// Mirror of `Scene` in `shaders/spotlight.wgsl`. Every `vec3` is followed by
/// a scalar or explicit padding to keep WGSL's 16-byte alignment.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub view_pos: [f32; 3],
    pub _pad0: f32,
    pub material: MaterialUniform,
    pub spot_light: SpotLightUniform,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub specular: [f32; 3],
    pub shininess: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 3],
    pub cut_off: f32,
    pub direction: [f32; 3],
    pub outer_cut_off: f32,
    pub ambient: [f32; 3],
    pub constant: f32,
    pub diffuse: [f32; 3],
    pub linear: f32,
    pub specular: [f32; 3],
    pub quadratic: f32,
}

/// CPU copy of the scene uniform buffer, written through parameter names.
#[derive(Debug, Clone, Default)]
pub struct UniformBlock {
    scene: SceneUniform,
    diffuse_unit: i32,
    rejected: HashSet<String>,
}

impl UniformBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &SceneUniform {
        &self.scene
    }

    /// Texture unit requested for `material.diffuse`.
    pub fn diffuse_unit(&self) -> i32 {
        self.diffuse_unit
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.scene)
    }

    fn reject(&mut self, name: &str, value: UniformValue) {
        if self.rejected.insert(name.to_string()) {
            warn!(
                "shader has no {} parameter named {name:?}; ignoring",
                value.kind()
            );
        }
    }
}

impl ShaderProgram for UniformBlock {
    fn set(&mut self, name: &str, value: UniformValue) {
        let scene = &mut self.scene;
        match (name, value) {
            ("projection", UniformValue::Mat4(m)) => scene.projection = m.to_cols_array_2d(),
            ("view", UniformValue::Mat4(m)) => scene.view = m.to_cols_array_2d(),
            ("model", UniformValue::Mat4(m)) => scene.model = m.to_cols_array_2d(),
            ("normalMatrix", UniformValue::Mat3(m)) => scene.normal_matrix = mat3_to_3x4(m),
            ("viewPos", UniformValue::Vec3(v)) => scene.view_pos = v.to_array(),

            ("material.diffuse", UniformValue::Int(unit)) => {
                if unit != 0 {
                    warn!("only texture unit 0 is bound; material.diffuse={unit} samples unit 0");
                }
                self.diffuse_unit = unit;
            }
            ("material.specular", UniformValue::Vec3(v)) => scene.material.specular = v.to_array(),
            ("material.shininess", UniformValue::Float(f)) => scene.material.shininess = f,

            ("spotLight.position", UniformValue::Vec3(v)) => scene.spot_light.position = v.to_array(),
            ("spotLight.direction", UniformValue::Vec3(v)) => {
                scene.spot_light.direction = v.to_array()
            }
            ("spotLight.ambient", UniformValue::Vec3(v)) => scene.spot_light.ambient = v.to_array(),
            ("spotLight.diffuse", UniformValue::Vec3(v)) => scene.spot_light.diffuse = v.to_array(),
            ("spotLight.specular", UniformValue::Vec3(v)) => scene.spot_light.specular = v.to_array(),
            ("spotLight.constant", UniformValue::Float(f)) => scene.spot_light.constant = f,
            ("spotLight.linear", UniformValue::Float(f)) => scene.spot_light.linear = f,
            ("spotLight.quadratic", UniformValue::Float(f)) => scene.spot_light.quadratic = f,
            ("spotLight.cutOff", UniformValue::Float(f)) => scene.spot_light.cut_off = f,
            ("spotLight.outerCutOff", UniformValue::Float(f)) => scene.spot_light.outer_cut_off = f,

            (name, value) => self.reject(name, value),
        }
    }
}

fn mat3_to_3x4(matrix: Mat3) -> [[f32; 4]; 3] {
    [
        matrix.x_axis.extend(0.0).to_array(),
        matrix.y_axis.extend(0.0).to_array(),
        matrix.z_axis.extend(0.0).to_array(),
    ]
}
