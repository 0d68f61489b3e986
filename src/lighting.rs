use glam::Vec3;

use crate::camera::Camera;
use crate::shader::ShaderProgram;

/// Overall brightness applied to the spotlight's colour terms.
pub const LIGHT_MULTIPLIER: f32 = 2.0;

pub const INNER_CUTOFF_DEGREES: f32 = 4.5;
pub const OUTER_CUTOFF_DEGREES: f32 = 7.0;

/// Spotlight carried by the camera: it sits at the eye and points along the
/// view direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    pub position: Vec3,
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cosine of the outer cone angle.
    pub outer_cut_off: f32,
}

impl Spotlight {
    pub fn attached_to(camera: &Camera) -> Self {
        Self {
            position: camera.position(),
            direction: camera.front(),
            ambient: Vec3::splat(0.1 * LIGHT_MULTIPLIER),
            diffuse: Vec3::splat(0.8 * LIGHT_MULTIPLIER),
            specular: Vec3::splat(1.0 * LIGHT_MULTIPLIER),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            cut_off: INNER_CUTOFF_DEGREES.to_radians().cos(),
            outer_cut_off: OUTER_CUTOFF_DEGREES.to_radians().cos(),
        }
    }

    /// Distance falloff `1 / (c + l·d + q·d²)` evaluated on the CPU.
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    /// Soft cone factor for a fragment seen under `cos_theta` from the axis.
    pub fn cone_intensity(&self, cos_theta: f32) -> f32 {
        let epsilon = self.cut_off - self.outer_cut_off;
        ((cos_theta - self.outer_cut_off) / epsilon).clamp(0.0, 1.0)
    }

    pub fn apply(&self, program: &mut impl ShaderProgram) {
        program.set("spotLight.position", self.position.into());
        program.set("spotLight.direction", self.direction.into());
        program.set("spotLight.ambient", self.ambient.into());
        program.set("spotLight.diffuse", self.diffuse.into());
        program.set("spotLight.specular", self.specular.into());
        program.set("spotLight.constant", self.constant.into());
        program.set("spotLight.linear", self.linear.into());
        program.set("spotLight.quadratic", self.quadratic.into());
        program.set("spotLight.cutOff", self.cut_off.into());
        program.set("spotLight.outerCutOff", self.outer_cut_off.into());
    }
}

/// Surface response of the cube. The diffuse colour comes from the texture
/// bound to `diffuse_unit`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse_unit: i32,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    pub const CUBE: Self = Self {
        diffuse_unit: 0,
        specular: Vec3::splat(0.5),
        shininess: 32.0,
    };

    pub fn apply(&self, program: &mut impl ShaderProgram) {
        program.set("material.diffuse", self.diffuse_unit.into());
        program.set("material.specular", self.specular.into());
        program.set("material.shininess", self.shininess.into());
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::CUBE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{ParameterLog, UniformValue};

    #[test]
    fn spotlight_follows_camera() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        camera.process_mouse_movement(200.0, 50.0);
        let light = Spotlight::attached_to(&camera);
        assert_eq!(light.position, camera.position());
        assert_eq!(light.direction, camera.front());
    }

    #[test]
    fn spotlight_terms_are_scaled() {
        let light = Spotlight::attached_to(&Camera::default());
        assert!((light.ambient.x - 0.2).abs() < 1e-6);
        assert!((light.diffuse.y - 1.6).abs() < 1e-6);
        assert!((light.specular.z - 2.0).abs() < 1e-6);
        assert!(light.cut_off > light.outer_cut_off);
        assert!((light.cut_off - 4.5f32.to_radians().cos()).abs() < 1e-6);
    }

    #[test]
    fn cone_is_full_inside_and_dark_outside() {
        let light = Spotlight::attached_to(&Camera::default());
        assert_eq!(light.cone_intensity(1.0), 1.0);
        assert_eq!(light.cone_intensity(20f32.to_radians().cos()), 0.0);
        let between = light.cone_intensity(5.75f32.to_radians().cos());
        assert!(between > 0.0 && between < 1.0);
    }

    #[test]
    fn attenuation_falls_with_distance() {
        let light = Spotlight::attached_to(&Camera::default());
        assert_eq!(light.attenuation(0.0), 1.0);
        assert!(light.attenuation(10.0) < light.attenuation(1.0));
    }

    #[test]
    fn material_pushes_named_parameters() {
        let mut log = ParameterLog::new();
        Material::CUBE.apply(&mut log);
        assert_eq!(log.get("material.diffuse"), Some(UniformValue::Int(0)));
        assert_eq!(log.vec3("material.specular"), Some(Vec3::splat(0.5)));
        assert_eq!(log.float("material.shininess"), Some(32.0));
    }
}
