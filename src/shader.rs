//! Named-parameter contract between the frame loop and a shader program.

use std::collections::BTreeMap;

use glam::{Mat3, Mat4, Vec3};

/// Value pushed into a shader program under a parameter name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vec3),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Vec3(_) => "vec3",
            Self::Mat3(_) => "mat3",
            Self::Mat4(_) => "mat4",
        }
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        Self::Mat3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

/// A compiled program that accepts parameters by name.
///
/// Implementations ignore names they do not know, the same way a GPU
/// program silently drops writes to a missing uniform location.
pub trait ShaderProgram {
    fn set(&mut self, name: &str, value: UniformValue);
}

/// In-memory program that remembers the last value written to each name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterLog {
    values: BTreeMap<String, UniformValue>,
}

impl ParameterLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(value) => Some(value),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name)? {
            UniformValue::Vec3(value) => Some(value),
            _ => None,
        }
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        match self.get(name)? {
            UniformValue::Mat4(value) => Some(value),
            _ => None,
        }
    }
}

impl ShaderProgram for ParameterLog {
    fn set(&mut self, name: &str, value: UniformValue) {
        self.values.insert(name.to_string(), value);
    }
}
