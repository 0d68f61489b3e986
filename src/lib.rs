//! A first-person viewer for a spinning textured cube lit by a flashlight.
//!
//! The camera, input tracking, frame timing and shader parameter
//! computation are plain data types so they can be exercised without a
//! window or a GPU. [`render::Renderer`] and [`platform`] are the only
//! pieces that talk to wgpu and winit.

pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod lighting;
pub mod mesh;
pub mod platform;
pub mod render;
pub mod shader;
pub mod texture;

pub use app::{App, InputEvent};
pub use camera::{Camera, CameraMovement};
pub use config::AppConfig;
pub use error::InitError;
pub use frame::{FrameClock, FrameParams, FrameTime, LoopState, Transforms};
pub use input::{InputState, KeyBindings, KeyCode};
pub use lighting::{Material, Spotlight};
pub use render::{Renderer, UniformBlock};
pub use shader::{ParameterLog, ShaderProgram, UniformValue};
pub use texture::{TextureError, TextureImage};
