mod native;
mod uniforms;

pub use native::Renderer;
pub use uniforms::{MaterialUniform, SceneUniform, SpotLightUniform, UniformBlock};
