use std::path::PathBuf;
use std::time::Duration;

use log::warn;

pub const WINDOW_TITLE: &str = "Textured Cube with Spotlight";
pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 600;
pub const TEXTURE_PATH: &str = "texture/texture.png";
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

pub const TEXTURE_ENV: &str = "SPOTLIGHT_CUBE_TEXTURE";
pub const MAX_FRAME_DELTA_ENV: &str = "SPOTLIGHT_CUBE_MAX_FRAME_DELTA_MS";

/// Startup settings for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub texture_path: PathBuf,
    pub clear_color: wgpu::Color,
    /// Upper bound for a single frame's delta time. `None` keeps raw deltas.
    pub max_frame_delta: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            texture_path: PathBuf::from(TEXTURE_PATH),
            clear_color: CLEAR_COLOR,
            max_frame_delta: None,
        }
    }
}

impl AppConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(TEXTURE_ENV).filter(|value| !value.trim().is_empty()) {
            config.texture_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(MAX_FRAME_DELTA_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => warn!("{MAX_FRAME_DELTA_ENV} must be positive; ignoring"),
                Ok(millis) => config.max_frame_delta = Some(Duration::from_millis(millis)),
                Err(err) => warn!("ignoring {MAX_FRAME_DELTA_ENV}={raw:?}: {err}"),
            }
        }

        config
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_demo() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.texture_path, PathBuf::from("texture/texture.png"));
        assert_eq!(config.max_frame_delta, None);
        assert!((config.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (TEXTURE_ENV, " assets/crate.png "),
            (MAX_FRAME_DELTA_ENV, "250"),
        ]));
        assert_eq!(config.texture_path, PathBuf::from("assets/crate.png"));
        assert_eq!(config.max_frame_delta, Some(Duration::from_millis(250)));
    }

    #[test]
    fn invalid_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (TEXTURE_ENV, "   "),
            (MAX_FRAME_DELTA_ENV, "soon"),
        ]));
        assert_eq!(config, AppConfig::default());

        let config = AppConfig::from_lookup(lookup_from(&[(MAX_FRAME_DELTA_ENV, "0")]));
        assert_eq!(config.max_frame_delta, None);
    }
}
