use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("texture {path} has zero area")]
    Empty { path: PathBuf },
}

/// Decoded diffuse image with its full mip chain, ready for upload.
#[derive(Debug, Clone)]
pub struct TextureImage {
    levels: Vec<RgbaImage>,
}

impl TextureImage {
    /// Reads an image file as RGB (alpha is discarded) and builds its mip
    /// chain.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| TextureError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(TextureError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::from_rgb(decoded))
    }

    /// Converts any decoded image to opaque RGBA8 and builds its mip chain.
    pub fn from_rgb(image: DynamicImage) -> Self {
        // wgpu has no 24-bit format, so the RGB data is widened with an
        // opaque alpha channel.
        let opaque = DynamicImage::ImageRgb8(image.to_rgb8()).to_rgba8();
        Self {
            levels: build_mip_chain(opaque),
        }
    }

    /// 1×1 opaque black stand-in for a texture that failed to load.
    pub fn placeholder() -> Self {
        Self {
            levels: vec![RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))],
        }
    }

    pub fn width(&self) -> u32 {
        self.levels[0].width()
    }

    pub fn height(&self) -> u32 {
        self.levels[0].height()
    }

    pub fn mip_level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn levels(&self) -> &[RgbaImage] {
        &self.levels
    }

    /// All mip levels concatenated, largest first.
    pub fn mip_major_bytes(&self) -> Vec<u8> {
        let total = self.levels.iter().map(|level| level.as_raw().len()).sum();
        let mut bytes = Vec::with_capacity(total);
        for level in &self.levels {
            bytes.extend_from_slice(level.as_raw());
        }
        bytes
    }
}

/// Number of levels down to 1×1 for the given base size.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

fn build_mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let count = mip_level_count(base.width(), base.height());
    let mut levels = Vec::with_capacity(count as usize);
    levels.push(base);
    for _ in 1..count {
        let previous = &levels[levels.len() - 1];
        let width = (previous.width() / 2).max(1);
        let height = (previous.height() / 2).max(1);
        let next = image::imageops::resize(previous, width, height, FilterType::Triangle);
        levels.push(next);
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn mip_count_reaches_one_pixel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 64), 9);
        assert_eq!(mip_level_count(5, 3), 3);
    }

    #[test]
    fn loads_png_from_disk_as_opaque_rgba() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("texture.png");
        let mut source = RgbaImage::from_pixel(8, 4, Rgba([200, 100, 50, 10]));
        source.put_pixel(0, 0, Rgba([1, 2, 3, 0]));
        source.save_with_format(&path, ImageFormat::Png).unwrap();

        let texture = TextureImage::load(&path).unwrap();
        assert_eq!((texture.width(), texture.height()), (8, 4));
        assert_eq!(texture.mip_level_count(), 4);
        let base = &texture.levels()[0];
        assert_eq!(base.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
        assert_eq!(base.get_pixel(7, 3), &Rgba([200, 100, 50, 255]));

        let sizes: Vec<_> = texture.levels().iter().map(|l| l.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 4), (4, 2), (2, 1), (1, 1)]);
        assert_eq!(texture.mip_major_bytes().len(), (32 + 8 + 2 + 1) * 4);
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = TextureImage::load(&path).unwrap_err();
        assert!(matches!(err, TextureError::Load { .. }));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn placeholder_is_single_black_texel() {
        let texture = TextureImage::placeholder();
        assert_eq!(texture.mip_level_count(), 1);
        assert_eq!(texture.mip_major_bytes(), vec![0, 0, 0, 255]);
    }

    #[test]
    fn uniform_colour_survives_downsampling() {
        let image = RgbImage::from_pixel(16, 16, Rgb([40, 80, 120]));
        let texture = TextureImage::from_rgb(DynamicImage::ImageRgb8(image));
        let smallest = texture.levels().last().unwrap();
        assert_eq!(smallest.dimensions(), (1, 1));
        assert_eq!(smallest.get_pixel(0, 0), &Rgba([40, 80, 120, 255]));
    }
}
