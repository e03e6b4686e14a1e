//! Type icon loading.
//!
//! Icons live at `<icons_dir>/<Type>.png` and are resized to a square of the
//! configured edge length once at startup.

use anyhow::{Context, Result};
use eframe::egui::{self, ColorImage, TextureHandle};
use image::imageops::FilterType;
use std::collections::HashMap;
use std::path::Path;

/// Loaded textures keyed by type name.
#[derive(Default)]
pub struct TypeIcons {
    textures: HashMap<String, TextureHandle>,
    size: f32,
}

impl TypeIcons {
    /// Loads one icon per type name. Missing or undecodable files are
    /// logged and left out.
    pub fn load(ctx: &egui::Context, dir: &Path, type_names: &[String], size: u32) -> Self {
        let mut textures = HashMap::new();

        for name in type_names {
            let path = dir.join(format!("{}.png", name));
            match load_icon_image(&path, size) {
                Ok(image) => {
                    let texture = ctx.load_texture(
                        format!("type_icon_{}", name),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    textures.insert(name.clone(), texture);
                }
                Err(e) => {
                    crate::log(&format!("Warning: icon for {} not loaded: {:#}", name, e));
                }
            }
        }

        crate::log(&format!(
            "Loaded {}/{} type icons from {}",
            textures.len(),
            type_names.len(),
            dir.display()
        ));

        Self {
            textures,
            size: size as f32,
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&TextureHandle> {
        self.textures.get(type_name)
    }

    /// Edge length in points.
    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Decodes an icon file and resizes it to `size`×`size`.
pub fn load_icon_image(path: &Path, size: u32) -> Result<ColorImage> {
    let img = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let resized = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
    let dims = [resized.width() as usize, resized.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(dims, resized.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn test_load_icon_image_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fire.png");
        let icon: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(64, 48, Rgba([240, 128, 48, 255]));
        icon.save(&path).unwrap();

        let image = load_icon_image(&path, 30).unwrap();
        assert_eq!(image.size, [30, 30]);
    }

    #[test]
    fn test_bundled_icons_cover_chart() {
        let chart = crate::reference::TypeChart::from_json_str(include_str!(
            "../../data/type_chart.json"
        ))
        .unwrap();
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/icons");
        for name in chart.type_names() {
            assert!(
                load_icon_image(&dir.join(format!("{}.png", name)), 30).is_ok(),
                "no icon for {}",
                name
            );
        }
    }

    #[test]
    fn test_missing_icon_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_icon_image(&dir.path().join("Fairy.png"), 30).is_err());
    }
}
