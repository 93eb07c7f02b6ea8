//! Illustration loading and texture caching.
//!
//! Named illustrations (overlay guides, grade reference pictures) live under
//! `resources/images/<name>.png` and are uploaded as egui textures on first
//! use. A missing or unreadable file caches as `None`; the render layer draws
//! a placeholder box for those, so a half-installed resources directory never
//! breaks the wizard.

use eframe::egui::{self, TextureHandle};
use std::collections::HashMap;

use crate::paths;

#[derive(Default)]
pub struct AssetLibrary {
    textures: HashMap<String, Option<TextureHandle>>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture for a named illustration, loading it on first
    /// request.
    pub fn texture(&mut self, ctx: &egui::Context, name: &str) -> Option<TextureHandle> {
        if let Some(cached) = self.textures.get(name) {
            return cached.clone();
        }

        let loaded = load_texture(ctx, name);
        if loaded.is_none() {
            crate::log(&format!("Illustration '{}' not available", name));
        }
        self.textures.insert(name.to_string(), loaded.clone());
        loaded
    }
}

fn load_texture(ctx: &egui::Context, name: &str) -> Option<TextureHandle> {
    let path = paths::get_images_dir().join(format!("{}.png", name));
    let image = image::open(&path).ok()?;

    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
    Some(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
}
