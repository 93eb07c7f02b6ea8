//! Report export.
//!
//! Flattens the visible results region (grade tables plus comparison photos)
//! from a viewport screenshot into a single JPEG and writes it with a
//! timestamped filename.

use anyhow::{bail, Context, Result};
use chrono::Local;
use eframe::egui;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// JPEG quality for exported reports.
const REPORT_JPEG_QUALITY: u8 = 100;

/// Crops a viewport screenshot down to the report region.
///
/// `region` is in logical points; the screenshot is in physical pixels, so
/// the rect is scaled by `pixels_per_point` and clamped to the framebuffer.
pub fn flatten_region(
    screenshot: &egui::ColorImage,
    region: egui::Rect,
    pixels_per_point: f32,
) -> Result<RgbImage> {
    let [img_w, img_h] = screenshot.size;

    let x0 = ((region.min.x * pixels_per_point).floor().max(0.0) as usize).min(img_w);
    let y0 = ((region.min.y * pixels_per_point).floor().max(0.0) as usize).min(img_h);
    let x1 = ((region.max.x * pixels_per_point).ceil().max(0.0) as usize).min(img_w);
    let y1 = ((region.max.y * pixels_per_point).ceil().max(0.0) as usize).min(img_h);

    if x1 <= x0 || y1 <= y0 {
        bail!("Results region is empty or off screen");
    }

    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
    let out: RgbImage = ImageBuffer::from_fn(w, h, |x, y| {
        let pixel = screenshot.pixels[(y0 + y as usize) * img_w + (x0 + x as usize)];
        Rgb([pixel.r(), pixel.g(), pixel.b()])
    });
    Ok(out)
}

/// Writes a report image to `dir` as `result-<timestamp>.jpg`.
///
/// A numeric suffix disambiguates same-second exports. Returns the path of
/// the written file.
pub fn write_report(report: &RgbImage, dir: &Path) -> Result<PathBuf> {
    let mut data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut data, REPORT_JPEG_QUALITY);
    report
        .write_with_encoder(encoder)
        .context("Failed to encode report image")?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let mut path = dir.join(format!("result-{}.jpg", timestamp));
    let mut counter = 1;
    while path.exists() {
        path = dir.join(format!("result-{}-{}.jpg", timestamp, counter));
        counter += 1;
    }

    std::fs::write(&path, &data)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(path)
}

/// Flattens and writes in one step; the GUI calls this when the viewport
/// screenshot arrives.
pub fn save_report(
    screenshot: &egui::ColorImage,
    region: egui::Rect,
    pixels_per_point: f32,
    dir: &Path,
) -> Result<PathBuf> {
    let report = flatten_region(screenshot, region, pixels_per_point)?;
    write_report(&report, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Color32, ColorImage, Pos2, Rect};
    use tempfile::tempdir;

    fn checker_screenshot(w: usize, h: usize) -> ColorImage {
        let pixels = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                if x < 10 && y < 10 {
                    Color32::RED
                } else {
                    Color32::WHITE
                }
            })
            .collect();
        ColorImage {
            size: [w, h],
            pixels,
        }
    }

    #[test]
    fn test_flatten_region_scales_points_to_pixels() {
        let screenshot = checker_screenshot(200, 100);
        // 10x10 points at 2x scale = 20x20 pixels from the origin
        let region = Rect::from_min_max(Pos2::ZERO, Pos2::new(10.0, 10.0));

        let report = flatten_region(&screenshot, region, 2.0).unwrap();
        assert_eq!(report.dimensions(), (20, 20));
        assert_eq!(*report.get_pixel(0, 0), Rgb([255, 0, 0]));
        assert_eq!(*report.get_pixel(15, 15), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_flatten_region_clamps_to_framebuffer() {
        let screenshot = checker_screenshot(50, 50);
        let region = Rect::from_min_max(Pos2::new(40.0, 40.0), Pos2::new(90.0, 90.0));

        let report = flatten_region(&screenshot, region, 1.0).unwrap();
        assert_eq!(report.dimensions(), (10, 10));
    }

    #[test]
    fn test_flatten_region_rejects_off_screen() {
        let screenshot = checker_screenshot(50, 50);
        let region = Rect::from_min_max(Pos2::new(60.0, 60.0), Pos2::new(90.0, 90.0));
        assert!(flatten_region(&screenshot, region, 1.0).is_err());
    }

    #[test]
    fn test_write_report_filename_and_collisions() {
        let dir = tempdir().unwrap();
        let report: RgbImage = ImageBuffer::from_pixel(8, 8, Rgb([10, 20, 30]));

        let first = write_report(&report, dir.path()).unwrap();
        let name = first.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("result-"));
        assert!(name.ends_with(".jpg"));

        // Same-second export gets a distinguishing suffix
        let second = write_report(&report, dir.path()).unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());

        let decoded = image::open(&first).unwrap();
        assert_eq!(decoded.width(), 8);
    }
}
