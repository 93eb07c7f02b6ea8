//! Square crop of captured photos.
//!
//! Every snapshot is reduced to a centered square around the mouth region
//! before it is stored: the side is a quarter of the larger source dimension,
//! centered horizontally but anchored at the vertical midpoint of the frame
//! (the lower half is where the mouth sits in a mirrored selfie frame). The
//! asymmetric vertical anchor is intentional and the overlay guides are drawn
//! to match it; flagged for product review, do not "fix" it to a center crop.

use anyhow::{bail, Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, ImageBuffer, Rgb, RgbImage};

/// Fraction of the larger source dimension used as the crop square side.
pub const CROP_PORTION: f64 = 0.25;

/// JPEG quality for stored captures.
pub const CAPTURE_JPEG_QUALITY: u8 = 90;

/// One processed photo: an encoded square JPEG plus its side length.
///
/// Created by [`crop_snapshot`], owned by the wizard state once recorded,
/// and never mutated afterwards. A re-capture of the same slot replaces the
/// whole value.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedImage {
    /// JPEG-encoded payload.
    pub data: Vec<u8>,
    /// Side length of the square image in pixels.
    pub side: u32,
}

impl CapturedImage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Crops a raw snapshot payload to the assessment square and re-encodes it.
///
/// Fails if the payload cannot be decoded or is too small to produce a
/// non-empty crop region. Decode failures must not be swallowed: the caller
/// keeps the capture step active so the user can retry.
pub fn crop_snapshot(payload: &[u8]) -> Result<CapturedImage> {
    let source = image::load_from_memory(payload)
        .context("Failed to decode snapshot payload")?
        .to_rgb8();

    let square = crop_square(&source)?;

    let mut data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut data, CAPTURE_JPEG_QUALITY);
    square
        .write_with_encoder(encoder)
        .context("Failed to encode cropped capture")?;

    Ok(CapturedImage {
        data,
        side: square.width(),
    })
}

/// Extracts the crop square from a decoded frame.
///
/// The region is `[new_x, new_y, size, size]` with
/// `size = max(w, h) * CROP_PORTION`, `new_x = (w - size) / 2` and
/// `new_y = h / 2`. The region may extend past the frame edges for extreme
/// aspect ratios; pixels outside the source stay black, matching how a canvas
/// draw clips an out-of-bounds source rectangle.
fn crop_square(source: &RgbImage) -> Result<RgbImage> {
    let (old_w, old_h) = source.dimensions();
    let size = (f64::from(old_w.max(old_h)) * CROP_PORTION) as u32;
    if size == 0 {
        bail!("Snapshot too small to crop ({}x{})", old_w, old_h);
    }

    let new_x = (i64::from(old_w) - i64::from(size)) / 2;
    let new_y = i64::from(old_h) / 2;

    let mut dest: RgbImage = ImageBuffer::from_pixel(size, size, Rgb([0, 0, 0]));

    // Intersect the crop region with the source bounds.
    let src_x0 = new_x.max(0);
    let src_y0 = new_y.max(0);
    let src_x1 = (new_x + i64::from(size)).min(i64::from(old_w));
    let src_y1 = (new_y + i64::from(size)).min(i64::from(old_h));

    if src_x1 > src_x0 && src_y1 > src_y0 {
        let visible = imageops::crop_imm(
            source,
            src_x0 as u32,
            src_y0 as u32,
            (src_x1 - src_x0) as u32,
            (src_y1 - src_y0) as u32,
        )
        .to_image();
        imageops::overlay(&mut dest, &visible, src_x0 - new_x, src_y0 - new_y);
    }

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(w: u32, h: u32) -> RgbImage {
        ImageBuffer::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]))
    }

    fn encode_jpeg(img: &RgbImage) -> Vec<u8> {
        let mut data = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut data, 95);
        img.write_with_encoder(encoder).unwrap();
        data
    }

    #[test]
    fn test_crop_region_400x300() {
        // size = max(100, 75) = 100, x = 150, y = 150
        let square = crop_square(&gradient_frame(400, 300)).unwrap();
        assert_eq!(square.dimensions(), (100, 100));
        // Top-left pixel of the crop is source pixel (150, 150)
        assert_eq!(square.get_pixel(0, 0)[0], 150);
        assert_eq!(square.get_pixel(0, 0)[1], 150);
    }

    #[test]
    fn test_crop_always_square() {
        for (w, h) in [(1280, 720), (720, 1280), (333, 501), (50, 50), (4, 9)] {
            let square = crop_square(&gradient_frame(w, h)).unwrap();
            assert_eq!(square.width(), square.height(), "source {}x{}", w, h);
            assert_eq!(square.width(), (f64::from(w.max(h)) * 0.25) as u32);
        }
    }

    #[test]
    fn test_crop_vertical_anchor_is_midpoint() {
        // 200x200: size 50, x 75, y 100 (not the centered 75)
        let square = crop_square(&gradient_frame(200, 200)).unwrap();
        assert_eq!(square.get_pixel(0, 0)[1], 100);
    }

    #[test]
    fn test_crop_clips_out_of_bounds_region() {
        // 1000x100: size 250 exceeds the frame height; region starts at
        // y = 50, so only 50 source rows exist. The rest must be black.
        let square = crop_square(&gradient_frame(1000, 100)).unwrap();
        assert_eq!(square.dimensions(), (250, 250));
        // Row 0 maps to source row 50
        assert_eq!(square.get_pixel(0, 0)[1], 50);
        // Rows past the source bottom are black fill
        assert_eq!(*square.get_pixel(0, 100), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_crop_centers_region_wider_than_frame() {
        // 100x1000: size 250 exceeds the frame width, so the horizontal
        // offset is negative (-75) and the source lands centered with black
        // bars on both sides.
        let square = crop_square(&gradient_frame(100, 1000)).unwrap();
        assert_eq!(square.dimensions(), (250, 250));
        assert_eq!(*square.get_pixel(0, 0), Rgb([0, 0, 0]));
        // Dest column 75 maps to source column 0 at source row 500
        assert_eq!(square.get_pixel(75, 0)[0], 0);
        assert_eq!(square.get_pixel(75, 0)[1], (500 % 256) as u8);
        assert_eq!(*square.get_pixel(249, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_crop_snapshot_round_trip() {
        let payload = encode_jpeg(&gradient_frame(400, 300));
        let captured = crop_snapshot(&payload).unwrap();
        assert_eq!(captured.side, 100);
        assert!(!captured.is_empty());

        let decoded = image::load_from_memory(&captured.data).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 100);
    }

    #[test]
    fn test_crop_snapshot_rejects_garbage() {
        assert!(crop_snapshot(b"not an image").is_err());
        assert!(crop_snapshot(&[]).is_err());
    }

    #[test]
    fn test_crop_rejects_degenerate_frame() {
        assert!(crop_square(&gradient_frame(2, 2)).is_err());
    }
}
