//! Webcam source backed by nokhwa.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbImage};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use crate::config::AppConfig;

/// JPEG quality for raw snapshots handed to the cropper.
const SNAPSHOT_JPEG_QUALITY: u8 = 92;

/// An open webcam producing preview frames and snapshots.
///
/// Frames are mirrored horizontally when configured (the default), so the
/// preview behaves like a selfie camera and the stored photos match what the
/// user aligned against the overlay guide.
pub struct CameraSource {
    camera: Camera,
    mirror: bool,
}

impl CameraSource {
    /// Opens the configured camera with the closest format to the preferred
    /// resolution and starts streaming.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let index = CameraIndex::Index(config.camera_index);
        let preferred = CameraFormat::new(
            Resolution::new(config.capture_width, config.capture_height),
            FrameFormat::MJPEG,
            30,
        );
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(preferred));

        let mut camera = Camera::new(index, requested)
            .with_context(|| format!("Failed to open camera {}", config.camera_index))?;
        camera
            .open_stream()
            .context("Failed to start camera stream")?;

        let res = camera.resolution();
        crate::log(&format!(
            "Camera opened: {} at {}x{}",
            camera.info().human_name(),
            res.width(),
            res.height()
        ));

        Ok(Self {
            camera,
            mirror: config.mirror,
        })
    }

    /// Grabs one live frame for preview display.
    pub fn preview_frame(&mut self) -> Result<RgbImage> {
        let frame = self
            .camera
            .frame()
            .context("Failed to read camera frame")?
            .decode_image::<RgbFormat>()
            .context("Failed to decode camera frame")?;
        Ok(self.oriented(frame))
    }

    /// Takes one still snapshot of the current frame as a JPEG payload.
    pub fn snapshot(&mut self) -> Result<Vec<u8>> {
        let frame = self
            .camera
            .frame()
            .context("Failed to read snapshot frame")?
            .decode_image::<RgbFormat>()
            .context("Failed to decode snapshot frame")?;
        let frame = self.oriented(frame);

        let mut data = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut data, SNAPSHOT_JPEG_QUALITY);
        frame
            .write_with_encoder(encoder)
            .context("Failed to encode snapshot")?;
        Ok(data)
    }

    fn oriented(&self, frame: RgbImage) -> RgbImage {
        if self.mirror {
            imageops::flip_horizontal(&frame)
        } else {
            frame
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            crate::log(&format!("Failed to stop camera stream: {}", e));
        }
    }
}
