//! Webcam access.
//!
//! This module provides:
//! - Camera discovery and opening (`CameraSource::open`)
//! - Live preview frames for the capture screens
//! - On-demand JPEG snapshots

pub mod source;

pub use source::CameraSource;
