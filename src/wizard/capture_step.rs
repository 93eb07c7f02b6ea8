//! Per-step capture state machine.
//!
//! Each capture screen owns one `CaptureStep` instance sequencing:
//! Idle (previewing) → Captured (snapshot taken, crop pending) → Reported
//! (crop stored, advance requested). The instance is discarded when the
//! wizard moves to the next screen.

use crate::crop::{self, CapturedImage};
use crate::wizard::state::{CaptureSlot, WizardState};

/// Phase of a capture step instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CapturePhase {
    /// Previewing, nothing captured yet.
    Idle,
    /// Raw snapshot taken, crop in progress.
    Captured,
    /// Crop committed and advance requested. Terminal.
    Reported,
}

/// State machine driving one capture screen.
pub struct CaptureStep {
    slot: CaptureSlot,
    phase: CapturePhase,
    /// Last surfaced failure, shown on screen until the next attempt.
    error: Option<String>,
}

impl CaptureStep {
    pub fn new(slot: CaptureSlot) -> Self {
        Self {
            slot,
            phase: CapturePhase::Idle,
            error: None,
        }
    }

    pub fn phase(&self) -> &CapturePhase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Processes one snapshot attempt.
    ///
    /// An empty payload (camera denied or no frame produced) leaves the step
    /// idle with no wizard change, so the user can never falsely advance. A
    /// crop failure surfaces an error and returns to idle for retry. Only a
    /// successful crop that the wizard accepts advances the wizard; returns
    /// true in exactly that case.
    pub fn process_snapshot(&mut self, payload: &[u8], wizard: &mut WizardState) -> bool {
        if self.phase == CapturePhase::Reported {
            return false;
        }
        if payload.is_empty() {
            crate::log(&format!(
                "Snapshot for '{}' was empty, staying on step",
                self.slot.name()
            ));
            self.phase = CapturePhase::Idle;
            return false;
        }

        self.phase = CapturePhase::Captured;
        let photo: CapturedImage = match crop::crop_snapshot(payload) {
            Ok(photo) => photo,
            Err(e) => {
                crate::log(&format!("Crop failed for '{}': {}", self.slot.name(), e));
                self.error = Some(format!("Could not process the photo: {}", e));
                self.phase = CapturePhase::Idle;
                return false;
            }
        };

        // Commit before advancing; an advance on a rejected capture must
        // never happen.
        if !wizard.record_capture(self.slot.name(), photo) {
            self.phase = CapturePhase::Idle;
            return false;
        }

        self.error = None;
        self.phase = CapturePhase::Reported;
        wizard.advance();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::state::WizardStep;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ImageBuffer, Rgb, RgbImage};

    fn jpeg_frame(w: u32, h: u32) -> Vec<u8> {
        let img: RgbImage = ImageBuffer::from_pixel(w, h, Rgb([120, 90, 60]));
        let mut data = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut data, 95);
        img.write_with_encoder(encoder).unwrap();
        data
    }

    fn wizard_at(step: WizardStep) -> WizardState {
        let mut wizard = WizardState::new();
        while wizard.step() != step {
            wizard.advance();
        }
        wizard
    }

    #[test]
    fn test_snapshot_records_and_advances() {
        // Walk to the wide-open capture screen like a user would
        let mut wizard = wizard_at(WizardStep::WideOpenCapture);
        let mut step = CaptureStep::new(CaptureSlot::WideOpen);

        assert!(step.process_snapshot(&jpeg_frame(400, 300), &mut wizard));
        assert_eq!(*step.phase(), CapturePhase::Reported);
        assert_eq!(wizard.step().index(), 4);
        assert!(wizard.captures().get(CaptureSlot::WideOpen).is_some());
    }

    #[test]
    fn test_empty_snapshot_never_advances() {
        let mut wizard = wizard_at(WizardStep::AnteriorCapture);
        let mut step = CaptureStep::new(CaptureSlot::Anterior);

        assert!(!step.process_snapshot(&[], &mut wizard));
        assert_eq!(*step.phase(), CapturePhase::Idle);
        assert_eq!(wizard.step(), WizardStep::AnteriorCapture);
        assert!(wizard.captures().is_empty());
    }

    #[test]
    fn test_undecodable_snapshot_surfaces_error_and_allows_retry() {
        let mut wizard = wizard_at(WizardStep::PosteriorCapture);
        let mut step = CaptureStep::new(CaptureSlot::Posterior);

        assert!(!step.process_snapshot(b"garbage bytes", &mut wizard));
        assert_eq!(*step.phase(), CapturePhase::Idle);
        assert!(step.error().is_some());
        assert_eq!(wizard.step(), WizardStep::PosteriorCapture);
        assert!(wizard.captures().is_empty());

        // Retry with a good frame clears the error and advances
        assert!(step.process_snapshot(&jpeg_frame(640, 480), &mut wizard));
        assert!(step.error().is_none());
        assert_eq!(wizard.step(), WizardStep::Results);
    }

    #[test]
    fn test_reported_is_terminal() {
        let mut wizard = wizard_at(WizardStep::WideOpenCapture);
        let mut step = CaptureStep::new(CaptureSlot::WideOpen);

        assert!(step.process_snapshot(&jpeg_frame(400, 300), &mut wizard));
        let after_first = wizard.step();

        assert!(!step.process_snapshot(&jpeg_frame(400, 300), &mut wizard));
        assert_eq!(wizard.step(), after_first);
    }
}
