//! Wizard state machine.
//!
//! The wizard walks a fixed sequence of nine screens. Photo captures land in
//! named slots; advancing past the Results screen wraps back to the intro and
//! clears every slot so a fresh run never inherits stale photos.

use crate::crop::CapturedImage;

/// The nine screens of the assessment, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WizardStep {
    /// Welcome screen explaining what the tool does.
    Intro,
    /// Background on tongue tie and why it matters.
    Education,
    /// Instructions for the wide-open baseline photo.
    WideOpenPrimer,
    /// Live capture of the wide-open baseline.
    WideOpenCapture,
    /// Instructions for the anterior (tip raised) photo.
    AnteriorPrimer,
    /// Live capture of the anterior position.
    AnteriorCapture,
    /// Instructions for the posterior (suction hold) photo.
    PosteriorPrimer,
    /// Live capture of the suction hold.
    PosteriorCapture,
    /// Comparison report with the grade reference tables.
    Results,
}

/// Total number of screens.
pub const STEP_COUNT: usize = 9;

const STEP_SEQUENCE: [WizardStep; STEP_COUNT] = [
    WizardStep::Intro,
    WizardStep::Education,
    WizardStep::WideOpenPrimer,
    WizardStep::WideOpenCapture,
    WizardStep::AnteriorPrimer,
    WizardStep::AnteriorCapture,
    WizardStep::PosteriorPrimer,
    WizardStep::PosteriorCapture,
    WizardStep::Results,
];

impl Default for WizardStep {
    fn default() -> Self {
        Self::Intro
    }
}

impl WizardStep {
    /// Returns the step index in `[0, STEP_COUNT)`.
    pub fn index(&self) -> usize {
        STEP_SEQUENCE
            .iter()
            .position(|s| s == self)
            .expect("step present in sequence")
    }

    /// Returns the step for an index, wrapping modulo the step count.
    pub fn from_index(index: usize) -> Self {
        STEP_SEQUENCE[index % STEP_COUNT]
    }

    /// Returns the next step; the Results screen wraps to the intro.
    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Returns the capture slot this step photographs, if it is a capture
    /// step.
    pub fn capture_slot(&self) -> Option<CaptureSlot> {
        match self {
            Self::WideOpenCapture => Some(CaptureSlot::WideOpen),
            Self::AnteriorCapture => Some(CaptureSlot::Anterior),
            Self::PosteriorCapture => Some(CaptureSlot::Posterior),
            _ => None,
        }
    }
}

/// A named storage location for one processed photo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureSlot {
    /// Mouth wide open, the baseline shot.
    WideOpen,
    /// Tongue tip raised behind the upper teeth.
    Anterior,
    /// Tongue suctioned to the palate.
    Posterior,
}

impl CaptureSlot {
    /// Parses a slot name, rejecting empty or unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "wideopen" => Some(Self::WideOpen),
            "anterior" => Some(Self::Anterior),
            "posterior" => Some(Self::Posterior),
            _ => None,
        }
    }

    /// The slot name, also the overlay guide illustration name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WideOpen => "wideopen",
            Self::Anterior => "anterior",
            Self::Posterior => "posterior",
        }
    }
}

/// The collection of captured photos, keyed by slot.
///
/// Mutation always builds a new value rather than editing in place, so a
/// stale reference to a previous collection can never observe a later write.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Captures {
    wideopen: Option<CapturedImage>,
    anterior: Option<CapturedImage>,
    posterior: Option<CapturedImage>,
}

impl Captures {
    /// Returns a new collection with `slot` replaced by `photo`.
    pub fn with(&self, slot: CaptureSlot, photo: CapturedImage) -> Self {
        let mut next = self.clone();
        match slot {
            CaptureSlot::WideOpen => next.wideopen = Some(photo),
            CaptureSlot::Anterior => next.anterior = Some(photo),
            CaptureSlot::Posterior => next.posterior = Some(photo),
        }
        next
    }

    pub fn get(&self, slot: CaptureSlot) -> Option<&CapturedImage> {
        match slot {
            CaptureSlot::WideOpen => self.wideopen.as_ref(),
            CaptureSlot::Anterior => self.anterior.as_ref(),
            CaptureSlot::Posterior => self.posterior.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.wideopen.is_none() && self.anterior.is_none() && self.posterior.is_none()
    }
}

/// The wizard: current screen plus the captured photos.
#[derive(Clone, Debug, Default)]
pub struct WizardState {
    step: WizardStep,
    captures: Captures,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    /// Stores a photo under a named slot.
    ///
    /// Returns false, leaving the state untouched, if the slot name is empty
    /// or unknown or the payload is empty. A true return fully replaces any
    /// photo previously held by the slot.
    pub fn record_capture(&mut self, slot: &str, photo: CapturedImage) -> bool {
        let Some(slot) = CaptureSlot::parse(slot) else {
            crate::log(&format!("Rejected capture for unknown slot '{}'", slot));
            return false;
        };
        if photo.is_empty() {
            crate::log(&format!("Rejected empty capture for slot '{}'", slot.name()));
            return false;
        }
        self.captures = self.captures.with(slot, photo);
        crate::log(&format!("Recorded capture for slot '{}'", slot.name()));
        true
    }

    /// Moves to the next screen; wrapping back to the intro restarts the run
    /// and clears the capture collection.
    pub fn advance(&mut self) {
        self.step = self.step.next();
        if self.step == WizardStep::Intro {
            self.captures = Captures::default();
            crate::log("Wizard restarted, captures cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(marker: u8) -> CapturedImage {
        CapturedImage {
            data: vec![marker; 16],
            side: 4,
        }
    }

    #[test]
    fn test_step_sequence_order() {
        assert_eq!(WizardStep::Intro.index(), 0);
        assert_eq!(WizardStep::WideOpenCapture.index(), 3);
        assert_eq!(WizardStep::Results.index(), 8);
        assert_eq!(WizardStep::Results.next(), WizardStep::Intro);
    }

    #[test]
    fn test_capture_steps_map_to_slots() {
        assert_eq!(
            WizardStep::WideOpenCapture.capture_slot(),
            Some(CaptureSlot::WideOpen)
        );
        assert_eq!(
            WizardStep::AnteriorCapture.capture_slot(),
            Some(CaptureSlot::Anterior)
        );
        assert_eq!(
            WizardStep::PosteriorCapture.capture_slot(),
            Some(CaptureSlot::Posterior)
        );
        assert_eq!(WizardStep::Intro.capture_slot(), None);
        assert_eq!(WizardStep::Results.capture_slot(), None);
    }

    #[test]
    fn test_slot_parse_rejects_unknown() {
        assert_eq!(CaptureSlot::parse("wideopen"), Some(CaptureSlot::WideOpen));
        assert_eq!(CaptureSlot::parse(""), None);
        assert_eq!(CaptureSlot::parse("WIDEOPEN"), None);
        assert_eq!(CaptureSlot::parse("profile"), None);
    }

    #[test]
    fn test_record_capture_stores_and_replaces() {
        let mut wizard = WizardState::new();

        assert!(wizard.record_capture("anterior", photo(1)));
        assert_eq!(
            wizard.captures().get(CaptureSlot::Anterior),
            Some(&photo(1))
        );

        // A second capture replaces, never merges
        assert!(wizard.record_capture("anterior", photo(2)));
        assert_eq!(
            wizard.captures().get(CaptureSlot::Anterior),
            Some(&photo(2))
        );
    }

    #[test]
    fn test_record_capture_rejects_bad_input() {
        let mut wizard = WizardState::new();

        assert!(!wizard.record_capture("", photo(1)));
        assert!(!wizard.record_capture("unknown", photo(1)));
        assert!(!wizard.record_capture(
            "wideopen",
            CapturedImage {
                data: Vec::new(),
                side: 0
            }
        ));
        assert!(wizard.captures().is_empty());
    }

    #[test]
    fn test_advance_wraps_and_clears_captures() {
        let mut wizard = WizardState::new();
        assert!(wizard.record_capture("wideopen", photo(7)));

        for i in 1..STEP_COUNT {
            wizard.advance();
            assert_eq!(wizard.step().index(), i);
            assert!(!wizard.captures().is_empty());
        }

        // Ninth advance wraps to the intro and resets the collection
        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::Intro);
        assert!(wizard.captures().is_empty());
    }

    #[test]
    fn test_captures_copy_on_write() {
        let captures = Captures::default();
        let updated = captures.with(CaptureSlot::WideOpen, photo(3));
        assert!(captures.is_empty());
        assert_eq!(updated.get(CaptureSlot::WideOpen), Some(&photo(3)));
    }
}
