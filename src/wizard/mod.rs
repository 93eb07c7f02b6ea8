//! Wizard flow for the self-assessment.
//!
//! This module provides:
//! - The fixed nine-step sequence and capture collection (`state`)
//! - The per-step capture state machine (`capture_step`)
//! - Static grade reference tables (`grades`)

pub mod capture_step;
pub mod grades;
pub mod state;

pub use capture_step::{CapturePhase, CaptureStep};
pub use state::{CaptureSlot, Captures, WizardState, WizardStep};
