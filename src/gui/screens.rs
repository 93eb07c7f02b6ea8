//! Static screen copy for the wizard.
//!
//! Instructional screens share one shape (title, optional illustration, body
//! text, optional external links, a next button); capture screens carry a
//! title and an on-screen instruction. All of it is fixed content.

use crate::wizard::{CaptureSlot, WizardStep};

/// Copy for an instructional (non-capture, non-results) screen.
pub struct InfoScreen {
    pub title: &'static str,
    /// Illustration name under `resources/images/`, if any.
    pub illustration: Option<&'static str>,
    pub body: &'static str,
    /// (label, url) pairs opened in the browser.
    pub links: &'static [(&'static str, &'static str)],
    pub next_label: &'static str,
}

/// Copy for a capture screen.
pub struct CaptureScreen {
    pub title: &'static str,
    pub instruction: &'static str,
}

/// Returns the copy for an instructional step, or None for capture/results
/// steps.
pub fn info_screen(step: WizardStep) -> Option<InfoScreen> {
    match step {
        WizardStep::Intro => Some(InfoScreen {
            title: "Do I Have Tongue Tie? (for adults)",
            illustration: None,
            body: "This is a self-assessment tool for functional tongue-tie in adults \
                   that uses your webcam or selfie cam to measure and classify your \
                   tongue mobility. It will take photos of your tongue, but nothing is \
                   uploaded anywhere - everything stays on this computer.",
            links: &[],
            next_label: "Learn More",
        }),
        WizardStep::Education => Some(InfoScreen {
            title: "What is Tongue Tie? Why does it matter?",
            illustration: Some("whatistonguetie"),
            body: "Tongue tie is a common condition that affects facial development in \
                   young adults, and a contributing factor to obstructive sleep apnea. \
                   It affects your posture, swallowing, breathing, and speech.",
            links: &[
                ("Soroush Zaghi, MD", "https://www.zaghimd.com/tongue-tie"),
                (
                    "Published research",
                    "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC8247966/",
                ),
            ],
            next_label: "Assess me",
        }),
        WizardStep::WideOpenPrimer => Some(InfoScreen {
            title: "Wide Open Baseline",
            illustration: Some("wideopenblack"),
            body: "The first step is to measure the distance between your upper and \
                   lower teeth when your mouth is wide open. Open your mouth as wide \
                   as you can without pain or discomfort. It will take a picture using \
                   your camera.",
            links: &[],
            next_label: "Allow Camera Access",
        }),
        WizardStep::AnteriorPrimer => Some(InfoScreen {
            title: "Anterior Tongue Range of Motion",
            illustration: Some("tipup"),
            body: "While keeping your mouth wide open, raise the tip of your tongue to \
                   behind your upper teeth without pain or discomfort.",
            links: &[],
            next_label: "Next",
        }),
        WizardStep::PosteriorPrimer => Some(InfoScreen {
            title: "Posterior Tongue Range of Motion",
            illustration: Some("suctionhold"),
            body: "The suction hold is a bit tricky. The video helps explain. Lift and \
                   suction the entire tongue up to the palate and open your mouth as \
                   wide as you can without pain or discomfort.",
            links: &[(
                "Watch: the suction hold",
                "https://www.youtube.com/embed/cZeK-Jbcvyc",
            )],
            next_label: "Next",
        }),
        _ => None,
    }
}

/// Returns the copy for a capture slot's screen.
pub fn capture_screen(slot: CaptureSlot) -> CaptureScreen {
    match slot {
        CaptureSlot::WideOpen => CaptureScreen {
            title: "Wide Open Photo",
            instruction: "Align your upper and lower teeth with the overlaid drawing",
        },
        CaptureSlot::Anterior => CaptureScreen {
            title: "Anterior Photo",
            instruction: "How high you can raise the tip indicates the anterior range \
                          of motion ratio.",
        },
        CaptureSlot::Posterior => CaptureScreen {
            title: "Posterior Photo",
            instruction: "How low you can drop your jaw indicates the posterior range \
                          of motion ratio.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::state::STEP_COUNT;

    #[test]
    fn test_every_step_has_a_screen() {
        for i in 0..STEP_COUNT {
            let step = WizardStep::from_index(i);
            match step.capture_slot() {
                Some(slot) => {
                    assert!(info_screen(step).is_none());
                    assert!(!capture_screen(slot).title.is_empty());
                }
                None if step == WizardStep::Results => {
                    assert!(info_screen(step).is_none());
                }
                None => {
                    let screen = info_screen(step).expect("info screen copy");
                    assert!(!screen.title.is_empty());
                    assert!(!screen.next_label.is_empty());
                }
            }
        }
    }
}
