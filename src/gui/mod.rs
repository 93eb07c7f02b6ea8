//! GUI module for the application.
//!
//! Runs the assessment wizard as an egui/eframe app. The app struct owns the
//! wizard state and the camera; rendering is delegated to `render`, screen
//! copy lives in `screens`, and illustrations are cached by `assets`.

pub mod assets;
pub mod render;
pub mod screens;

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui::{self, TextureHandle, Vec2};

use crate::camera::CameraSource;
use crate::config::get_config;
use crate::crop::CapturedImage;
use crate::export;
use crate::paths;
use crate::wizard::{CaptureSlot, CaptureStep, WizardState, WizardStep};

use assets::AssetLibrary;
use render::ResultsPhotos;

/// Main wizard application.
pub struct WizardApp {
    /// Wizard state: current screen plus captured photos.
    wizard: WizardState,
    /// Illustration texture cache.
    assets: AssetLibrary,
    /// Capture state machine for the active capture screen, if any.
    capture_step: Option<CaptureStep>,
    /// Open camera while a capture screen is showing.
    camera: Option<CameraSource>,
    /// Camera failure surfaced on the capture screen.
    camera_error: Option<String>,
    /// Live preview frame, re-uploaded every frame while capturing.
    preview_texture: Option<TextureHandle>,
    /// Captured-photo textures for the Results screen.
    results_photos: Option<ResultsPhotos>,
    /// On-screen report region from the last Results frame, in points.
    report_region: Option<egui::Rect>,
    /// Outcome of the last export attempt.
    export_outcome: Option<Result<PathBuf, String>>,
    /// Step rendered last frame, for transition handling.
    last_step: WizardStep,
}

impl WizardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            wizard: WizardState::new(),
            assets: AssetLibrary::new(),
            capture_step: None,
            camera: None,
            camera_error: None,
            preview_texture: None,
            results_photos: None,
            report_region: None,
            export_outcome: None,
            last_step: WizardStep::Intro,
        }
    }

    /// Reacts to the wizard moving to a different screen.
    fn sync_step(&mut self, ctx: &egui::Context) {
        let step = self.wizard.step();
        if step == self.last_step {
            return;
        }
        crate::log(&format!("Screen change: {:?} -> {:?}", self.last_step, step));
        self.last_step = step;

        match step.capture_slot() {
            Some(slot) => {
                self.capture_step = Some(CaptureStep::new(slot));
                self.camera_error = None;
                self.open_camera();
            }
            None => {
                // Only one screen is ever active; release the camera as soon
                // as no capture screen needs it.
                self.capture_step = None;
                self.camera = None;
                self.camera_error = None;
                self.preview_texture = None;
            }
        }

        if step == WizardStep::Results {
            self.results_photos = Some(self.build_results_photos(ctx));
        } else {
            self.results_photos = None;
            self.report_region = None;
            self.export_outcome = None;
        }
    }

    /// Opens the configured camera, surfacing failure on the capture screen.
    fn open_camera(&mut self) {
        match CameraSource::open(get_config()) {
            Ok(camera) => {
                self.camera = Some(camera);
                self.camera_error = None;
            }
            Err(e) => {
                crate::log(&format!("Camera unavailable: {:#}", e));
                self.camera = None;
                self.camera_error = Some(format!("Camera unavailable: {}", e));
            }
        }
    }

    /// Grabs a fresh preview frame while a capture screen is showing.
    fn update_preview(&mut self, ctx: &egui::Context) {
        let Some(camera) = self.camera.as_mut() else {
            return;
        };
        match camera.preview_frame() {
            Ok(frame) => {
                let size = [frame.width() as usize, frame.height() as usize];
                let color_image = egui::ColorImage::from_rgb(size, frame.as_raw());
                match &mut self.preview_texture {
                    Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
                    None => {
                        self.preview_texture = Some(ctx.load_texture(
                            "camera_preview",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                }
            }
            Err(e) => {
                crate::log(&format!("Preview frame failed: {:#}", e));
                self.camera = None;
                self.preview_texture = None;
                self.camera_error = Some(format!("Camera stopped: {}", e));
            }
        }
    }

    /// Takes a snapshot and feeds it through the capture step. A missing
    /// camera yields an empty payload, which the step treats as "no photo,
    /// stay here".
    fn handle_shutter(&mut self) {
        let payload = match self.camera.as_mut() {
            Some(camera) => match camera.snapshot() {
                Ok(payload) => payload,
                Err(e) => {
                    crate::log(&format!("Snapshot failed: {:#}", e));
                    self.camera_error = Some(format!("Snapshot failed: {}", e));
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        if let Some(step) = self.capture_step.as_mut() {
            step.process_snapshot(&payload, &mut self.wizard);
        }
    }

    /// Uploads the captured photos as textures for the Results screen.
    fn build_results_photos(&mut self, ctx: &egui::Context) -> ResultsPhotos {
        let captures = self.wizard.captures();
        ResultsPhotos {
            wideopen: capture_texture(ctx, captures.get(CaptureSlot::WideOpen), "photo_wideopen"),
            anterior: capture_texture(ctx, captures.get(CaptureSlot::Anterior), "photo_anterior"),
            posterior: capture_texture(
                ctx,
                captures.get(CaptureSlot::Posterior),
                "photo_posterior",
            ),
        }
    }

    /// Requests a viewport screenshot; the framebuffer arrives as an event
    /// on a later frame and is cropped to the report region there.
    fn handle_download(&self, ctx: &egui::Context) {
        crate::log("Export requested");
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    /// Consumes screenshot events produced by `handle_download`.
    fn handle_screenshot_events(&mut self, ctx: &egui::Context) {
        let screenshots: Vec<Arc<egui::ColorImage>> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
                .collect()
        });

        for screenshot in screenshots {
            let outcome = match self.report_region {
                Some(region) => export::save_report(
                    &screenshot,
                    region,
                    ctx.pixels_per_point(),
                    &paths::get_results_dir(),
                )
                .map_err(|e| format!("{:#}", e)),
                None => Err("No results region on screen".to_string()),
            };
            match &outcome {
                Ok(path) => crate::log(&format!("Report saved: {}", path.display())),
                Err(e) => crate::log(&format!("Export failed: {}", e)),
            }
            self.export_outcome = Some(outcome);
        }
    }

    fn handle_open_folder(&self) {
        if let Err(e) = open::that(paths::get_results_dir()) {
            crate::log(&format!("Failed to open results folder: {}", e));
        }
    }

    /// Renders whichever screen the wizard is on.
    fn render_current_screen(&mut self, ui: &mut egui::Ui) {
        let step = self.wizard.step();

        if let Some(screen) = screens::info_screen(step) {
            if render::render_info(ui, &mut self.assets, &screen) {
                self.wizard.advance();
            }
            return;
        }

        if let Some(slot) = step.capture_slot() {
            let screen = screens::capture_screen(slot);
            let overlay = self.assets.texture(ui.ctx(), slot.name());
            let step_error = self
                .capture_step
                .as_ref()
                .and_then(|s| s.error())
                .map(str::to_owned);

            let (shutter_clicked, retry_clicked) = render::render_capture(
                ui,
                &screen,
                self.preview_texture.as_ref(),
                overlay,
                self.camera_error.as_deref(),
                step_error.as_deref(),
            );
            if shutter_clicked {
                self.handle_shutter();
            }
            if retry_clicked {
                self.open_camera();
            }
            return;
        }

        // Results screen
        let photos = self.results_photos.take().unwrap_or_default();
        let response = render::render_results(
            ui,
            &mut self.assets,
            &photos,
            self.export_outcome.as_ref(),
        );
        self.results_photos = Some(photos);
        self.report_region = Some(response.report_region);

        if response.download_clicked {
            self.handle_download(ui.ctx());
        }
        if response.open_folder_clicked {
            self.handle_open_folder();
        }
        if response.start_over_clicked {
            // Wraps back to the intro and clears the captures
            self.wizard.advance();
        }
    }
}

impl eframe::App for WizardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot_events(ctx);
        self.sync_step(ctx);

        let capturing = self.wizard.step().capture_slot().is_some();
        if capturing {
            self.update_preview(ctx);
            // Live preview needs continuous frames
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(560.0);
                    self.render_current_screen(ui);
                    ui.add_space(24.0);
                });
            });
        });
    }
}

/// Decodes a stored capture into a texture. Failures render as placeholders
/// rather than breaking the Results screen.
fn capture_texture(
    ctx: &egui::Context,
    capture: Option<&CapturedImage>,
    name: &str,
) -> Option<TextureHandle> {
    let capture = capture?;
    let decoded = match image::load_from_memory(&capture.data) {
        Ok(decoded) => decoded,
        Err(e) => {
            crate::log(&format!("Stored capture '{}' failed to decode: {}", name, e));
            return None;
        }
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
    Some(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
}

/// Run the GUI application.
/// This function blocks until the window is closed.
pub fn run_gui() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(640.0, 760.0))
            .with_min_inner_size(Vec2::new(480.0, 560.0))
            .with_title("Do I Have Tongue Tie?"),
        ..Default::default()
    };

    eframe::run_native(
        "Do I Have Tongue Tie?",
        options,
        Box::new(|cc| Ok(Box::new(WizardApp::new(cc)))),
    )
}
