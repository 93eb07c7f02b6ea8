//! GUI rendering functions.
//!
//! Contains UI layout and component rendering logic. Functions return click
//! flags; the app struct decides what to do with them.

use eframe::egui::{self, Color32, RichText, TextureHandle, Vec2};
use std::path::PathBuf;

use crate::gui::assets::AssetLibrary;
use crate::gui::screens::{CaptureScreen, InfoScreen};
use crate::wizard::grades::{GradeEntry, ANTERIOR_GRADES, POSTERIOR_GRADES};

/// Side of the square live preview box, in points.
const PREVIEW_SIDE: f32 = 400.0;

/// Opacity applied to the positioning overlay guide.
const OVERLAY_ALPHA: u8 = 153;

/// Widest an illustration is drawn, in points.
const ILLUSTRATION_WIDTH: f32 = 380.0;

/// Textures for the captured photos shown on the Results screen.
#[derive(Default)]
pub struct ResultsPhotos {
    pub wideopen: Option<TextureHandle>,
    pub anterior: Option<TextureHandle>,
    pub posterior: Option<TextureHandle>,
}

/// Click results from the Results screen.
pub struct ResultsResponse {
    pub download_clicked: bool,
    pub open_folder_clicked: bool,
    pub start_over_clicked: bool,
    /// On-screen rect of the report region, in points. The exporter crops
    /// the viewport screenshot to this.
    pub report_region: egui::Rect,
}

/// Render an instructional screen. Returns true when the next button is
/// clicked.
pub fn render_info(ui: &mut egui::Ui, assets: &mut AssetLibrary, screen: &InfoScreen) -> bool {
    let mut next_clicked = false;

    ui.heading(screen.title);
    ui.add_space(12.0);

    if let Some(name) = screen.illustration {
        render_illustration(ui, assets, name, ILLUSTRATION_WIDTH);
        ui.add_space(12.0);
    }

    ui.label(RichText::new(screen.body).size(15.0));

    for (label, url) in screen.links {
        ui.add_space(4.0);
        ui.hyperlink_to(*label, *url);
    }

    ui.add_space(16.0);
    if ui.button(RichText::new(screen.next_label).size(16.0)).clicked() {
        next_clicked = true;
    }

    next_clicked
}

/// Render a capture screen: live preview with the positioning overlay, the
/// instruction line, and the shutter button.
/// Returns (shutter_clicked, retry_camera_clicked).
pub fn render_capture(
    ui: &mut egui::Ui,
    screen: &CaptureScreen,
    preview: Option<&TextureHandle>,
    overlay: Option<TextureHandle>,
    camera_error: Option<&str>,
    step_error: Option<&str>,
) -> (bool, bool) {
    let mut shutter_clicked = false;
    let mut retry_clicked = false;

    ui.heading(screen.title);
    ui.add_space(12.0);

    let (rect, _response) = ui.allocate_exact_size(
        Vec2::splat(PREVIEW_SIDE),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, Color32::from_gray(120));

    if let Some(texture) = preview {
        // Cover the square box with the centered square of the frame
        painter.image(texture.id(), rect, cover_uv(texture.size_vec2()), Color32::WHITE);
    } else {
        let message = camera_error.unwrap_or("Waiting for camera...");
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            message,
            egui::FontId::proportional(15.0),
            Color32::from_gray(230),
        );
    }

    if let Some(texture) = overlay {
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
            Color32::from_white_alpha(OVERLAY_ALPHA),
        );
    }

    ui.add_space(8.0);
    ui.label(screen.instruction);

    if let Some(error) = step_error {
        ui.add_space(4.0);
        ui.label(RichText::new(error).color(Color32::from_rgb(200, 0, 0)));
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        // Without a live frame there is nothing to photograph
        ui.add_enabled_ui(preview.is_some(), |ui| {
            if ui.button(RichText::new("Take photo").size(16.0)).clicked() {
                shutter_clicked = true;
            }
        });
        if camera_error.is_some() {
            ui.add_space(12.0);
            if ui.button("Retry camera").clicked() {
                retry_clicked = true;
            }
        }
    });

    (shutter_clicked, retry_clicked)
}

/// Render the Results screen: both grade reference tables, the comparison
/// photo tables, interpretation text, and the export controls.
pub fn render_results(
    ui: &mut egui::Ui,
    assets: &mut AssetLibrary,
    photos: &ResultsPhotos,
    export_outcome: Option<&Result<PathBuf, String>>,
) -> ResultsResponse {
    let mut download_clicked = false;
    let mut open_folder_clicked = false;
    let mut start_over_clicked = false;

    ui.heading("Results");
    ui.add_space(8.0);

    // Everything inside this scope is what gets exported
    let report = ui.scope(|ui| {
        ui.label(RichText::new("Anterior range of motion").size(18.0));
        ui.add_space(4.0);
        render_grade_table(ui, assets, "anterior_grades", &ANTERIOR_GRADES);
        ui.add_space(8.0);
        render_photo_table(ui, "anterior_photos", "Anterior", &photos.wideopen, &photos.anterior);

        ui.add_space(16.0);
        ui.label(RichText::new("Posterior range of motion").size(18.0));
        ui.add_space(4.0);
        render_grade_table(ui, assets, "posterior_grades", &POSTERIOR_GRADES);
        ui.add_space(8.0);
        render_photo_table(ui, "posterior_photos", "Posterior", &photos.wideopen, &photos.posterior);

        ui.add_space(16.0);
        ui.label(RichText::new("What does this mean?").size(18.0));
        ui.label(
            "If your tongue movement is restricted, then it may be interfering with \
             your posture or your upper airway. If you are developing obstructive \
             sleep apnea, this is especially relevant.",
        );
        ui.add_space(8.0);
        ui.label(RichText::new("What can I do?").size(18.0));
        ui.label(
            "To the best of our knowledge, a combination of myofunctional therapy \
             and frenuloplasty (tongue tie release surgery) can improve your tongue \
             range of motion.",
        );
        ui.add_space(8.0);
        ui.hyperlink_to(
            "More dimensions of a complete assessment (video)",
            "https://www.youtube.com/watch?v=8dOq11N-qK8",
        );
    });
    let report_region = report.response.rect;

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        if ui.button(RichText::new("Download Result").size(16.0)).clicked() {
            download_clicked = true;
        }
        if matches!(export_outcome, Some(Ok(_))) {
            ui.add_space(12.0);
            if ui.button("Open Folder").clicked() {
                open_folder_clicked = true;
            }
        }
    });

    match export_outcome {
        Some(Ok(path)) => {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Saved to {}", path.display()))
                    .color(Color32::from_rgb(0, 150, 0)),
            );
        }
        Some(Err(message)) => {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Export failed: {}", message))
                    .color(Color32::from_rgb(200, 0, 0)),
            );
        }
        None => {}
    }

    ui.add_space(12.0);
    if ui.link("Start Over").clicked() {
        start_over_clicked = true;
    }

    ResultsResponse {
        download_clicked,
        open_folder_clicked,
        start_over_clicked,
        report_region,
    }
}

/// One grade reference table: Grade | Range | Example, four rows.
fn render_grade_table(
    ui: &mut egui::Ui,
    assets: &mut AssetLibrary,
    id: &str,
    grades: &[GradeEntry],
) {
    ui.label("Compare with your photo below to get your grade");
    egui::Grid::new(id)
        .striped(true)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Grade").strong());
            ui.label(RichText::new("Range").strong());
            ui.label(RichText::new("Example").strong());
            ui.end_row();

            for grade in grades {
                ui.label(RichText::new(grade.num).strong());
                ui.label(grade.rom);
                render_illustration(ui, assets, grade.pic, 180.0);
                ui.end_row();
            }
        });
}

/// A baseline-vs-position photo pair.
fn render_photo_table(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    baseline: &Option<TextureHandle>,
    photo: &Option<TextureHandle>,
) {
    egui::Grid::new(id).spacing([16.0, 8.0]).show(ui, |ui| {
        ui.label(RichText::new("Baseline").strong());
        ui.label(RichText::new(label).strong());
        ui.end_row();

        render_capture_cell(ui, baseline);
        render_capture_cell(ui, photo);
        ui.end_row();
    });
}

fn render_capture_cell(ui: &mut egui::Ui, texture: &Option<TextureHandle>) {
    match texture {
        Some(texture) => {
            ui.image((texture.id(), Vec2::splat(180.0)));
        }
        None => placeholder_box(ui, Vec2::splat(180.0), "no photo"),
    }
}

/// Draw a named illustration at the given width, or a placeholder when the
/// asset is missing.
fn render_illustration(ui: &mut egui::Ui, assets: &mut AssetLibrary, name: &str, width: f32) {
    match assets.texture(ui.ctx(), name) {
        Some(texture) => {
            let size = texture.size_vec2();
            let scaled = Vec2::new(width, width * size.y / size.x.max(1.0));
            ui.image((texture.id(), scaled));
        }
        None => placeholder_box(ui, Vec2::new(width, width * 0.6), name),
    }
}

/// Gray placeholder with a centered label, drawn when an image is not
/// available.
fn placeholder_box(ui: &mut egui::Ui, size: Vec2, label: &str) {
    let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().rect_filled(rect, 4.0, Color32::from_gray(200));
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(14.0),
        Color32::from_gray(100),
    );
}

/// UV rect that crops a frame of the given size to its centered square, so
/// it covers a square box without distortion.
fn cover_uv(frame_size: Vec2) -> egui::Rect {
    let (w, h) = (frame_size.x.max(1.0), frame_size.y.max(1.0));
    if w > h {
        let margin = (1.0 - h / w) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let margin = (1.0 - w / h) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}
