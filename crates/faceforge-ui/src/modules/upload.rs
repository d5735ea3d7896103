// crates/faceforge-ui/src/modules/upload.rs
//
// UploadModule: left-panel cards for the two source files.
//
// One card per MediaCategory. A card with no file shows a pick button and the
// accepted extensions; a filled card shows name + size (and a live preview
// for the image, loaded by egui_extras' file loader) plus Replace / Remove.
// Validation happens in app.rs when the SelectImage / SelectAudio command is
// processed — the card only ever emits paths.

use super::PanelModule;
use crate::helpers::format::truncate;
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, OK_GREEN};
use egui::{Align, Layout, RichText, Stroke, Ui};
use faceforge_core::commands::AppCommand;
use faceforge_core::helpers::format::format_size;
use faceforge_core::state::{MediaCategory, SelectedFile, SessionState};
use rfd::FileDialog;

pub struct UploadModule;

impl PanelModule for UploadModule {
    fn name(&self) -> &str {
        "Source Files"
    }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>) {
        ui.vertical(|ui| {
            // ── Header ──────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("📁 Source Files").size(12.0).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(
                                RichText::new("or drop files anywhere")
                                    .size(9.0)
                                    .color(DARK_TEXT_DIM),
                            );
                        });
                    });
                });

            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(4.0);
                    file_card(ui, MediaCategory::Image, state.image.as_ref(), cmd);
                    ui.add_space(8.0);
                    file_card(ui, MediaCategory::Audio, state.audio.as_ref(), cmd);
                    ui.add_space(8.0);
                });
        });
    }
}

// ── Card rendering ────────────────────────────────────────────────────────────

fn file_card(
    ui: &mut Ui,
    category: MediaCategory,
    file: Option<&SelectedFile>,
    cmd: &mut Vec<AppCommand>,
) {
    let filled = file.is_some();
    let border = if filled { OK_GREEN } else { DARK_BORDER };

    egui::Frame::new()
        .fill(DARK_BG_3)
        .stroke(Stroke::new(1.0, border))
        .corner_radius(egui::CornerRadius::same(5))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                let icon = match category {
                    MediaCategory::Image => "🖼",
                    MediaCategory::Audio => "🎵",
                };
                ui.label(RichText::new(format!("{icon} {}", category.label())).size(11.0).strong());
                if filled {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new("✓").size(11.0).color(OK_GREEN));
                    });
                }
            });

            ui.add_space(4.0);

            match file {
                Some(sel) => {
                    if category == MediaCategory::Image {
                        // Preview straight off disk via the "file://" loader.
                        ui.add(
                            egui::Image::new(format!("file://{}", sel.path.display()))
                                .max_height(120.0)
                                .max_width(ui.available_width())
                                .corner_radius(egui::CornerRadius::same(3)),
                        );
                        ui.add_space(4.0);
                    }

                    ui.label(
                        RichText::new(truncate(&sel.name, 34))
                            .size(10.0)
                            .color(ACCENT),
                    );
                    ui.label(
                        RichText::new(format_size(sel.size_bytes))
                            .size(9.0)
                            .color(DARK_TEXT_DIM)
                            .monospace(),
                    );

                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        if ui.button(RichText::new("Replace").size(10.0)).clicked() {
                            if let Some(path) = pick_file(category) {
                                cmd.push(select_command(category, path));
                            }
                        }
                        if ui.button(RichText::new("Remove").size(10.0)).clicked() {
                            cmd.push(match category {
                                MediaCategory::Image => AppCommand::RemoveImage,
                                MediaCategory::Audio => AppCommand::RemoveAudio,
                            });
                        }
                    });
                }
                None => {
                    ui.label(
                        RichText::new(category.accepted_extensions().join(", "))
                            .size(9.0)
                            .color(DARK_TEXT_DIM),
                    );
                    ui.label(
                        RichText::new(format!(
                            "up to {}",
                            format_size(category.max_size_bytes())
                        ))
                        .size(9.0)
                        .color(DARK_TEXT_DIM),
                    );
                    ui.add_space(4.0);
                    if ui
                        .button(RichText::new("＋ Choose file").size(11.0))
                        .clicked()
                    {
                        if let Some(path) = pick_file(category) {
                            cmd.push(select_command(category, path));
                        }
                    }
                }
            }
        });
}

fn pick_file(category: MediaCategory) -> Option<std::path::PathBuf> {
    let filter_name = match category {
        MediaCategory::Image => "Images",
        MediaCategory::Audio => "Audio",
    };
    FileDialog::new()
        .add_filter(filter_name, category.accepted_extensions())
        .pick_file()
}

fn select_command(category: MediaCategory, path: std::path::PathBuf) -> AppCommand {
    match category {
        MediaCategory::Image => AppCommand::SelectImage(path),
        MediaCategory::Audio => AppCommand::SelectAudio(path),
    }
}
