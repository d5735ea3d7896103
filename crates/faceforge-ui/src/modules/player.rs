// crates/faceforge-ui/src/modules/player.rs
//
// PlayerModule: central result panel.
//
// FaceForge does not decode video — the result stays on the backend and the
// panel offers the two useful actions on its URL: open it in the system
// player / browser, or download it to disk (which goes through the session
// worker so the UI never blocks on the transfer).

use super::PanelModule;
use crate::helpers::format::truncate;
use crate::theme::{ACCENT, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, ERR_RED, OK_GREEN};
use egui::{RichText, Stroke, Ui};
use faceforge_core::commands::AppCommand;
use faceforge_core::state::{GenerationStatus, SessionState};

pub struct PlayerModule;

impl PanelModule for PlayerModule {
    fn name(&self) -> &str {
        "Result"
    }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>) {
        let Some(url) = state.video_url.as_deref() else {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("🎭").size(32.0));
                ui.add_space(6.0);
                let hint = match state.status {
                    GenerationStatus::Generating => "Generating — the result appears here",
                    _ => "Generated avatar video appears here",
                };
                ui.label(RichText::new(hint).size(11.0).color(DARK_TEXT_DIM));
            });
            return;
        };

        ui.add_space(8.0);
        egui::Frame::new()
            .fill(DARK_BG_3)
            .stroke(Stroke::new(1.0, DARK_BORDER))
            .corner_radius(egui::CornerRadius::same(5))
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                ui.label(RichText::new("🎉 Avatar ready").size(12.0).strong().color(OK_GREEN));
                ui.add_space(4.0);
                ui.label(
                    RichText::new(truncate(url, 64))
                        .size(9.0)
                        .color(DARK_TEXT_DIM)
                        .monospace(),
                );
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.hyperlink_to(RichText::new("▶ Open").size(11.0).color(ACCENT), url);
                    ui.add_space(8.0);
                    if ui.button(RichText::new("⬇ Download").size(11.0)).clicked() {
                        cmd.push(AppCommand::DownloadResult { url: url.to_string() });
                    }
                });

                if let Some(save_status) = &state.save_status {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        let color = if save_status.starts_with('✓') {
                            OK_GREEN
                        } else {
                            ERR_RED
                        };
                        ui.label(RichText::new(save_status.as_str()).size(10.0).color(color));
                        if ui.button(RichText::new("✕").size(9.0)).clicked() {
                            cmd.push(AppCommand::ClearSaveStatus);
                        }
                    });
                }
            });
    }
}
