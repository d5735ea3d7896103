// crates/faceforge-ui/src/modules/settings.rs
//
// SettingsModule: right-panel form for the generation options.
//
// Every control is stateless — it renders the value currently in
// SessionState.options and emits a Set* command when edited. Sliders work on
// a local copy and emit only on change, so dragging produces one command per
// changed frame instead of one per frame.
//
// The collapsed/expanded flag (show_settings) lives in SessionState and
// persists across launches with the options themselves.

use super::PanelModule;
use crate::theme::{ACCENT, DARK_BG_2, DARK_TEXT_DIM};
use egui::{Align, Layout, RichText, Ui};
use faceforge_core::commands::AppCommand;
use faceforge_core::options::{
    BackgroundEnhancer, Enhancer, OutputSize, Preprocess, BATCH_SIZE_MAX, BATCH_SIZE_MIN,
    EXPRESSION_SCALE_MAX, EXPRESSION_SCALE_MIN, POSE_STYLE_MAX,
};
use faceforge_core::state::SessionState;

pub struct SettingsModule;

impl PanelModule for SettingsModule {
    fn name(&self) -> &str {
        "Settings"
    }

    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>) {
        ui.vertical(|ui| {
            // ── Header with expand/collapse toggle ──────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("⚙ Settings").size(12.0).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            let toggle = if state.show_settings { "▼" } else { "◀" };
                            if ui.button(RichText::new(toggle).size(10.0)).clicked() {
                                cmd.push(AppCommand::ToggleSettings);
                            }
                        });
                    });
                });

            ui.separator();

            if !state.show_settings {
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Defaults in use — expand to tune")
                        .size(10.0)
                        .color(DARK_TEXT_DIM),
                );
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::VisibleWhenNeeded)
                .show(ui, |ui| {
                    ui.add_space(4.0);
                    show_form(ui, state, cmd);
                    ui.add_space(8.0);
                });
        });
    }
}

fn show_form(ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>) {
    let o = &state.options;

    // ── Output size ──────────────────────────────────────────────────────────
    ui.label(RichText::new("Output Size").size(11.0).color(DARK_TEXT_DIM));
    ui.add_space(2.0);
    egui::ComboBox::from_id_salt("output_size")
        .selected_text(o.size.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for size in OutputSize::ALL {
                if ui.selectable_label(o.size == size, size.label()).clicked() {
                    cmd.push(AppCommand::SetSize(size));
                }
            }
        });

    ui.add_space(10.0);

    // ── Preprocess ───────────────────────────────────────────────────────────
    ui.label(RichText::new("Preprocess").size(11.0).color(DARK_TEXT_DIM));
    ui.add_space(2.0);
    egui::ComboBox::from_id_salt("preprocess")
        .selected_text(o.preprocess.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for p in Preprocess::ALL {
                if ui.selectable_label(o.preprocess == p, p.label()).clicked() {
                    cmd.push(AppCommand::SetPreprocess(p));
                }
            }
        });

    ui.add_space(10.0);

    // ── Pose style ───────────────────────────────────────────────────────────
    ui.label(RichText::new("Pose Style").size(11.0).color(DARK_TEXT_DIM));
    ui.add_space(2.0);
    let mut pose = o.pose_style;
    if ui
        .add(egui::Slider::new(&mut pose, 0..=POSE_STYLE_MAX))
        .changed()
    {
        cmd.push(AppCommand::SetPoseStyle(pose));
    }

    ui.add_space(10.0);

    // ── Expression scale ─────────────────────────────────────────────────────
    ui.label(
        RichText::new("Expression Scale")
            .size(11.0)
            .color(DARK_TEXT_DIM),
    );
    ui.add_space(2.0);
    let mut scale = o.expression_scale;
    if ui
        .add(
            egui::Slider::new(&mut scale, EXPRESSION_SCALE_MIN..=EXPRESSION_SCALE_MAX)
                .step_by(0.1)
                .fixed_decimals(1),
        )
        .changed()
    {
        cmd.push(AppCommand::SetExpressionScale(scale));
    }

    ui.add_space(10.0);

    // ── Batch size ───────────────────────────────────────────────────────────
    ui.label(RichText::new("Batch Size").size(11.0).color(DARK_TEXT_DIM));
    ui.add_space(2.0);
    let mut batch = o.batch_size;
    if ui
        .add(egui::Slider::new(&mut batch, BATCH_SIZE_MIN..=BATCH_SIZE_MAX))
        .changed()
    {
        cmd.push(AppCommand::SetBatchSize(batch));
    }

    ui.add_space(10.0);

    // ── Enhancers ────────────────────────────────────────────────────────────
    ui.label(
        RichText::new("Face Enhancer")
            .size(11.0)
            .color(DARK_TEXT_DIM),
    );
    ui.add_space(2.0);
    egui::ComboBox::from_id_salt("enhancer")
        .selected_text(o.enhancer.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for e in Enhancer::ALL {
                if ui.selectable_label(o.enhancer == e, e.label()).clicked() {
                    cmd.push(AppCommand::SetEnhancer(e));
                }
            }
        });

    ui.add_space(10.0);

    ui.label(
        RichText::new("Background Enhancer")
            .size(11.0)
            .color(DARK_TEXT_DIM),
    );
    ui.add_space(2.0);
    egui::ComboBox::from_id_salt("background_enhancer")
        .selected_text(o.background_enhancer.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for b in BackgroundEnhancer::ALL {
                if ui
                    .selectable_label(o.background_enhancer == b, b.label())
                    .clicked()
                {
                    cmd.push(AppCommand::SetBackgroundEnhancer(b));
                }
            }
        });

    ui.add_space(10.0);

    // ── Flags ────────────────────────────────────────────────────────────────
    let mut still = o.still_mode;
    if ui
        .checkbox(&mut still, RichText::new("Still mode (less head motion)").size(11.0))
        .changed()
    {
        cmd.push(AppCommand::SetStillMode(still));
    }
    let mut vis = o.face3dvis;
    if ui
        .checkbox(&mut vis, RichText::new("3D visualization output").size(11.0))
        .changed()
    {
        cmd.push(AppCommand::SetFace3dVis(vis));
    }
    let mut verbose = o.verbose;
    if ui
        .checkbox(&mut verbose, RichText::new("Keep intermediate files").size(11.0))
        .changed()
    {
        cmd.push(AppCommand::SetVerbose(verbose));
    }

    ui.add_space(8.0);
    ui.label(
        RichText::new(format!(
            "{} px · {} · batch {}",
            o.size.pixels(),
            o.preprocess.wire_name(),
            o.batch_size
        ))
        .size(9.0)
        .color(ACCENT)
        .monospace(),
    );
}
