// src/app.rs (faceforge-ui)
use crate::context::AppContext;
use crate::modules::{
    player::PlayerModule, settings::SettingsModule, upload::UploadModule, PanelModule,
};
use crate::theme::{configure_style, status_color, ACCENT, DARK_TEXT_DIM, ERR_RED, OK_GREEN};
use eframe::egui;
use faceforge_core::commands::AppCommand;
use faceforge_core::state::{MediaCategory, SelectedFile, SessionState};
use faceforge_session::{ServerConfig, SessionWorker};
use rfd::FileDialog;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct AppStorage {
    session: SessionState,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct FaceForgeApp {
    state:   SessionState,
    context: AppContext,
    // Panel modules as concrete types — eliminates per-frame name-string lookup
    // and makes typos a compile error instead of a silently blank panel.
    upload:   UploadModule,
    settings: SettingsModule,
    player:   PlayerModule,
    /// Commands emitted by modules each frame, processed after the UI pass
    pending_cmds: Vec<AppCommand>,
}

impl FaceForgeApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode — prevents egui overwriting our theme on OS light/dark changes.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let state = cc
            .storage
            .and_then(|s| eframe::get_value::<AppStorage>(s, eframe::APP_KEY))
            .map(|d| d.session)
            .unwrap_or_default();

        let session = SessionWorker::spawn(ServerConfig::from_env());
        let context = AppContext::new(session);

        Self {
            state,
            context,
            upload:   UploadModule,
            settings: SettingsModule,
            player:   PlayerModule,
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: AppCommand) {
        match cmd {
            // ── File selection ───────────────────────────────────────────────
            AppCommand::SelectImage(path) => self.select_file(path, MediaCategory::Image),
            AppCommand::SelectAudio(path) => self.select_file(path, MediaCategory::Audio),
            AppCommand::RemoveImage => {
                self.state.image = None;
            }
            AppCommand::RemoveAudio => {
                self.state.audio = None;
            }

            // ── Generation options ───────────────────────────────────────────
            AppCommand::SetSize(size) => {
                self.state.options.size = size;
            }
            AppCommand::SetPreprocess(p) => {
                self.state.options.preprocess = p;
            }
            AppCommand::SetPoseStyle(v) => {
                self.state.options.pose_style = v;
            }
            AppCommand::SetExpressionScale(v) => {
                self.state.options.expression_scale = v;
            }
            AppCommand::SetBatchSize(v) => {
                self.state.options.batch_size = v;
            }
            AppCommand::SetEnhancer(e) => {
                self.state.options.enhancer = e;
            }
            AppCommand::SetBackgroundEnhancer(b) => {
                self.state.options.background_enhancer = b;
            }
            AppCommand::SetStillMode(v) => {
                self.state.options.still_mode = v;
            }
            AppCommand::SetFace3dVis(v) => {
                self.state.options.face3dvis = v;
            }
            AppCommand::SetVerbose(v) => {
                self.state.options.verbose = v;
            }
            AppCommand::ToggleSettings => {
                self.state.show_settings = !self.state.show_settings;
            }

            // ── Generation / result ──────────────────────────────────────────
            AppCommand::Generate => self.begin_generation(),
            AppCommand::DownloadResult { url } => {
                if let Some(dest) = FileDialog::new()
                    .set_file_name("avatar-output.mp4")
                    .add_filter("MP4 video", &["mp4"])
                    .save_file()
                {
                    self.context.session.download_result(url, dest);
                }
            }

            // ── Banners ──────────────────────────────────────────────────────
            AppCommand::DismissError => {
                self.state.error_banner = None;
            }
            AppCommand::ClearSaveStatus => {
                self.state.save_status = None;
            }
        }
    }

    fn select_file(&mut self, path: std::path::PathBuf, category: MediaCategory) {
        match SelectedFile::from_path(path, category) {
            Ok(sel) => {
                match category {
                    MediaCategory::Image => self.state.image = Some(sel),
                    MediaCategory::Audio => self.state.audio = Some(sel),
                }
                self.state.error_banner = None;
            }
            Err(rejection) => {
                self.state.error_banner = Some(rejection.to_string());
            }
        }
    }

    /// The Generate path: re-check the gate (hotkeys and races bypass the
    /// disabled button), then hand the triple to the session worker.
    fn begin_generation(&mut self) {
        let (Some(image), Some(audio)) = (&self.state.image, &self.state.audio) else {
            self.state.error_banner =
                Some("Please select both image and audio files".to_string());
            return;
        };
        if !self.state.connected {
            self.state.error_banner = Some("Not connected to server".to_string());
            return;
        }
        let queued = self.context.session.submit_generation(
            image.path.clone(),
            audio.path.clone(),
            self.state.options.clone(),
        );
        if !queued {
            // Connection dropped between the gate check and the call.
            self.state.error_banner =
                Some("Failed to start generation. Please try again.".to_string());
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in files {
            if let Some(path) = file.path {
                match MediaCategory::for_path(&path) {
                    Some(MediaCategory::Image) => {
                        self.pending_cmds.push(AppCommand::SelectImage(path));
                    }
                    Some(MediaCategory::Audio) => {
                        self.pending_cmds.push(AppCommand::SelectAudio(path));
                    }
                    None => {
                        self.state.error_banner =
                            Some(format!("Unsupported file: {}", path.display()));
                    }
                }
            }
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("status_bar")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("🎭 FaceForge")
                            .strong()
                            .size(15.0)
                            .color(ACCENT),
                    );
                    ui.separator();

                    // Connection dot + status line.
                    let dot = if self.state.connected { OK_GREEN } else { ERR_RED };
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(10.0, 10.0),
                        egui::Sense::hover(),
                    );
                    ui.painter().circle_filled(rect.center(), 4.0, dot);
                    ui.label(
                        egui::RichText::new(self.state.status.message())
                            .size(12.0)
                            .color(status_color(self.state.status)),
                    );

                    if let Some(elapsed) = self.context.elapsed_label() {
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(
                                    egui::RichText::new(elapsed)
                                        .size(12.0)
                                        .color(DARK_TEXT_DIM)
                                        .monospace(),
                                );
                            },
                        );
                    }
                });
            });
    }

    fn show_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // ── Error banner ─────────────────────────────────────────────────
            if let Some(message) = self.state.error_banner.clone() {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(60, 25, 25))
                    .stroke(egui::Stroke::new(1.0, ERR_RED))
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("💥 {message}"))
                                    .size(11.0)
                                    .color(ERR_RED),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button(egui::RichText::new("✕").size(10.0)).clicked() {
                                        self.pending_cmds.push(AppCommand::DismissError);
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(8.0);
            }

            // ── Generate button ──────────────────────────────────────────────
            let generating =
                self.state.status == faceforge_core::state::GenerationStatus::Generating;
            let enabled = self.state.can_generate();
            let label = if generating {
                "⏳ Generating…"
            } else {
                "🎭 Generate Avatar"
            };
            let btn = egui::Button::new(
                egui::RichText::new(label)
                    .size(13.0)
                    .strong()
                    .color(if enabled {
                        egui::Color32::BLACK
                    } else {
                        egui::Color32::DARK_GRAY
                    }),
            )
            .fill(if enabled {
                ACCENT
            } else {
                crate::theme::DARK_BG_3
            })
            .stroke(egui::Stroke::NONE)
            .min_size(egui::vec2(ui.available_width(), 34.0));

            let response = ui.add_enabled(enabled, btn);
            if response.clicked() {
                self.pending_cmds.push(AppCommand::Generate);
            }
            if !enabled && !generating {
                response.on_hover_text("Select an image and an audio file first");
            }

            ui.add_space(8.0);
            ui.separator();

            // ── Result ───────────────────────────────────────────────────────
            self.player.ui(ui, &self.state, &mut self.pending_cmds);
        });
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for FaceForgeApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Only the option set and panel visibility persist — selected files
        // and channel state are rebuilt each launch.
        eframe::set_value(
            storage,
            eframe::APP_KEY,
            &AppStorage {
                session: self.state.clone(),
            },
        );
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.session.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.context.ingest_session_events(&mut self.state, ctx);
        self.handle_drag_and_drop(ctx);

        self.show_status_bar(ctx);

        egui::SidePanel::left("upload_panel")
            .resizable(true)
            .default_width(260.0)
            .min_width(200.0)
            .show(ctx, |ui| {
                self.upload.ui(ui, &self.state, &mut self.pending_cmds);
            });

        egui::SidePanel::right("settings_panel")
            .resizable(true)
            .default_width(260.0)
            .min_width(200.0)
            .show(ctx, |ui| {
                self.settings.ui(ui, &self.state, &mut self.pending_cmds);
            });

        self.show_central(ctx);

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<AppCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }
    }
}
