// crates/faceforge-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing PanelModule
//   2. Add `pub mod mypanel;` below
//   3. Show it from one of the panels in app.rs

pub mod player;
pub mod settings;
pub mod upload;

use egui::Ui;
use faceforge_core::commands::AppCommand;
use faceforge_core::state::SessionState;

/// Every panel implements this trait.
/// Panels read state, emit commands — they never mutate state directly.
pub trait PanelModule {
    fn name(&self) -> &str;
    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>);
}
