//! Percentage overlay shown while a texture bundle loads

use super::progress::ProgressView;

/// Renders the loader's progress as `"<percent>%"`, hidden when nothing is loading
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    view: ProgressView,
}

impl ProgressIndicator {
    pub fn new(view: ProgressView) -> Self {
        Self { view }
    }

    /// Text to display this frame; `None` while inactive
    pub fn label(&self) -> Option<String> {
        let progress = self.view.snapshot();
        progress.active.then(|| format!("{}%", progress.percent))
    }

    /// Draws the label centred in the display, or nothing at all
    pub fn draw(&self, ui: &imgui::Ui) {
        let Some(label) = self.label() else {
            return;
        };

        let display_size = ui.io().display_size;
        if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
            return;
        }

        ui.window("##load_progress")
            .position(
                [display_size[0] * 0.5, display_size[1] * 0.5],
                imgui::Condition::Always,
            )
            .position_pivot([0.5, 0.5])
            .bg_alpha(0.0)
            .flags(
                imgui::WindowFlags::NO_DECORATION
                    | imgui::WindowFlags::ALWAYS_AUTO_RESIZE
                    | imgui::WindowFlags::NO_INPUTS
                    | imgui::WindowFlags::NO_SAVED_SETTINGS,
            )
            .build(|| {
                ui.text(&label);
            });
    }
}
