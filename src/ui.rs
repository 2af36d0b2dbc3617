//! Control panel.
//!
//! One single-line text field per parameter, edited in place. The text is
//! read back every frame through [`ControlSource`], so typing into a field
//! takes effect on the next redraw without any submit step.

use glam::Vec3;

use crate::controls::{ControlSource, TextControls};
use crate::params::{ParamKey, WaveParams};

/// Per-frame values shown under the controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelStats {
    pub fps: f32,
    pub frame: u64,
    pub particles: usize,
    pub pointer: Vec3,
}

/// Side panel holding the parameter text fields.
#[derive(Debug, Clone)]
pub struct ControlsPanel {
    controls: TextControls,
    visible: bool,
}

impl ControlsPanel {
    pub fn new(params: &WaveParams) -> Self {
        Self {
            controls: TextControls::from_params(params),
            visible: true,
        }
    }

    pub fn controls(&self) -> &TextControls {
        &self.controls
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Draw the panel. Returns true if any field was edited this frame.
    pub fn show(&mut self, ctx: &egui::Context, stats: &PanelStats) -> bool {
        if !self.visible {
            return false;
        }

        let mut edited = false;
        egui::SidePanel::left("wave_controls")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Wave Field");
                ui.separator();

                egui::Grid::new("wave_params")
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for key in ParamKey::ALL {
                            ui.label(key.label());
                            let response = ui.add(
                                egui::TextEdit::singleline(self.controls.text_mut(key))
                                    .desired_width(70.0),
                            );
                            edited |= response.changed();
                            ui.end_row();
                        }
                    });

                ui.separator();
                ui.label(format!("FPS: {:.1}", stats.fps));
                ui.label(format!("Frame: {}", stats.frame));
                ui.label(format!("Particles: {}", stats.particles));
                ui.label(format!(
                    "Pointer: ({:.1}, {:.1}, {:.1})",
                    stats.pointer.x, stats.pointer.y, stats.pointer.z
                ));
                ui.separator();
                ui.small("Drag: orbit  Scroll: zoom  Tab: hide panel");
            });

        edited
    }
}

impl ControlSource for ControlsPanel {
    fn raw(&self, key: ParamKey) -> Option<&str> {
        self.controls.raw(key)
    }
}
