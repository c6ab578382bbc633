//! Toast stack in the bottom-right corner, above the status bar.

use super::super::style::{COLOR_ACCENT, COLOR_BG_SECONDARY, COLOR_TEXT_PRIMARY};
use super::super::GhostpadApp;
use eframe::egui;
use std::time::{Duration, Instant};

/// Final stretch of a toast's life during which it fades out.
const TOAST_FADE: Duration = Duration::from_millis(600);

/// Opacity for a toast expiring at `expires_at`.
fn toast_opacity(now: Instant, expires_at: Instant) -> f32 {
    let left = expires_at.saturating_duration_since(now);
    (left.as_secs_f32() / TOAST_FADE.as_secs_f32()).clamp(0.0, 1.0)
}

impl GhostpadApp {
    /// Oldest toast on top; each fades as it nears expiry.
    pub(crate) fn render_toasts(&mut self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        let now = Instant::now();
        let mut fading = false;

        egui::Area::new(egui::Id::new("ghostpad_toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -40.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_max_width(320.0);
                for toast in &self.toasts {
                    let opacity = toast_opacity(now, toast.expires_at);
                    fading |= opacity < 1.0;
                    egui::Frame::new()
                        .fill(COLOR_BG_SECONDARY.gamma_multiply(opacity))
                        .stroke(egui::Stroke::new(1.0, COLOR_ACCENT.gamma_multiply(opacity)))
                        .corner_radius(egui::CornerRadius::same(4))
                        .inner_margin(egui::Margin::symmetric(10, 6))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&toast.text)
                                    .color(COLOR_TEXT_PRIMARY.gamma_multiply(opacity)),
                            );
                        });
                    ui.add_space(4.0);
                }
            });

        if fading {
            ctx.request_repaint();
        }
    }
}
