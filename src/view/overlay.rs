use egui::Context;

use crate::controller::FrameStats;
use crate::model::{EntityKind, Scene};

/// Text lines shown in the stats window.
pub fn stats_lines(stats: &FrameStats, scene: &Scene) -> Vec<String> {
    let mut lines = vec![
        format!("FPS: {:.0}", stats.fps),
        format!("Frames: {}", stats.frames),
    ];
    if let Some(plane) = scene.root(EntityKind::Airplane) {
        lines.push(format!(
            "Airplane: x: {:.0} y: {:.0}",
            plane.position.x, plane.position.y
        ));
    }
    lines
}

/// Build the stats overlay and return egui output
pub fn build_overlay(
    egui_ctx: &Context,
    stats: &FrameStats,
    scene: &Scene,
    screen_width: f32,
    screen_height: f32,
) -> egui::FullOutput {
    let mut raw_input = egui::RawInput::default();
    raw_input.time = Some(stats.now_ms / 1000.0);
    raw_input.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::new(0.0, 0.0),
        egui::vec2(screen_width, screen_height),
    ));

    let lines = stats_lines(stats, scene);
    egui_ctx.run(raw_input, |ctx| {
        egui::Window::new("Stats")
            .default_pos([8.0, 8.0])
            .resizable(false)
            .show(ctx, |ui| {
                for line in &lines {
                    ui.label(egui::RichText::new(line).small());
                }
            });
    })
}
