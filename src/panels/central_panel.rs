use egui::{Rect, Vec2};

use crate::MemeApp;
use crate::input::SurfaceMapping;

pub fn central_panel(app: &mut MemeApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_rect = ui.available_rect_before_wrap();
        let surface_size = app.context().surface().size();
        let display_rect = fit_rect(canvas_rect, surface_size);
        let mapping = SurfaceMapping::new(display_rect, surface_size);

        app.handle_input(ctx, &mapping);

        let texture = app.surface_texture(ctx);
        let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter().image(texture, display_rect, uv, egui::Color32::WHITE);

        if app.context().background().is_none() {
            ui.painter().text(
                display_rect.center(),
                egui::Align2::CENTER_CENTER,
                "Open or drop an image",
                egui::FontId::proportional(20.0),
                ui.visuals().weak_text_color(),
            );
        }

        if app.context().is_dragging() {
            ctx.request_repaint();
        }
    });
}

/// The largest rect with the surface's aspect ratio centered inside `area`,
/// never scaled above the surface's own size.
pub fn fit_rect(area: Rect, surface_size: Vec2) -> Rect {
    if surface_size.x <= 0.0 || surface_size.y <= 0.0 {
        return Rect::from_center_size(area.center(), Vec2::ZERO);
    }
    let scale = (area.width() / surface_size.x)
        .min(area.height() / surface_size.y)
        .clamp(0.0, 1.0);
    Rect::from_center_size(area.center(), surface_size * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_fit_rect_keeps_aspect_ratio() {
        let area = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(300.0, 500.0));
        let rect = fit_rect(area, Vec2::new(600.0, 500.0));
        assert_eq!(rect.size(), Vec2::new(300.0, 250.0));
        assert_eq!(rect.center(), area.center());
    }

    #[test]
    fn test_fit_rect_never_upscales() {
        let area = Rect::from_min_size(pos2(10.0, 10.0), Vec2::new(2000.0, 2000.0));
        let rect = fit_rect(area, Vec2::new(600.0, 500.0));
        assert_eq!(rect.size(), Vec2::new(600.0, 500.0));
    }
}
