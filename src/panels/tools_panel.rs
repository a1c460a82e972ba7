use crate::MemeApp;
use crate::geometry::HitOrder;
use crate::style::{MAX_FONT_SIZE, MIN_FONT_SIZE};

pub fn tools_panel(app: &mut MemeApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Meme");

            if ui.button("Open image…").clicked() {
                app.open_image();
            }
            ui.separator();

            ui.label("Text");
            let response = ui.text_edit_singleline(app.text_input_mut());
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.horizontal(|ui| {
                if ui.button("Add").clicked() || submitted {
                    app.add_text_from_input();
                }
                let has_selection = app.context().store().selected().is_some();
                if ui.add_enabled(has_selection, egui::Button::new("Delete")).clicked() {
                    app.delete_selected();
                }
                let has_text = !app.context().store().is_empty();
                if ui.add_enabled(has_text, egui::Button::new("Clear")).clicked() {
                    app.clear_text();
                }
            });
            ui.separator();

            // Edit a copy; the context only redraws when it actually differs.
            let mut style = app.context().style().clone();
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_srgba(&mut style.fill_color);
            });

            let families: Vec<String> = app.context().fonts().families().map(str::to_owned).collect();
            egui::ComboBox::from_label("Font")
                .selected_text(style.font_family.clone())
                .show_ui(ui, |ui| {
                    for family in families {
                        ui.selectable_value(&mut style.font_family, family.clone(), family);
                    }
                });

            ui.add(egui::Slider::new(&mut style.font_size, MIN_FONT_SIZE..=MAX_FONT_SIZE).text("Size"));
            app.update_style(style);

            let mut topmost = app.context().hit_order() == HitOrder::Topmost;
            if ui.checkbox(&mut topmost, "Grab topmost text").changed() {
                let order = if topmost { HitOrder::Topmost } else { HitOrder::CreationOrder };
                app.context_mut().set_hit_order(order);
            }
            ui.separator();

            let can_export = app.context().background().is_some();
            if ui.add_enabled(can_export, egui::Button::new("Download")).clicked() {
                app.export();
            }

            ui.separator();
            ui.small(app.status().to_owned());
        });
}
