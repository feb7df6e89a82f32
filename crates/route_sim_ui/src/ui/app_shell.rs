use std::time::Duration;

use eframe::egui;

use crate::app::SimUiApp;
use crate::ui::controls::render_control_panel;
use crate::ui::map::render_map;

pub fn run() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Route Simulation",
        options,
        Box::new(|_cc| Ok(Box::new(SimUiApp::new()))),
    )
}

impl eframe::App for SimUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_routes();
        self.controller.tick();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            render_control_panel(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            render_map(ui, self);
        });

        if self.controller.is_playing() {
            ctx.request_repaint();
        } else if self.needs_animation() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
