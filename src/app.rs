use crate::components::settings::{show_settings_window, Settings};
use crate::config;
use crate::metrics::{EngineConfig, Sampler, SystemSource};
use crate::ui::{show_cpu, show_network, show_storage, show_system};

pub struct DashboardApp {
    sampler: Sampler,
    settings: Settings,
}

impl DashboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous settings (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        Self {
            sampler: Sampler::spawn(SystemSource::default(), EngineConfig::default()),
            settings,
        }
    }
}

impl eframe::App for DashboardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.settings.apply(ctx);
        let latest = self.sampler.latest();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.add_space(16.0);
                egui::widgets::global_theme_preference_buttons(ui);

                ui.add_space(16.0);
                if ui.button("⚙").clicked() {
                    self.settings.show();
                }
            });
        });

        show_settings_window(ctx, &mut self.settings);

        egui::CentralPanel::default().show(ctx, |ui| {
            if latest.ticks == 0 {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Collecting first sample…");
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                section(ui, "CPU Performance", |ui| {
                    show_cpu(ui, &latest, &self.settings)
                });
                section(ui, "Memory / Storage", |ui| show_storage(ui, &latest));
                section(ui, "Network / Power", |ui| show_network(ui, &latest));
                section(ui, "System Info / Processes", |ui| {
                    show_system(ui, &latest, &self.settings)
                });
            });
        });

        // the sampler publishes once per tick
        ctx.request_repaint_after(config::TICK_INTERVAL / 2);
    }
}

fn section(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading(title);
        add_contents(ui);
    });
    ui.add_space(8.0);
}
