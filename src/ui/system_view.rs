use crate::components::settings::Settings;
use crate::metrics::format::{format_timestamp, format_uptime};
use crate::metrics::Latest;
use std::time::SystemTime;

pub fn show_system(ui: &mut egui::Ui, latest: &Latest, settings: &Settings) {
    let snapshot = &latest.snapshot;
    let host = &snapshot.host;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(360.0);
            egui::Grid::new("system_info").num_columns(2).show(ui, |ui| {
                let rows = [
                    ("Hostname", host.hostname.as_str()),
                    ("System", host.os_name.as_str()),
                    ("Release", host.os_release.as_str()),
                    ("Version", host.os_version.as_str()),
                    ("Machine", host.machine_arch.as_str()),
                    ("Processor", host.processor_name.as_str()),
                ];
                for (key, value) in rows {
                    ui.label(key);
                    ui.label(value);
                    ui.end_row();
                }

                ui.label("Booted");
                ui.label(format_timestamp(snapshot.boot_time));
                ui.end_row();

                ui.label("Uptime");
                ui.label(format_uptime(snapshot.uptime));
                ui.end_row();

                ui.label("Now");
                ui.label(format_timestamp(SystemTime::now()));
                ui.end_row();
            });
        });

        ui.separator();

        ui.vertical(|ui| {
            ui.label("Top processes by CPU");
            egui::ScrollArea::vertical()
                .max_height(220.0)
                .show(ui, |ui| {
                    egui::Grid::new("processes").striped(true).show(ui, |ui| {
                        for process in snapshot.processes.iter().take(settings.top_processes) {
                            ui.label(&process.name);
                            ui.label(format!("{:.1}%", process.cpu_percent));
                            ui.end_row();
                        }
                    });
                });
        });
    });
}
