use super::gauge;
use crate::metrics::format::{format_bytes, format_rate};
use crate::metrics::Latest;

pub fn show_storage(ui: &mut egui::Ui, latest: &Latest) {
    let snapshot = &latest.snapshot;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(260.0);
            let ram = &snapshot.memory;
            ui.label("RAM");
            gauge(ui, ram.percent, format!("{:.1}%", ram.percent));
            ui.label(format!(
                "{} of {} used",
                format_bytes(ram.used_bytes),
                format_bytes(ram.total_bytes)
            ));
            ui.label(format!("Available: {}", format_bytes(ram.available_bytes)));
        });

        ui.separator();

        ui.vertical(|ui| {
            ui.set_width(260.0);
            let disk = &snapshot.disk_usage;
            ui.label("Disk");
            gauge(ui, disk.percent, format!("{:.1}%", disk.percent));
            ui.label(format!(
                "{} of {} used",
                format_bytes(disk.used_bytes),
                format_bytes(disk.total_bytes)
            ));
            ui.label(format!("Free: {}", format_bytes(disk.free_bytes)));
        });

        ui.separator();

        ui.vertical(|ui| {
            let io = &snapshot.disk_io;
            ui.label("Disk I/O");
            egui::Grid::new("disk_io").num_columns(3).show(ui, |ui| {
                ui.label("");
                ui.label("Read");
                ui.label("Write");
                ui.end_row();

                ui.label("Total");
                ui.label(format_bytes(io.read_bytes));
                ui.label(format_bytes(io.write_bytes));
                ui.end_row();

                ui.label("Rate");
                ui.label(format_rate(latest.rates.disk_read_rate_bps));
                ui.label(format_rate(latest.rates.disk_write_rate_bps));
                ui.end_row();

                ui.label("Ops");
                ui.label(io.read_ops.to_string());
                ui.label(io.write_ops.to_string());
                ui.end_row();
            });
        });
    });
}
