use super::{gauge, history_plot};
use crate::config;
use crate::metrics::format::{format_bytes, format_rate, format_seconds_left};
use crate::metrics::{BatteryInfo, Latest};

pub fn show_network(ui: &mut egui::Ui, latest: &Latest) {
    let snapshot = &latest.snapshot;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(240.0);
            ui.label(format!(
                "Internet: {}",
                if snapshot.internet_reachable {
                    "connected"
                } else {
                    "offline"
                }
            ));
            ui.label(format!(
                "Sent: {} ({})",
                format_bytes(snapshot.network.sent_bytes),
                format_rate(latest.rates.network_sent_rate_bps)
            ));
            ui.label(format!(
                "Received: {} ({})",
                format_bytes(snapshot.network.recv_bytes),
                format_rate(latest.rates.network_recv_rate_bps)
            ));

            ui.collapsing("Interfaces", |ui| {
                egui::Grid::new("interfaces").striped(true).show(ui, |ui| {
                    for (name, iface) in &snapshot.network_interfaces {
                        ui.label(name);
                        ui.label(if iface.is_up { "up" } else { "down" });
                        ui.label(iface.ipv4_addresses.join(", "));
                        ui.label(
                            iface
                                .speed
                                .map(|s| format!("{s} Mbit/s"))
                                .unwrap_or_default(),
                        );
                        ui.end_row();
                    }
                });
            });
        });

        ui.vertical(|ui| {
            ui.set_width(420.0);
            ui.label("Throughput (KB/s)");
            let to_kb = |h: &[f64]| h.iter().map(|v| v / 1024.0).collect::<Vec<_>>();
            history_plot(
                ui,
                "network_history",
                140.0,
                &[
                    ("Sent", to_kb(&latest.sent_rate_history)),
                    ("Received", to_kb(&latest.recv_rate_history)),
                ],
                config::HISTORY_CAPACITY,
                None,
            );
        });

        ui.vertical(|ui| {
            ui.label("Battery");
            show_battery(ui, snapshot.battery.as_ref());
        });
    });
}

fn show_battery(ui: &mut egui::Ui, battery: Option<&BatteryInfo>) {
    let Some(battery) = battery else {
        ui.label("No battery");
        return;
    };
    gauge(ui, battery.percent, format!("{:.0}%", battery.percent));
    ui.label(if battery.is_charging {
        "Plugged in"
    } else {
        "On battery"
    });
    if let Some(secs) = battery.seconds_remaining {
        ui.label(format!("Remaining: {}", format_seconds_left(secs)));
    }
}
