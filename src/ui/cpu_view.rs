use super::{gauge, history_plot};
use crate::components::settings::Settings;
use crate::config;
use crate::metrics::{format::format_frequency, Latest};

pub fn show_cpu(ui: &mut egui::Ui, latest: &Latest, settings: &Settings) {
    let cpu = &latest.snapshot.cpu;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.set_width(220.0);
            ui.label(format!("Total: {:.1}%", cpu.total_percent));
            gauge(ui, cpu.total_percent, format!("{:.0}%", cpu.total_percent));
            ui.add_space(8.0);
            ui.label(format!("Cores: {}", cpu.core_count()));
            ui.label(format!(
                "Clock: {}",
                format_frequency(cpu.frequency_mhz).unwrap_or_else(|| "n/a".to_string())
            ));
        });

        if settings.show_per_core {
            ui.vertical(|ui| {
                ui.set_width(320.0);
                ui.label("Per core");
                core_bars(ui, &cpu.per_core);
            });
        }

        ui.vertical(|ui| {
            ui.label("History");
            let history: Vec<f64> = latest.cpu_history.iter().map(|&v| v as f64).collect();
            history_plot(
                ui,
                "cpu_history",
                140.0,
                &[("CPU %", history)],
                config::HISTORY_CAPACITY,
                Some(100.0),
            );
        });
    });
}

fn core_bars(ui: &mut egui::Ui, per_core: &[f32]) {
    let bars: Vec<egui_plot::Bar> = per_core
        .iter()
        .enumerate()
        .map(|(i, &usage)| egui_plot::Bar::new(i as f64, usage as f64).name(format!("cpu{i}")))
        .collect();

    egui_plot::Plot::new("cpu_cores")
        .height(140.0)
        .include_y(0.0)
        .include_y(100.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(egui_plot::BarChart::new(bars).width(0.7));
        });
}
