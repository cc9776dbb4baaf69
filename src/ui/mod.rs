mod cpu_view;
mod network_view;
mod storage_view;
mod system_view;

pub use cpu_view::show_cpu;
pub use network_view::show_network;
pub use storage_view::show_storage;
pub use system_view::show_system;

use egui::Vec2;

/// Scrolling line plot of one or more histories, newest sample on the right.
pub fn history_plot(
    ui: &mut egui::Ui,
    id: impl std::hash::Hash,
    height: f32,
    series: &[(&str, Vec<f64>)],
    max_points: usize,
    y_max: Option<f64>,
) {
    let mut plot = egui_plot::Plot::new(id)
        .height(height)
        .show_axes(true)
        .set_margin_fraction(Vec2::ZERO)
        .include_x(0.0)
        .include_x(max_points as f64)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false);
    if let Some(y_max) = y_max {
        plot = plot.include_y(y_max);
    }
    if series.len() > 1 {
        plot = plot.legend(egui_plot::Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for (name, history) in series {
            // right-align so a partly filled history scrolls in from the right
            let offset = max_points.saturating_sub(history.len());
            let points: egui_plot::PlotPoints = history
                .iter()
                .enumerate()
                .map(|(i, v)| [(offset + i) as f64, *v])
                .collect();
            plot_ui.line(egui_plot::Line::new(points).name(*name));
        }
    });
}

/// Horizontal fill bar for a 0..=100 percentage.
pub fn gauge(ui: &mut egui::Ui, percent: f32, text: impl Into<egui::WidgetText>) {
    let fraction = (percent / 100.0).clamp(0.0, 1.0);
    ui.add(egui::ProgressBar::new(fraction).text(text));
}
