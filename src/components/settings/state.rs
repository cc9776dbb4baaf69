#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Settings {
    pub scale: f32,
    pub font_size: f32,
    /// Rows in the process table.
    pub top_processes: usize,
    pub show_per_core: bool,
    #[serde(skip)]
    show_window: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            font_size: 14.0,
            top_processes: 10,
            show_per_core: true,
            show_window: false,
        }
    }
}

impl Settings {
    pub fn show(&mut self) {
        self.show_window = true;
    }

    pub fn is_visible(&self) -> bool {
        self.show_window
    }

    pub fn hide(&mut self) {
        self.show_window = false;
    }

    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_pixels_per_point(self.scale);

        let mut style = (*ctx.style()).clone();
        style.text_styles = [
            (
                egui::TextStyle::Heading,
                egui::FontId::new(self.font_size + 4.0, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Body,
                egui::FontId::new(self.font_size, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Monospace,
                egui::FontId::new(self.font_size, egui::FontFamily::Monospace),
            ),
            (
                egui::TextStyle::Button,
                egui::FontId::new(self.font_size, egui::FontFamily::Proportional),
            ),
            (
                egui::TextStyle::Small,
                egui::FontId::new(self.font_size - 2.0, egui::FontFamily::Proportional),
            ),
        ]
        .into();
        ctx.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_window_toggles() {
        let mut settings = Settings::default();
        assert!(!settings.is_visible());
        settings.show();
        assert!(settings.is_visible());
        settings.hide();
        assert!(!settings.is_visible());
    }
}
