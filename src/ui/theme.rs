use ratatui::style::Color;

use crate::config::ColorsConfig;
use crate::format::Tone;

/// Terminal colors for the three value tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneColors {
    pub low: Color,
    pub neutral: Color,
    pub high: Color,
}

impl ToneColors {
    pub fn color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Low => self.low,
            Tone::Neutral => self.neutral,
            Tone::High => self.high,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub selection_border: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub overlay_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub delta_fg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub tones: ToneColors,
}

impl Theme {
    pub fn from_config(theme_name: &str, colors: &ColorsConfig) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "colorblind" => Self::colorblind(),
            _ => Self::dark(),
        };
        theme.apply_tone_overrides(colors);
        theme
    }

    pub fn next(&self, colors: &ColorsConfig) -> Self {
        let next_name = match self.name {
            "dark" => "light",
            "light" => "colorblind",
            _ => "dark",
        };
        Theme::from_config(next_name, colors)
    }

    // Each tone falls back to the theme's own color when the configured
    // value is not a valid hex color.
    fn apply_tone_overrides(&mut self, colors: &ColorsConfig) {
        if let Some(low) = parse_hex_color(&colors.low) {
            self.tones.low = low;
        }
        if let Some(neutral) = parse_hex_color(&colors.neutral) {
            self.tones.neutral = neutral;
        }
        if let Some(high) = parse_hex_color(&colors.high) {
            self.tones.high = high;
        }
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            selection_border: Color::White,
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            overlay_bg: Color::Rgb(18, 20, 26),
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::Green,
            delta_fg: Color::Rgb(103, 232, 249),
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            tones: ToneColors {
                low: Color::Rgb(16, 185, 129),
                neutral: Color::Rgb(200, 200, 200),
                high: Color::Rgb(239, 68, 68),
            },
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            selection_border: Color::Rgb(200, 100, 0),
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            overlay_bg: Color::Rgb(245, 245, 245),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            accent: Color::Blue,
            delta_fg: Color::Rgb(70, 130, 180),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            tones: ToneColors {
                low: Color::Rgb(60, 160, 60),
                neutral: Color::Rgb(90, 90, 90),
                high: Color::Rgb(200, 60, 60),
            },
        }
    }

    pub fn colorblind() -> Self {
        Theme {
            name: "colorblind",
            header_accent_bg: Color::Rgb(0, 114, 178),
            header_accent_fg: Color::White,
            selection_border: Color::Rgb(240, 228, 66),
            status_ok: Color::Rgb(0, 158, 115),
            status_err: Color::Rgb(213, 94, 0),
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::Rgb(86, 180, 233),
            overlay_bg: Color::Rgb(18, 20, 26),
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::Rgb(86, 180, 233),
            delta_fg: Color::Rgb(240, 228, 66),
            pill_key_bg: Color::Rgb(230, 159, 0),
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            tones: ToneColors {
                low: Color::Rgb(0, 114, 178),
                neutral: Color::Rgb(200, 200, 200),
                high: Color::Rgb(213, 94, 0),
            },
        }
    }
}

pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#5fb35f"), Some(Color::Rgb(0x5f, 0xb3, 0x5f)));
        assert_eq!(parse_hex_color("ffffff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn config_colors_override_tones() {
        let colors = ColorsConfig::default();
        let theme = Theme::from_config("dark", &colors);
        assert_eq!(theme.tones.low, Color::Rgb(0x5f, 0xb3, 0x5f));
        assert_eq!(theme.tones.color(Tone::Neutral), Color::Rgb(0xc8, 0xc8, 0xc8));
        assert_eq!(theme.tones.color(Tone::High), Color::Rgb(0xe0, 0x52, 0x52));
    }

    #[test]
    fn invalid_override_keeps_theme_tone() {
        let colors = ColorsConfig {
            high: "red".to_string(),
            ..Default::default()
        };
        let theme = Theme::from_config("light", &colors);
        assert_eq!(theme.tones.high, Theme::light().tones.high);
    }

    #[test]
    fn theme_cycle_wraps() {
        let colors = ColorsConfig::default();
        let mut theme = Theme::from_config("dark", &colors);
        let mut names = Vec::new();
        for _ in 0..3 {
            theme = theme.next(&colors);
            names.push(theme.name);
        }
        assert_eq!(names, vec!["light", "colorblind", "dark"]);
    }

    #[test]
    fn unknown_theme_is_dark() {
        let theme = Theme::from_config("neon", &ColorsConfig::default());
        assert_eq!(theme.name, "dark");
    }
}
