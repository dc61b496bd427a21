use std::env;

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::BorderType,
};
use serde::Deserialize;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    TrueColor,
    Ansi256,
    Ansi16,
}

impl ColorMode {
    pub fn detect_auto() -> Self {
        if let Ok(v) = env::var("SCRIBE_COLOR_MODE") {
            return Self::parse(&v);
        }

        if let Ok(v) = env::var("COLORTERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("truecolor") || l.contains("24bit") {
                return ColorMode::TrueColor;
            }
        }
        if let Ok(v) = env::var("TERM") {
            let l = v.to_ascii_lowercase();
            if l.contains("256color") {
                return ColorMode::Ansi256;
            }
        }
        ColorMode::Ansi16
    }

    pub fn parse(v: &str) -> Self {
        match v.to_ascii_lowercase().as_str() {
            "24bit" | "truecolor" | "rgb" => ColorMode::TrueColor,
            "256" | "ansi256" => ColorMode::Ansi256,
            "16" | "ansi16" | "ansi" => ColorMode::Ansi16,
            _ => ColorMode::Auto,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::TrueColor => "24-bit",
            ColorMode::Ansi256 => "256",
            ColorMode::Ansi16 => "16",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiGroup {
    Canvas,
    Title,
    Label,
    LabelFocused,
    Value,
    Placeholder,
    Hint,
    Error,
    Border,
    BorderFocused,
    Button,
    ButtonFocused,
    PickerHeader,
    OptionSelected,
    Shadow,
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub picker_header: Rgb,
    pub text: Rgb,
    pub border: Rgb,
    pub error: Rgb,
    pub hint: Rgb,
    pub canvas: Rgb,
    pub shadow: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        // Light "paper" look with muted blue primary and rose secondary
        Self {
            primary: Rgb(0x75, 0x84, 0xa4),
            secondary: Rgb(0xf2, 0xb6, 0xb7),
            picker_header: Rgb(0x00, 0x00, 0x00),
            text: Rgb(0x37, 0x47, 0x60),
            border: Rgb(0xa4, 0x1d, 0x19),
            error: Rgb(0xf4, 0x43, 0x36),
            hint: Rgb(0x9e, 0x9e, 0x9e),
            canvas: Rgb(0xff, 0xff, 0xff),
            shadow: Rgb(0x21, 0x21, 0x21),
        }
    }
}

/// `[theme]` section of the config file. Colors are `#rrggbb`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    pub color_mode: Option<String>,
    /// Flat frames without drop shadow (default `true`).
    pub flat: Option<bool>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub picker_header: Option<String>,
    pub text: Option<String>,
    pub border: Option<String>,
    pub error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ColorMode,
    pub palette: Palette,
    pub flat: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ColorMode::TrueColor,
            palette: Palette::default(),
            flat: true,
        }
    }
}

impl Theme {
    pub fn from_env_auto() -> Self {
        Self {
            mode: ColorMode::detect_auto(),
            ..Self::default()
        }
    }

    /// Build the process-wide theme: defaults, overridden by the config
    /// section. Unparseable colors are logged and ignored.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let mut theme = Self::from_env_auto();
        if let Some(mode) = &cfg.color_mode {
            let parsed = ColorMode::parse(mode);
            if parsed != ColorMode::Auto {
                theme.mode = parsed;
            }
        }
        if let Some(flat) = cfg.flat {
            theme.flat = flat;
        }
        let p = &mut theme.palette;
        for (name, value, slot) in [
            ("primary", &cfg.primary, &mut p.primary),
            ("secondary", &cfg.secondary, &mut p.secondary),
            ("picker_header", &cfg.picker_header, &mut p.picker_header),
            ("text", &cfg.text, &mut p.text),
            ("border", &cfg.border, &mut p.border),
            ("error", &cfg.error, &mut p.error),
        ] {
            let Some(value) = value else { continue };
            match Rgb::from_hex(value) {
                Some(rgb) => *slot = rgb,
                None => warn!(color = name, value = %value, "ignoring invalid theme color"),
            }
        }
        theme
    }

    pub fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    pub fn border_type(&self) -> BorderType {
        if self.flat {
            BorderType::Plain
        } else {
            BorderType::Rounded
        }
    }

    pub fn style(&self, group: UiGroup) -> Style {
        let p = &self.palette;
        let paper = Style::default().bg(self.color(p.canvas));
        match group {
            UiGroup::Canvas => paper.fg(self.color(p.text)),
            UiGroup::Title => Style::default()
                .fg(self.color(p.canvas))
                .bg(self.color(p.primary))
                .add_modifier(Modifier::BOLD),
            UiGroup::Label => paper.fg(self.color(p.hint)),
            UiGroup::LabelFocused => paper.fg(self.color(p.primary)).add_modifier(Modifier::BOLD),
            UiGroup::Value => paper.fg(self.color(p.text)),
            UiGroup::Placeholder => paper.fg(self.color(p.hint)).add_modifier(Modifier::ITALIC),
            UiGroup::Hint => paper.fg(self.color(p.hint)),
            UiGroup::Error => paper.fg(self.color(p.error)),
            UiGroup::Border => paper.fg(self.color(p.border)),
            UiGroup::BorderFocused => paper.fg(self.color(p.primary)).add_modifier(Modifier::BOLD),
            UiGroup::Button => Style::default()
                .fg(self.color(p.text))
                .bg(self.color(p.secondary)),
            UiGroup::ButtonFocused => Style::default()
                .fg(self.color(p.canvas))
                .bg(self.color(p.primary))
                .add_modifier(Modifier::BOLD),
            UiGroup::PickerHeader => paper
                .fg(self.color(p.picker_header))
                .add_modifier(Modifier::BOLD),
            UiGroup::OptionSelected => Style::default()
                .fg(self.color(p.canvas))
                .bg(self.color(p.primary)),
            UiGroup::Shadow => Style::default().bg(self.color(p.shadow)),
            UiGroup::Success => paper.fg(self.color(p.primary)).add_modifier(Modifier::BOLD),
        }
    }

    fn color(&self, rgb: Rgb) -> Color {
        match self.mode {
            ColorMode::Auto => self.rgb_to_best(rgb),
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(rgb_to_ansi256(rgb.0, rgb.1, rgb.2)),
            ColorMode::Ansi16 => ansi16_from_rgb(rgb.0, rgb.1, rgb.2),
        }
    }

    fn rgb_to_best(&self, rgb: Rgb) -> Color {
        match ColorMode::detect_auto() {
            ColorMode::TrueColor => Color::Rgb(rgb.0, rgb.1, rgb.2),
            ColorMode::Ansi256 => Color::Indexed(rgb_to_ansi256(rgb.0, rgb.1, rgb.2)),
            ColorMode::Ansi16 | ColorMode::Auto => ansi16_from_rgb(rgb.0, rgb.1, rgb.2),
        }
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    // 6x6x6 cube vs. grayscale ramp, whichever is closer
    let r_idx = (r as f32 / 255.0 * 5.0).round() as u8;
    let g_idx = (g as f32 / 255.0 * 5.0).round() as u8;
    let b_idx = (b as f32 / 255.0 * 5.0).round() as u8;
    let color_idx = 16 + 36 * r_idx + 6 * g_idx + b_idx;

    let avg = (r as u16 + g as u16 + b as u16) as f32 / 3.0;
    let gray_idx = (avg / 255.0 * 23.0).round() as u8;
    let gray_color = 232 + gray_idx;

    let cube_r = r_idx as f32 * 255.0 / 5.0;
    let cube_g = g_idx as f32 * 255.0 / 5.0;
    let cube_b = b_idx as f32 * 255.0 / 5.0;
    let dcube = (cube_r - r as f32).abs() + (cube_g - g as f32).abs() + (cube_b - b as f32).abs();
    let gval = gray_idx as f32 * 255.0 / 23.0;
    let dgray = (gval - r as f32).abs() + (gval - g as f32).abs() + (gval - b as f32).abs();
    if dgray + 15.0 < dcube {
        gray_color
    } else {
        color_idx
    }
}

fn ansi16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let bright = avg > 128;
    let nearest = [
        (Color::Black, (0, 0, 0)),
        (Color::Red, (205, 0, 0)),
        (Color::Green, (0, 205, 0)),
        (Color::Yellow, (205, 205, 0)),
        (Color::Blue, (0, 0, 238)),
        (Color::Magenta, (205, 0, 205)),
        (Color::Cyan, (0, 205, 205)),
        (Color::Gray, (229, 229, 229)),
    ]
    .into_iter()
    .min_by_key(|(_, (cr, cg, cb))| {
        (*cr as i32 - r as i32).abs() + (*cg as i32 - g as i32).abs() + (*cb as i32 - b as i32).abs()
    })
    .map(|(c, _)| c)
    .unwrap_or(Color::White);
    match (nearest, bright) {
        (Color::Black, true) => Color::DarkGray,
        (Color::Red, true) => Color::LightRed,
        (Color::Green, true) => Color::LightGreen,
        (Color::Yellow, true) => Color::LightYellow,
        (Color::Blue, true) => Color::LightBlue,
        (Color::Magenta, true) => Color::LightMagenta,
        (Color::Cyan, true) => Color::LightCyan,
        (Color::Gray, true) => Color::White,
        (c, _) => c,
    }
}
