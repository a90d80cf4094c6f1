use ratatui::style::Color;

/// Catppuccin-derived palette, Mocha (dark) by default with a Latte light
/// variant, trimmed to the colors the console actually draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Mocha,
    Latte,
}

impl Default for ThemeVariant {
    fn default() -> Self {
        Self::Mocha
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub red: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub lavender: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay1: Color,
    pub surface0: Color,
    pub base: Color,
}

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::mocha(),
            ThemeVariant::Latte => Self::latte(),
        }
    }

    fn mocha() -> Self {
        Self {
            red: Color::Rgb(0xf3, 0x8b, 0xa8),
            peach: Color::Rgb(0xfa, 0xb3, 0x87),
            yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
            green: Color::Rgb(0xa6, 0xe3, 0xa1),
            blue: Color::Rgb(0x89, 0xb4, 0xfa),
            lavender: Color::Rgb(0xb4, 0xbe, 0xfe),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext0: Color::Rgb(0xa6, 0xad, 0xc8),
            overlay1: Color::Rgb(0x7f, 0x84, 0x9c),
            surface0: Color::Rgb(0x31, 0x32, 0x44),
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
        }
    }

    fn latte() -> Self {
        Self {
            red: Color::Rgb(0xd2, 0x0f, 0x39),
            peach: Color::Rgb(0xfe, 0x64, 0x0b),
            yellow: Color::Rgb(0xdf, 0x8e, 0x1d),
            green: Color::Rgb(0x40, 0xa0, 0x2b),
            blue: Color::Rgb(0x1e, 0x66, 0xf5),
            lavender: Color::Rgb(0x72, 0x87, 0xfd),
            text: Color::Rgb(0x4c, 0x4f, 0x69),
            subtext0: Color::Rgb(0x6c, 0x6f, 0x85),
            overlay1: Color::Rgb(0x8c, 0x8f, 0xa1),
            surface0: Color::Rgb(0xcc, 0xd0, 0xda),
            base: Color::Rgb(0xef, 0xf1, 0xf5),
        }
    }
}
