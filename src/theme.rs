// src/theme.rs

use ratatui::style::{Color, Modifier, Style};

/// Fixed brand colors.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub red600: Color,
    pub yellow500: Color,
    pub purple500: Color,
    pub purple400: Color,
    pub purple300: Color,
    pub purple200: Color,
    pub purple100: Color,
}

pub const PALETTE: Palette = Palette {
    red600: Color::Rgb(0xdc, 0x26, 0x26),
    yellow500: Color::Rgb(0xea, 0xb3, 0x08),
    purple500: Color::Rgb(0x8b, 0x5c, 0xf6),
    purple400: Color::Rgb(0xa7, 0x8b, 0xfa),
    purple300: Color::Rgb(0xd2, 0xa8, 0xff),
    purple200: Color::Rgb(0xd6, 0xbc, 0xfa),
    purple100: Color::Rgb(0xe9, 0xd8, 0xfd),
};

/// Presentation settings for the whole session. Built once in `main` and
/// only ever borrowed by the drawing code.
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub text: Color,
    pub subtle: Color,
    pub highlight: Color,
    pub special: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            palette: PALETTE,
            text: Color::Rgb(0xff, 0xff, 0xff),
            subtle: Color::Rgb(0x38, 0x38, 0x38),
            highlight: Color::Rgb(0x7d, 0x56, 0xf4),
            special: Color::Rgb(0x73, 0xf5, 0x9f),
        }
    }

    pub fn light() -> Self {
        Self {
            palette: PALETTE,
            text: Color::Rgb(0x00, 0x00, 0x00),
            subtle: Color::Rgb(0xd9, 0xdc, 0xcf),
            highlight: Color::Rgb(0x87, 0x4b, 0xfd),
            special: Color::Rgb(0x43, 0xbf, 0x6d),
        }
    }

    pub fn title_bar(&self) -> Style {
        Style::default()
            .fg(self.palette.purple100)
            .bg(self.palette.purple500)
            .add_modifier(Modifier::BOLD)
    }

    pub fn item_title(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn item_description(&self) -> Style {
        Style::default().fg(self.palette.purple300)
    }

    pub fn selected_title(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_description(&self) -> Style {
        Style::default().fg(self.palette.purple400)
    }

    pub fn placeholder(&self) -> Style {
        Style::default().fg(self.subtle)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.subtle)
    }

    pub fn status(&self) -> Style {
        Style::default().fg(self.palette.purple200)
    }

    pub fn loading(&self) -> Style {
        Style::default().fg(self.palette.yellow500)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.palette.red600)
            .add_modifier(Modifier::BOLD)
    }

    pub fn filter(&self) -> Style {
        Style::default().fg(self.special)
    }

    pub fn help(&self) -> Style {
        Style::default().fg(self.subtle)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
