use ratatui::style::Color;

/// Light or dark palette. Starts dark; the choice is not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub translation: Color,
    pub border: Color,
    pub note: Color,
    pub error: Color,
    pub hard: Color,
    pub good: Color,
    pub easy: Color,
    pub gauge: Color,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Indicator for the mode a toggle would switch to
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "\u{263e} dark",
            Self::Dark => "\u{2600} light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                bg: Color::Rgb(243, 244, 246),
                fg: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(107, 114, 128),
                accent: Color::Rgb(37, 99, 235),
                translation: Color::Rgb(5, 150, 105),
                border: Color::Rgb(209, 213, 219),
                note: Color::Rgb(30, 64, 175),
                error: Color::Rgb(220, 38, 38),
                hard: Color::Rgb(220, 38, 38),
                good: Color::Rgb(202, 138, 4),
                easy: Color::Rgb(22, 163, 74),
                gauge: Color::Rgb(37, 99, 235),
            },
            Self::Dark => Palette {
                bg: Color::Rgb(17, 24, 39),
                fg: Color::Rgb(243, 244, 246),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(96, 165, 250),
                translation: Color::Rgb(52, 211, 153),
                border: Color::Rgb(55, 65, 81),
                note: Color::Rgb(147, 197, 253),
                error: Color::Rgb(248, 113, 113),
                hard: Color::Rgb(248, 113, 113),
                good: Color::Rgb(250, 204, 21),
                easy: Color::Rgb(74, 222, 128),
                gauge: Color::Rgb(37, 99, 235),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Light.palette().bg, Theme::Dark.palette().bg);
    }
}
