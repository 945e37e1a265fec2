use crate::prelude::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit RGB colour written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
/// Title colour.
pub const GOLD: Rgb = Rgb::new(0xad, 0x99, 0x3c);
/// Secondary text colour for captions and the distance value.
pub const CAPTION_GREY: Rgb = Rgb::new(0x86, 0x86, 0x86);
pub const DEFAULT_PLAYER_COLOR: Rgb = Rgb::new(0xea, 0x23, 0x04);

impl FromStr for Rgb {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidInput(format!(
                "colour {:?} is not #RRGGBB",
                value
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|err| CoreError::InvalidInput(format!("colour {:?}: {}", value, err)))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Visualisation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Colour of pitch lines, non-goal shots and plain text.
    pub fn foreground(&self) -> Rgb {
        match self {
            Theme::Light => BLACK,
            Theme::Dark => WHITE,
        }
    }

    /// Figure and pitch background, also used for the exported image.
    pub fn background(&self) -> Rgb {
        match self {
            Theme::Light => WHITE,
            Theme::Dark => BLACK,
        }
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CoreError::InvalidInput(format!(
                "theme {:?} is not light or dark",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Everything the shot map needs besides data. Passed into each render
/// call; nothing is process-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub player_color: Rgb,
    pub theme: Theme,
}

impl RenderStyle {
    pub fn new(player_color: Rgb, theme: Theme) -> Self {
        Self {
            player_color,
            theme,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_COLOR, Theme::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!("#EA2304".parse::<Rgb>().unwrap(), DEFAULT_PLAYER_COLOR);
        assert_eq!("ad993c".parse::<Rgb>().unwrap(), GOLD);
        assert_eq!(GOLD.to_string(), "#AD993C");
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn themes_swap_foreground_and_background() {
        assert_eq!(Theme::Light.foreground(), BLACK);
        assert_eq!(Theme::Light.background(), WHITE);
        assert_eq!(Theme::Dark.foreground(), WHITE);
        assert_eq!(Theme::Dark.background(), BLACK);
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
