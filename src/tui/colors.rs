use std::collections::HashMap;
use std::sync::OnceLock;

use palette::{FromColor, Lch, Srgb};

use crate::engine::cell::Card;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Rgb {
    color: Srgb<u8>,
}

impl Rgb {
    pub(crate) fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Srgb::new(r, g, b),
        }
    }

    #[inline(always)]
    pub(crate) fn r(&self) -> u8 {
        self.color.red
    }

    #[inline(always)]
    pub(crate) fn g(&self) -> u8 {
        self.color.green
    }

    #[inline(always)]
    pub(crate) fn b(&self) -> u8 {
        self.color.blue
    }
}

impl From<Lch> for Rgb {
    fn from(lch: Lch) -> Rgb {
        let color: Srgb = Srgb::from_color(lch);
        Rgb {
            color: color.into_format::<u8>(),
        }
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(f: Rgb) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: f.r(),
            g: f.g(),
            b: f.b(),
        }
    }
}

/// Background and foreground colors of a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TileColors {
    pub(crate) background: Rgb,
    pub(crate) foreground: Rgb,
}

struct Colors {
    card_colors: HashMap<Card, TileColors>,
    fallback: TileColors,
}

static DEFAULT_COLORS: OnceLock<Colors> = OnceLock::new();

fn defaults() -> Colors {
    let fg_hue: f32 = 28.0 + 180.0;
    let foreground: Lch = Lch::new(20.0, 50.0, fg_hue);
    // one hue step per power of two from 2 up to the winning tile
    let card_colors = (1..12u32)
        .map(|i| {
            let background: Lch = Lch::new(80.0, 60.0, i as f32 * 360.0 / 11.0);
            (
                2u32.pow(i),
                TileColors {
                    background: background.into(),
                    foreground: foreground.into(),
                },
            )
        })
        .collect();
    Colors {
        card_colors,
        fallback: TileColors {
            background: Rgb::new(255, 255, 255),
            foreground: Rgb::new(90, 0, 0),
        },
    }
}

/// Colors used to draw the tile holding `value`.
#[inline(always)]
pub(crate) fn colors_from_value(value: Card) -> TileColors {
    let colors = DEFAULT_COLORS.get_or_init(defaults);
    *colors.card_colors.get(&value).unwrap_or(&colors.fallback)
}
