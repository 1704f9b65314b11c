//! Chart themes.
//!
//! Controls the colors visualizations pick their scales from.

use crate::color::Rgba;
use crate::host::ThemeAccessor;
use serde::{Deserialize, Serialize};

/// Color sets of a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Gradients for continuous scales; the first one is used.
    #[serde(default)]
    pub gradients: Vec<Vec<Rgba>>,
    /// Palettes for discrete scales; the first one is used.
    #[serde(default)]
    pub categories: Vec<Vec<Rgba>>,
}

/// Theme specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Theme colors.
    pub colors: ThemeColors,
}

fn default_name() -> String {
    "custom".to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}

impl Theme {
    /// Create a theme from a single gradient and palette.
    #[must_use]
    pub fn new(name: &str, gradient: Vec<Rgba>, categories: Vec<Rgba>) -> Self {
        Self {
            name: name.to_string(),
            colors: ThemeColors {
                gradients: vec![gradient],
                categories: vec![categories],
            },
        }
    }

    /// Default theme: yellow-to-green gradient, ten-color categorical palette.
    #[must_use]
    pub fn standard() -> Self {
        let mut theme = Self::new(
            "default",
            vec![Rgba::rgb(0xfe, 0xfa, 0xca), Rgba::rgb(0x00, 0x8b, 0x15)],
            vec![
                Rgba::rgb(0x1f, 0x77, 0xb4),
                Rgba::rgb(0xff, 0x7f, 0x0e),
                Rgba::rgb(0x2c, 0xa0, 0x2c),
                Rgba::rgb(0xd6, 0x27, 0x28),
                Rgba::rgb(0x94, 0x67, 0xbd),
                Rgba::rgb(0x8c, 0x56, 0x4b),
                Rgba::rgb(0xe3, 0x77, 0xc2),
                Rgba::rgb(0x7f, 0x7f, 0x7f),
                Rgba::rgb(0xbc, 0xbd, 0x22),
                Rgba::rgb(0x17, 0xbe, 0xcf),
            ],
        );
        theme.colors.gradients.push(vec![Rgba::rgb(0xf0, 0xf9, 0xe8), Rgba::rgb(0x08, 0x68, 0xac)]);
        theme
    }

    /// Greyscale theme for print.
    #[must_use]
    pub fn monochrome() -> Self {
        Self::new(
            "monochrome",
            vec![Rgba::rgb(0xf0, 0xf0, 0xf0), Rgba::rgb(0x25, 0x25, 0x25)],
            vec![
                Rgba::rgb(0x25, 0x25, 0x25),
                Rgba::rgb(0x63, 0x63, 0x63),
                Rgba::rgb(0x96, 0x96, 0x96),
                Rgba::rgb(0xcc, 0xcc, 0xcc),
            ],
        )
    }

    /// Look up a built-in theme by name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::standard()),
            "monochrome" => Some(Self::monochrome()),
            _ => None,
        }
    }
}

impl ThemeAccessor for Theme {
    fn gradient(&self) -> &[Rgba] {
        self.colors.gradients.first().map(Vec::as_slice).unwrap_or_default()
    }

    fn categories(&self) -> &[Rgba] {
        self.colors.categories.first().map(Vec::as_slice).unwrap_or_default()
    }
}
