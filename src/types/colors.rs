// src/types/colors.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notion's color palette, as used by annotations, blocks and tag options.
///
/// Unknown names fall back to `Default` instead of failing the whole node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Gray,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    GrayBackground,
    BrownBackground,
    RedBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    #[default]
    #[serde(other)]
    Default,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::RedBackground => "red_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
        }
    }

    pub fn is_background(&self) -> bool {
        self.as_str().ends_with("_background")
    }

    /// CSS class used by the page stylesheet, e.g. `color-red_background`.
    pub fn css_class(&self) -> String {
        format!("color-{}", self.as_str())
    }

    /// Background used for tag pills. Tag options carry foreground names
    /// ("red"), which Notion renders as a light tint of that hue.
    pub fn tag_background(&self) -> &'static str {
        match self {
            Color::Default => "rgba(227, 226, 224, 0.5)",
            Color::Gray | Color::GrayBackground => "rgb(227, 226, 224)",
            Color::Brown | Color::BrownBackground => "rgb(238, 224, 218)",
            Color::Red | Color::RedBackground => "rgb(255, 226, 221)",
            Color::Orange | Color::OrangeBackground => "rgb(250, 222, 201)",
            Color::Yellow | Color::YellowBackground => "rgb(253, 236, 200)",
            Color::Green | Color::GreenBackground => "rgb(219, 237, 219)",
            Color::Blue | Color::BlueBackground => "rgb(211, 229, 239)",
            Color::Purple | Color::PurpleBackground => "rgb(232, 222, 238)",
            Color::Pink | Color::PinkBackground => "rgb(245, 224, 233)",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        let color: Color = serde_json::from_str("\"blue_background\"").unwrap();
        assert_eq!(color, Color::BlueBackground);
        assert!(color.is_background());
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"blue_background\"");
    }

    #[test]
    fn unknown_colors_fall_back_to_default() {
        let color: Color = serde_json::from_str("\"ultraviolet\"").unwrap();
        assert_eq!(color, Color::Default);
    }
}
