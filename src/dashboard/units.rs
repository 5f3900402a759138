//! Display unit selection
//!
//! The scale reports every weight in both fluid ounces and grams; the unit
//! here only selects which half of the pair is shown. Toggling never touches
//! stored measurements or history.

use serde::{Deserialize, Serialize};

/// Unit used for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    /// Fluid ounces
    Oz,
    /// Grams
    G,
}

impl DisplayUnit {
    /// Label shown next to values
    pub fn label(&self) -> &'static str {
        match self {
            DisplayUnit::Oz => "fl oz",
            DisplayUnit::G => "g",
        }
    }

    /// Full name, used in notices ("Switched to grams")
    pub fn name(&self) -> &'static str {
        match self {
            DisplayUnit::Oz => "fluid ounces",
            DisplayUnit::G => "grams",
        }
    }

    /// The other unit
    pub fn toggled(&self) -> DisplayUnit {
        match self {
            DisplayUnit::Oz => DisplayUnit::G,
            DisplayUnit::G => DisplayUnit::Oz,
        }
    }

    /// Parse a config/CLI value ("oz" or "g")
    pub fn parse(s: &str) -> Option<DisplayUnit> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oz" | "floz" | "fl_oz" => Some(DisplayUnit::Oz),
            "g" | "grams" => Some(DisplayUnit::G),
            _ => None,
        }
    }
}

impl std::fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayUnit::Oz => write!(f, "oz"),
            DisplayUnit::G => write!(f, "g"),
        }
    }
}

/// Format a weight for display, two decimal places
pub fn format_weight(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(DisplayUnit::Oz.toggled(), DisplayUnit::G);
        assert_eq!(DisplayUnit::G.toggled(), DisplayUnit::Oz);
        assert_eq!(DisplayUnit::Oz.toggled().toggled(), DisplayUnit::Oz);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DisplayUnit::Oz.label(), "fl oz");
        assert_eq!(DisplayUnit::G.label(), "g");
        assert_eq!(DisplayUnit::G.name(), "grams");
    }

    #[test]
    fn test_parse() {
        assert_eq!(DisplayUnit::parse("oz"), Some(DisplayUnit::Oz));
        assert_eq!(DisplayUnit::parse(" G "), Some(DisplayUnit::G));
        assert_eq!(DisplayUnit::parse("grams"), Some(DisplayUnit::G));
        assert_eq!(DisplayUnit::parse("lbs"), None);
    }

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(format_weight(8.825), "8.82");
        assert_eq!(format_weight(0.0), "0.00");
        assert_eq!(format_weight(-1.5), "-1.50");
    }
}
