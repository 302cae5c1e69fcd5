//! Color themes for rendered documents.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Terminal color theme applied to a rendered document.
///
/// Uses the conventional camelCase terminal-theme JSON shape, so themes
/// exported by terminal emulators load directly. Any missing field falls
/// back to the built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Window background
    pub background: String,
    /// Default text color
    pub foreground: String,
    /// Cursor color
    pub cursor: String,
    /// Selection highlight color
    pub selection: String,
    /// ANSI black (slot 0)
    pub black: String,
    /// ANSI red (slot 1)
    pub red: String,
    /// ANSI green (slot 2)
    pub green: String,
    /// ANSI yellow (slot 3)
    pub yellow: String,
    /// ANSI blue (slot 4)
    pub blue: String,
    /// ANSI magenta (slot 5)
    pub magenta: String,
    /// ANSI cyan (slot 6)
    pub cyan: String,
    /// ANSI white (slot 7)
    pub white: String,
    /// ANSI bright black (slot 8)
    pub bright_black: String,
    /// ANSI bright red (slot 9)
    pub bright_red: String,
    /// ANSI bright green (slot 10)
    pub bright_green: String,
    /// ANSI bright yellow (slot 11)
    pub bright_yellow: String,
    /// ANSI bright blue (slot 12)
    pub bright_blue: String,
    /// ANSI bright magenta (slot 13)
    pub bright_magenta: String,
    /// ANSI bright cyan (slot 14)
    pub bright_cyan: String,
    /// ANSI bright white (slot 15)
    pub bright_white: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            background: "#171717".to_string(),
            foreground: "#dddddd".to_string(),
            cursor: "#dddddd".to_string(),
            selection: "#343434".to_string(),
            black: "#282a2e".to_string(),
            red: "#d74e6f".to_string(),
            green: "#31bb71".to_string(),
            yellow: "#d3e561".to_string(),
            blue: "#8056ff".to_string(),
            magenta: "#ed61d7".to_string(),
            cyan: "#04d7d7".to_string(),
            white: "#c5c8c6".to_string(),
            bright_black: "#4b4b4b".to_string(),
            bright_red: "#fe5f86".to_string(),
            bright_green: "#00d787".to_string(),
            bright_yellow: "#ebff71".to_string(),
            bright_blue: "#8f69ff".to_string(),
            bright_magenta: "#ff7aea".to_string(),
            bright_cyan: "#00fefe".to_string(),
            bright_white: "#ffffff".to_string(),
        }
    }
}

impl Theme {
    /// Parse a theme from a JSON string. Missing fields take the built-in
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve a captured color against the theme.
    ///
    /// Captures may carry ANSI slot names instead of concrete colors;
    /// those map to the theme's slots. Anything else (hex colors, CSS
    /// names, the empty string) passes through unchanged.
    pub fn resolve<'a>(&'a self, color: &'a str) -> &'a str {
        let mut key = [0u8; 16];
        let mut len = 0;
        for byte in color.bytes() {
            if byte == b'-' || byte == b'_' {
                continue;
            }
            if len == key.len() {
                return color;
            }
            key[len] = byte.to_ascii_lowercase();
            len += 1;
        }
        match &key[..len] {
            b"black" => &self.black,
            b"red" => &self.red,
            b"green" => &self.green,
            b"yellow" => &self.yellow,
            b"blue" => &self.blue,
            b"magenta" => &self.magenta,
            b"cyan" => &self.cyan,
            b"white" => &self.white,
            b"brightblack" => &self.bright_black,
            b"brightred" => &self.bright_red,
            b"brightgreen" => &self.bright_green,
            b"brightyellow" => &self.bright_yellow,
            b"brightblue" => &self.bright_blue,
            b"brightmagenta" => &self.bright_magenta,
            b"brightcyan" => &self.bright_cyan,
            b"brightwhite" => &self.bright_white,
            _ => color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_complete() {
        let theme = Theme::default();
        assert!(!theme.background.is_empty());
        assert!(!theme.foreground.is_empty());
        assert!(!theme.cursor.is_empty());
        assert!(!theme.bright_white.is_empty());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let theme = Theme::from_json(r##"{"background": "#000000", "name": "pitch"}"##).unwrap();
        assert_eq!(theme.background, "#000000");
        assert_eq!(theme.name, "pitch");
        // Untouched fields come from the default theme
        assert_eq!(theme.foreground, Theme::default().foreground);
    }

    #[test]
    fn test_from_json_camel_case() {
        let theme = Theme::from_json(r##"{"brightBlack": "#333333"}"##).unwrap();
        assert_eq!(theme.bright_black, "#333333");
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(Theme::from_json("not json").is_err());
    }

    #[test]
    fn test_resolve_ansi_names() {
        let theme = Theme::default();
        assert_eq!(theme.resolve("red"), theme.red);
        assert_eq!(theme.resolve("bright_black"), theme.bright_black);
        assert_eq!(theme.resolve("brightBlack"), theme.bright_black);
        assert_eq!(theme.resolve("bright-green"), theme.bright_green);
    }

    #[test]
    fn test_resolve_passes_through_concrete_colors() {
        let theme = Theme::default();
        assert_eq!(theme.resolve("#ff00aa"), "#ff00aa");
        assert_eq!(theme.resolve("rgb(1,2,3)"), "rgb(1,2,3)");
        assert_eq!(theme.resolve(""), "");
    }

    #[test]
    fn test_roundtrip() {
        let theme = Theme::default();
        let json = serde_json::to_string(&theme).unwrap();
        assert!(json.contains("\"brightBlack\""));
        let back = Theme::from_json(&json).unwrap();
        assert_eq!(theme, back);
    }
}
