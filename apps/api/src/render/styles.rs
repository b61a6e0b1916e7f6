//! Style variants for the structured PDF layout.
//!
//! Variants differ only in the declarative parameters below; the structured
//! renderer reads them from `STYLE_TABLE` and never branches on the name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::{Align, FontFamily, Frame, Rgb};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleName {
    #[default]
    Modern,
    Classic,
    Creative,
    Minimal,
}

impl StyleName {
    pub const ALL: [StyleName; 4] = [
        StyleName::Modern,
        StyleName::Classic,
        StyleName::Creative,
        StyleName::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Modern => "modern",
            StyleName::Classic => "classic",
            StyleName::Creative => "creative",
            StyleName::Minimal => "minimal",
        }
    }

    pub fn sheet(self) -> &'static StyleSheet {
        // STYLE_TABLE is ordered like `StyleName::ALL`.
        &STYLE_TABLE[self as usize]
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown style '{s}' (expected modern, classic, creative or minimal)"))
    }
}

/// Heading border: colour as `0xRRGGBB`, stroke width and padding in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BorderSpec {
    pub color: u32,
    pub width: f32,
    pub padding: f32,
}

impl BorderSpec {
    pub fn frame(&self) -> Frame {
        Frame {
            color: Rgb::from_hex(self.color),
            line_width: self.width,
            padding: self.padding,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleSheet {
    pub name: StyleName,
    pub label: &'static str,
    pub description: &'static str,
    pub family: FontFamily,
    pub title_size: f32,
    pub title_color: u32,
    pub title_align: Align,
    pub heading_size: f32,
    pub heading_color: u32,
    pub heading_border: Option<BorderSpec>,
}

pub static STYLE_TABLE: [StyleSheet; 4] = [
    StyleSheet {
        name: StyleName::Modern,
        label: "Modern - Bold & Professional",
        description: "Blue accents, bold headers, contemporary design",
        family: FontFamily::Helvetica,
        title_size: 24.0,
        title_color: 0x2563eb,
        title_align: Align::Center,
        heading_size: 14.0,
        heading_color: 0x1e40af,
        heading_border: Some(BorderSpec {
            color: 0x2563eb,
            width: 2.0,
            padding: 5.0,
        }),
    },
    StyleSheet {
        name: StyleName::Classic,
        label: "Classic - Traditional & Formal",
        description: "Black text, serif font, traditional business format",
        family: FontFamily::Times,
        title_size: 22.0,
        title_color: 0x000000,
        title_align: Align::Center,
        heading_size: 13.0,
        heading_color: 0x000000,
        heading_border: Some(BorderSpec {
            color: 0x000000,
            width: 1.0,
            padding: 3.0,
        }),
    },
    StyleSheet {
        name: StyleName::Creative,
        label: "Creative - Unique & Colorful",
        description: "Purple theme, eye-catching, great for creative roles",
        family: FontFamily::Helvetica,
        title_size: 26.0,
        title_color: 0x7c3aed,
        title_align: Align::Center,
        heading_size: 14.0,
        heading_color: 0x7c3aed,
        heading_border: Some(BorderSpec {
            color: 0xa78bfa,
            width: 2.0,
            padding: 5.0,
        }),
    },
    StyleSheet {
        name: StyleName::Minimal,
        label: "Minimal - Clean & Simple",
        description: "Simple gray tones, maximum readability, ATS-optimized",
        family: FontFamily::Helvetica,
        title_size: 20.0,
        title_color: 0x374151,
        title_align: Align::Left,
        heading_size: 12.0,
        heading_color: 0x374151,
        heading_border: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for name in StyleName::ALL {
            assert_eq!(name.sheet().name, name);
        }
    }

    #[test]
    fn test_parse_style_names() {
        assert_eq!("classic".parse::<StyleName>().unwrap(), StyleName::Classic);
        assert_eq!(" Minimal ".parse::<StyleName>().unwrap(), StyleName::Minimal);
        assert!("baroque".parse::<StyleName>().is_err());
    }

    #[test]
    fn test_default_is_modern() {
        assert_eq!(StyleName::default(), StyleName::Modern);
    }

    #[test]
    fn test_minimal_has_no_border_and_left_title() {
        let sheet = StyleName::Minimal.sheet();
        assert!(sheet.heading_border.is_none());
        assert_eq!(sheet.title_align, Align::Left);
    }

    #[test]
    fn test_classic_is_serif() {
        assert_eq!(StyleName::Classic.sheet().family, FontFamily::Times);
    }
}
