//! CSS color values used by the field and effects layers
//!
//! Colors arrive as CSS strings in the options object and leave as
//! `rgba(...)` strings for the canvas, so the type round-trips through serde
//! as a plain string. Parsing goes through lightningcss, so anything a canvas
//! `fillStyle` accepts (hex, named, `rgb()`, `hsl()`, `hwb()`, `oklch()`)
//! works here too.

use lightningcss::traits::Parse;
use lightningcss::values::color::{CssColor, FloatColor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseColorError {
    #[error("empty color value")]
    Empty,
    #[error("invalid color `{input}`: {reason}")]
    Css { input: String, reason: String },
    /// Parsed, but has no fixed sRGB value (`currentColor`, system colors)
    #[error("color `{0}` has no fixed RGB value")]
    NotRgb(String),
}

/// 8-bit RGB with a floating point alpha in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same RGB, alpha replaced (clamped to [0, 1])
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: clamp_unit(a),
            ..self
        }
    }

    /// Canvas-ready `rgba(r, g, b, a)` string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_css()
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseColorError::Empty);
        }

        let color = CssColor::parse_string(s).map_err(|e| ParseColorError::Css {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        css_color_to_rgba(color).ok_or_else(|| ParseColorError::NotRgb(s.to_string()))
    }
}

/// Resolve any parsed CSS color into sRGB
fn css_color_to_rgba(color: CssColor) -> Option<Rgba> {
    match color.to_rgb().ok()? {
        CssColor::RGBA(c) => Some(Rgba::new(c.red, c.green, c.blue, c.alpha as f64 / 255.0)),
        CssColor::Float(float) => match float.as_ref() {
            // `none` components end up here
            FloatColor::RGB(c) => {
                let channel = |v: f32| (v as f64 * 255.0).round().clamp(0.0, 255.0) as u8;
                Some(Rgba::new(
                    channel(c.r),
                    channel(c.g),
                    channel(c.b),
                    clamp_unit(c.alpha as f64),
                ))
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(c: Rgba, rgb: (u8, u8, u8), a: f64) {
        assert_eq!((c.r, c.g, c.b), rgb, "{c}");
        // alpha is 8-bit after parsing
        assert!((c.a - a).abs() < 1.0 / 255.0, "{c}");
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#FFFFFF".parse::<Rgba>(), Ok(Rgba::WHITE));
        assert_eq!("#6b46c1".parse::<Rgba>(), Ok(Rgba::rgb(0x6B, 0x46, 0xC1)));
        assert_eq!("#fff".parse::<Rgba>(), Ok(Rgba::WHITE));
        approx("#00000080".parse().unwrap(), (0, 0, 0), 128.0 / 255.0);

        assert!(matches!("#12".parse::<Rgba>(), Err(ParseColorError::Css { .. })));
        assert!(matches!("#gggggg".parse::<Rgba>(), Err(ParseColorError::Css { .. })));
    }

    #[test]
    fn test_parse_functional_forms() {
        approx("rgba(255, 255, 255, 0.1)".parse().unwrap(), (255, 255, 255), 0.1);
        assert_eq!("RGB(10,20,30)".parse::<Rgba>(), Ok(Rgba::rgb(10, 20, 30)));
        approx("rgb(255 255 255 / 0.5)".parse().unwrap(), (255, 255, 255), 0.5);
        approx("rgb(255 0 0 / 50%)".parse().unwrap(), (255, 0, 0), 0.5);

        // Out of range channels clamp rather than fail
        assert_eq!("rgba(300, -5, 0, 2)".parse::<Rgba>(), Ok(Rgba::rgb(255, 0, 0)));

        assert!("rgba(1, 2)".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_parse_hsl() {
        assert_eq!("hsl(0, 100%, 50%)".parse::<Rgba>(), Ok(Rgba::rgb(255, 0, 0)));
        assert_eq!("hsl(120deg 100% 50%)".parse::<Rgba>(), Ok(Rgba::rgb(0, 255, 0)));
        approx("hsla(240, 100%, 50%, 0.25)".parse().unwrap(), (0, 0, 255), 0.25);
        // brand purple, give or take rounding
        let c: Rgba = "hsl(260, 50%, 52%)".parse().unwrap();
        assert!(c.b > c.r && c.r > c.g, "{c}");
    }

    #[test]
    fn test_named_and_invalid() {
        assert_eq!("white".parse::<Rgba>(), Ok(Rgba::WHITE));
        assert_eq!("red".parse::<Rgba>(), Ok(Rgba::rgb(255, 0, 0)));
        assert_eq!("RebeccaPurple".parse::<Rgba>(), Ok(Rgba::rgb(0x66, 0x33, 0x99)));
        assert_eq!(" transparent ".parse::<Rgba>(), Ok(Rgba::TRANSPARENT));
        assert_eq!("".parse::<Rgba>(), Err(ParseColorError::Empty));
        assert!(matches!("chartreuse-ish".parse::<Rgba>(), Err(ParseColorError::Css { .. })));
        assert!(matches!("currentColor".parse::<Rgba>(), Err(ParseColorError::NotRgb(_))));
    }

    #[test]
    fn test_css_output_and_alpha_override() {
        assert_eq!(Rgba::WHITE.with_alpha(0.4).to_css(), "rgba(255, 255, 255, 0.4)");
        assert_eq!(Rgba::WHITE.with_alpha(7.0).a, 1.0);
        assert_eq!(Rgba::WHITE.with_alpha(f64::NAN).a, 0.0);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Rgba::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, r#""rgba(1, 2, 3, 1)""#);

        let back: Rgba = serde_json::from_str(r##""#010203""##).unwrap();
        assert_eq!(back, Rgba::rgb(1, 2, 3));

        assert!(serde_json::from_str::<Rgba>(r#""nope""#).is_err());
    }
}
