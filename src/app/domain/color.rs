//! RGB colors and their `"R,G,B"` text form.

use std::fmt;
use std::str::FromStr;

use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_components(s).ok_or_else(|| {
            AppError::invalid(format!("invalid color '{s}', expected format is 'R,G,B'"))
        })
    }
}

/// Encode a color; `None` (no color set) encodes as the empty string.
pub fn encode(color: Option<Rgb>) -> String {
    color.map(|c| c.to_string()).unwrap_or_default()
}

/// Decode a color, degrading to `default` for anything that isn't three
/// comma-separated integers in 0..=255.
pub fn decode(s: &str, default: Option<Rgb>) -> Option<Rgb> {
    if s.is_empty() {
        tracing::debug!("Color string is empty, using default color: {:?}", default);
        return default;
    }
    match parse_components(s) {
        Some(color) => Some(color),
        None => {
            tracing::warn!(
                "Invalid color format: '{}'. Expected format is 'R,G,B'. Using default color: {:?}",
                s,
                default
            );
            default
        }
    }
}

fn parse_components(s: &str) -> Option<Rgb> {
    let mut parts = s.split(',');
    let r = parts.next()?.trim().parse().ok()?;
    let g = parts.next()?.trim().parse().ok()?;
    let b = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(Some(Rgb::new(123, 45, 67))), "123,45,67");
        assert_eq!(encode(None), "");
    }

    #[test]
    fn test_decode_valid() {
        assert_eq!(decode("123,45,67", Some(Rgb::BLACK)), Some(Rgb::new(123, 45, 67)));
        assert_eq!(decode(" 1, 2 ,3 ", None), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_decode_falls_back() {
        let default = Some(Rgb::BLACK);
        assert_eq!(decode("", default), default);
        assert_eq!(decode("123,45", default), default);
        assert_eq!(decode("1,2,3,4", default), default);
        assert_eq!(decode("red,green,blue", default), default);
        assert_eq!(decode("256,0,0", default), default);
        assert_eq!(decode("-1,0,0", default), default);
        assert_eq!(decode("1,2", None), None);
    }

    #[test]
    fn test_round_trip_law() {
        let defaults = [None, Some(Rgb::WHITE)];
        for r in (0..=255u8).step_by(15) {
            for g in [0u8, 128, 255] {
                for b in [0u8, 7, 255] {
                    let c = Rgb::new(r, g, b);
                    for d in defaults {
                        assert_eq!(decode(&encode(Some(c)), d), Some(c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_str_rejects_malformed() {
        assert_eq!("0,128,255".parse::<Rgb>().unwrap(), Rgb::new(0, 128, 255));
        let err = "0,128".parse::<Rgb>().unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
