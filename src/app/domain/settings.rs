use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::color::Rgb;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::platform::Platform;

pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 4..=144;

/// One independently resettable unit of user-configurable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    Locale,
    Theme,
    EditorFontFamily,
    EditorFontStyle,
    EditorFontSize,
    EditorForeground,
    EditorBackground,
}

impl SettingField {
    /// Every field, in reset order.
    pub const ALL: [SettingField; 7] = [
        Self::Locale,
        Self::Theme,
        Self::EditorFontFamily,
        Self::EditorFontStyle,
        Self::EditorFontSize,
        Self::EditorForeground,
        Self::EditorBackground,
    ];

    /// Key under which the raw value is persisted.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Locale => "locale",
            Self::Theme => "theme",
            Self::EditorFontFamily => "editor_font_family",
            Self::EditorFontStyle => "editor_font_style",
            Self::EditorFontSize => "editor_font_size",
            Self::EditorForeground => "editor_foreground",
            Self::EditorBackground => "editor_background",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SettingField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| AppError::invalid(format!("unknown setting '{s}'")))
    }
}

/// Look-and-feel choices the editor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
    WindowsModern,
    WindowsClassic,
    MacOs,
    LinuxGtk,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &[
            Self::Light,
            Self::Dark,
            Self::WindowsModern,
            Self::WindowsClassic,
            Self::MacOs,
            Self::LinuxGtk,
        ]
    }

    /// Stable identifier, used when persisting.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::WindowsModern => "windows-modern",
            Self::WindowsClassic => "windows-classic",
            Self::MacOs => "mac-os",
            Self::LinuxGtk => "linux-gtk",
        }
    }

    /// Message key of the localized display name.
    pub fn message_key(&self) -> String {
        format!("theme.{}.name", self.key())
    }

    /// `None` for themes available everywhere.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Self::Light | Self::Dark => None,
            Self::WindowsModern | Self::WindowsClassic => Some(Platform::Windows),
            Self::MacOs => Some(Platform::MacOs),
            Self::LinuxGtk => Some(Platform::Linux),
        }
    }

    pub fn multiplatform() -> Vec<Theme> {
        Self::all()
            .iter()
            .copied()
            .filter(|t| t.platform().is_none())
            .collect()
    }

    pub fn native_for(platform: Platform) -> Vec<Theme> {
        Self::all()
            .iter()
            .copied()
            .filter(|t| t.platform() == Some(platform))
            .collect()
    }

    /// Multiplatform themes followed by the platform's native ones.
    pub fn supported_on(platform: Platform) -> Vec<Theme> {
        let mut themes = Self::multiplatform();
        themes.extend(Self::native_for(platform));
        themes
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::invalid(format!("unknown theme '{s}'")))
    }
}

/// Font style, persisted as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn code(&self) -> i64 {
        match self {
            Self::Plain => 0,
            Self::Bold => 1,
            Self::Italic => 2,
            Self::BoldItalic => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Plain),
            1 => Some(Self::Bold),
            2 => Some(Self::Italic),
            3 => Some(Self::BoldItalic),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::BoldItalic => "bold-italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        if let Ok(code) = wanted.parse::<i64>() {
            return Self::from_code(code)
                .ok_or_else(|| AppError::invalid(format!("unknown font style code {code}")));
        }
        [Self::Plain, Self::Bold, Self::Italic, Self::BoldItalic]
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::invalid(format!("unknown font style '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorFont {
    pub family: String,
    pub style: FontStyle,
    pub size: u32,
}

impl EditorFont {
    pub fn new(family: impl Into<String>, style: FontStyle, size: u32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
        }
    }
}

impl fmt::Display for EditorFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}pt", self.family, self.style, self.size)
    }
}

/// A language tag such as `en` or `pt-BR`, kept in canonical case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn new(tag: &str) -> Result<Self> {
        let mut subtags = tag.trim().split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::invalid(format!("invalid locale tag '{tag}'")));
        }

        let mut canonical = language.to_ascii_lowercase();
        for subtag in subtags {
            if subtag.is_empty() || !subtag.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(AppError::invalid(format!("invalid locale tag '{tag}'")));
            }
            canonical.push('-');
            if subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                canonical.push_str(&subtag.to_ascii_uppercase());
            } else {
                canonical.push_str(subtag);
            }
        }
        Ok(Self(canonical))
    }

    /// Wrap a tag that is already in canonical form.
    pub(crate) fn canonical(tag: &str) -> Self {
        Self(tag.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleTag {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

impl From<LocaleTag> for String {
    fn from(tag: LocaleTag) -> Self {
        tag.0
    }
}

/// A typed value for one `SettingField`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Locale(LocaleTag),
    Theme(Theme),
    EditorFontFamily(String),
    EditorFontStyle(FontStyle),
    EditorFontSize(u32),
    EditorForeground(Option<Rgb>),
    EditorBackground(Option<Rgb>),
}

impl SettingValue {
    pub fn field(&self) -> SettingField {
        match self {
            Self::Locale(_) => SettingField::Locale,
            Self::Theme(_) => SettingField::Theme,
            Self::EditorFontFamily(_) => SettingField::EditorFontFamily,
            Self::EditorFontStyle(_) => SettingField::EditorFontStyle,
            Self::EditorFontSize(_) => SettingField::EditorFontSize,
            Self::EditorForeground(_) => SettingField::EditorForeground,
            Self::EditorBackground(_) => SettingField::EditorBackground,
        }
    }

    /// Parse user input for `field`. Colors accept `R,G,B`, or `none`/empty
    /// for no color.
    pub fn parse(field: SettingField, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let value = match field {
            SettingField::Locale => Self::Locale(raw.parse()?),
            SettingField::Theme => Self::Theme(raw.parse()?),
            SettingField::EditorFontFamily => Self::EditorFontFamily(raw.to_string()),
            SettingField::EditorFontStyle => Self::EditorFontStyle(raw.parse()?),
            SettingField::EditorFontSize => Self::EditorFontSize(raw.parse().map_err(|_| {
                AppError::invalid(format!("font size must be a whole number, got '{raw}'"))
            })?),
            SettingField::EditorForeground => Self::EditorForeground(parse_optional_color(raw)?),
            SettingField::EditorBackground => Self::EditorBackground(parse_optional_color(raw)?),
        };
        Ok(value)
    }

    /// Check the value against its kind's domain.
    pub fn validate(&self, available_locales: &[LocaleTag]) -> Result<()> {
        match self {
            Self::Locale(locale) if !available_locales.contains(locale) => {
                Err(AppError::invalid(format!("unsupported locale: {locale}")))
            }
            Self::EditorFontFamily(family) if family.trim().is_empty() => {
                Err(AppError::invalid("font family must not be empty"))
            }
            Self::EditorFontSize(size) if !FONT_SIZE_RANGE.contains(size) => Err(AppError::invalid(
                format!(
                    "font size {size} is outside {}..={}",
                    FONT_SIZE_RANGE.start(),
                    FONT_SIZE_RANGE.end()
                ),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locale(locale) => write!(f, "{locale}"),
            Self::Theme(theme) => write!(f, "{theme}"),
            Self::EditorFontFamily(family) => f.write_str(family),
            Self::EditorFontStyle(style) => write!(f, "{style}"),
            Self::EditorFontSize(size) => write!(f, "{size}"),
            Self::EditorForeground(color) | Self::EditorBackground(color) => match color {
                Some(c) => write!(f, "{c}"),
                None => f.write_str("none"),
            },
        }
    }
}

fn parse_optional_color(raw: &str) -> Result<Option<Rgb>> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    raw.parse::<Rgb>().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::color;

    fn locales() -> Vec<LocaleTag> {
        ["en", "fr"].iter().map(|t| LocaleTag::new(t).unwrap()).collect()
    }

    #[test]
    fn test_field_keys_are_fixed() {
        let keys: Vec<&str> = SettingField::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec![
                "locale",
                "theme",
                "editor_font_family",
                "editor_font_style",
                "editor_font_size",
                "editor_foreground",
                "editor_background",
            ]
        );
    }

    #[test]
    fn test_field_from_str_accepts_dashes() {
        assert_eq!(
            "editor-font-size".parse::<SettingField>().unwrap(),
            SettingField::EditorFontSize
        );
        assert_eq!("theme".parse::<SettingField>().unwrap(), SettingField::Theme);
        assert!("colour".parse::<SettingField>().is_err());
    }

    #[test]
    fn test_theme_platforms() {
        assert_eq!(Theme::multiplatform(), vec![Theme::Light, Theme::Dark]);
        assert_eq!(
            Theme::native_for(Platform::Windows),
            vec![Theme::WindowsModern, Theme::WindowsClassic]
        );
        assert_eq!(Theme::native_for(Platform::MacOs), vec![Theme::MacOs]);
        assert_eq!(Theme::native_for(Platform::Linux), vec![Theme::LinuxGtk]);
        assert!(Theme::native_for(Platform::Other).is_empty());
        assert_eq!(
            Theme::supported_on(Platform::Windows),
            vec![Theme::Light, Theme::Dark, Theme::WindowsModern, Theme::WindowsClassic]
        );
    }

    #[test]
    fn test_theme_keys_round_trip() {
        for theme in Theme::all() {
            assert_eq!(theme.key().parse::<Theme>().unwrap(), *theme);
        }
        assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Light.message_key(), "theme.light.name");
        assert!("FLATLAF_DARK".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_serde_uses_keys() {
        let json = serde_json::to_string(&Theme::WindowsClassic).unwrap();
        assert_eq!(json, "\"windows-classic\"");
    }

    #[test]
    fn test_font_style_codes() {
        for code in 0..4 {
            assert_eq!(FontStyle::from_code(code).unwrap().code(), code);
        }
        assert_eq!(FontStyle::from_code(4), None);
        assert_eq!("bold-italic".parse::<FontStyle>().unwrap(), FontStyle::BoldItalic);
        assert_eq!("1".parse::<FontStyle>().unwrap(), FontStyle::Bold);
        assert!("9".parse::<FontStyle>().is_err());
    }

    #[test]
    fn test_locale_tag_canonical_form() {
        assert_eq!(LocaleTag::new("pt_br").unwrap().as_str(), "pt-BR");
        assert_eq!(LocaleTag::new("EN").unwrap().as_str(), "en");
        assert!(LocaleTag::new("").is_err());
        assert!(LocaleTag::new("e").is_err());
        assert!(LocaleTag::new("en-").is_err());
        assert!(LocaleTag::new("12").is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(
            SettingValue::parse(SettingField::EditorFontSize, "14").unwrap(),
            SettingValue::EditorFontSize(14)
        );
        assert_eq!(
            SettingValue::parse(SettingField::EditorBackground, "none").unwrap(),
            SettingValue::EditorBackground(None)
        );
        assert_eq!(
            SettingValue::parse(SettingField::EditorForeground, "255,0,0").unwrap(),
            SettingValue::EditorForeground(Some(Rgb::new(255, 0, 0)))
        );
        assert!(SettingValue::parse(SettingField::EditorFontSize, "big").is_err());
        assert!(SettingValue::parse(SettingField::EditorForeground, "1,2").is_err());
        assert!(SettingValue::parse(SettingField::Theme, "sepia").is_err());
    }

    #[test]
    fn test_validate() {
        let available = locales();
        assert!(SettingValue::Locale(LocaleTag::new("fr").unwrap()).validate(&available).is_ok());
        assert!(SettingValue::Locale(LocaleTag::new("it").unwrap()).validate(&available).is_err());
        assert!(SettingValue::EditorFontFamily("  ".into()).validate(&available).is_err());
        assert!(SettingValue::EditorFontSize(3).validate(&available).is_err());
        assert!(SettingValue::EditorFontSize(12).validate(&available).is_ok());
        assert!(SettingValue::EditorForeground(None).validate(&available).is_ok());
    }

    #[test]
    fn test_display_matches_parse() {
        let value = SettingValue::EditorFontStyle(FontStyle::Italic);
        let shown = value.to_string();
        assert_eq!(SettingValue::parse(SettingField::EditorFontStyle, &shown).unwrap(), value);
        assert_eq!(color::encode(color::decode("9,9,9", None)), "9,9,9");
    }
}
