use crate::app::config::PadConfig;
use crate::app::domain::color::Rgb;
use crate::app::domain::settings::{EditorFont, FontStyle, LocaleTag, SettingField, SettingValue, Theme};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::platform::{Platform, detect_system_dark_mode};

/// Supplies the value a setting falls back to when nothing valid is stored.
pub trait SettingsDefaults {
    fn available_locales(&self) -> &[LocaleTag];

    fn default_locale(&self) -> LocaleTag;

    fn default_theme(&self) -> Theme;

    fn default_editor_font(&self) -> EditorFont;

    fn default_editor_foreground(&self) -> Option<Rgb>;

    fn default_editor_background(&self) -> Option<Rgb>;

    fn default_value(&self, field: SettingField) -> SettingValue {
        match field {
            SettingField::Locale => SettingValue::Locale(self.default_locale()),
            SettingField::Theme => SettingValue::Theme(self.default_theme()),
            SettingField::EditorFontFamily => {
                SettingValue::EditorFontFamily(self.default_editor_font().family)
            }
            SettingField::EditorFontStyle => {
                SettingValue::EditorFontStyle(self.default_editor_font().style)
            }
            SettingField::EditorFontSize => {
                SettingValue::EditorFontSize(self.default_editor_font().size)
            }
            SettingField::EditorForeground => {
                SettingValue::EditorForeground(self.default_editor_foreground())
            }
            SettingField::EditorBackground => {
                SettingValue::EditorBackground(self.default_editor_background())
            }
        }
    }
}

/// Defaults computed once at startup from the config and the desktop.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDefaults {
    pub available_locales: Vec<LocaleTag>,
    pub locale: LocaleTag,
    pub theme: Theme,
    pub editor_font: EditorFont,
    pub editor_foreground: Option<Rgb>,
    pub editor_background: Option<Rgb>,
}

impl PlatformDefaults {
    pub fn from_config(config: &PadConfig) -> Result<Self> {
        config.validate()?;

        let platform = Platform::current();
        let theme = config.default_theme.unwrap_or_else(|| {
            if detect_system_dark_mode() {
                Theme::Dark
            } else {
                Theme::Light
            }
        });
        let editor_font = EditorFont::new(
            platform.monospace_font_family(),
            FontStyle::Plain,
            config.default_font_size,
        );

        tracing::info!(
            "Computed defaults: locale={}, theme={}, font={}",
            config.default_locale,
            theme,
            editor_font
        );

        Ok(Self {
            available_locales: config.available_locales.clone(),
            locale: config.default_locale.clone(),
            theme,
            editor_font,
            // No color means the theme decides.
            editor_foreground: None,
            editor_background: None,
        })
    }
}

impl SettingsDefaults for PlatformDefaults {
    fn available_locales(&self) -> &[LocaleTag] {
        &self.available_locales
    }

    fn default_locale(&self) -> LocaleTag {
        self.locale.clone()
    }

    fn default_theme(&self) -> Theme {
        self.theme
    }

    fn default_editor_font(&self) -> EditorFont {
        self.editor_font.clone()
    }

    fn default_editor_foreground(&self) -> Option<Rgb> {
        self.editor_foreground
    }

    fn default_editor_background(&self) -> Option<Rgb> {
        self.editor_background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;

    #[test]
    fn test_from_config_uses_configured_theme() {
        let config = PadConfig {
            default_theme: Some(Theme::Dark),
            default_font_size: 15,
            ..Default::default()
        };
        let defaults = PlatformDefaults::from_config(&config).unwrap();
        assert_eq!(defaults.default_theme(), Theme::Dark);
        assert_eq!(defaults.default_editor_font().size, 15);
        assert_eq!(defaults.default_editor_font().style, FontStyle::Plain);
        assert_eq!(
            defaults.default_editor_font().family,
            Platform::current().monospace_font_family()
        );
        assert_eq!(defaults.default_locale().as_str(), "en");
        assert_eq!(defaults.default_editor_foreground(), None);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = PadConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(PlatformDefaults::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_rejects_font_size_outside_range() {
        for size in [0, 500] {
            let config = PadConfig {
                default_font_size: size,
                ..Default::default()
            };
            let err = PlatformDefaults::from_config(&config).unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        }
    }

    #[test]
    fn test_every_default_value_is_valid() {
        let config = PadConfig {
            default_font_size: 4,
            ..Default::default()
        };
        let defaults = PlatformDefaults::from_config(&config).unwrap();
        for field in SettingField::ALL {
            assert!(
                defaults
                    .default_value(field)
                    .validate(defaults.available_locales())
                    .is_ok()
            );
        }
    }

    #[test]
    fn test_default_value_per_field() {
        let config = PadConfig {
            default_theme: Some(Theme::Light),
            ..Default::default()
        };
        let defaults = PlatformDefaults::from_config(&config).unwrap();
        for field in SettingField::ALL {
            assert_eq!(defaults.default_value(field).field(), field);
        }
        assert_eq!(
            defaults.default_value(SettingField::Theme),
            SettingValue::Theme(Theme::Light)
        );
        assert_eq!(
            defaults.default_value(SettingField::EditorFontSize),
            SettingValue::EditorFontSize(12)
        );
    }
}
