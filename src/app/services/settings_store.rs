//! User settings layered over computed defaults.
//!
//! Reads are lenient: a missing, unparsable or out-of-domain stored value
//! resolves to the default and is logged, so a damaged preferences file never
//! keeps the editor from starting. Writes are strict: an invalid value is
//! rejected with `InvalidArgument` and nothing is stored. Every successful
//! write publishes exactly one change notification.

use std::rc::Rc;

use super::defaults::{PlatformDefaults, SettingsDefaults};
use super::notifier::{ChangeNotifier, SettingsListener};
use crate::app::domain::color::{self, Rgb};
use crate::app::domain::settings::{
    EditorFont, FontStyle, LocaleTag, SettingField, SettingValue, Theme,
};
use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::preferences::{JsonPreferences, PrefValue, PreferenceBackend};

pub struct SettingsStore<B = JsonPreferences, D = PlatformDefaults> {
    backend: B,
    defaults: D,
    notifier: ChangeNotifier,
}

impl<B: PreferenceBackend, D: SettingsDefaults> SettingsStore<B, D> {
    pub fn new(backend: B, defaults: D) -> Self {
        Self {
            backend,
            defaults,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn defaults(&self) -> &D {
        &self.defaults
    }

    pub fn available_locales(&self) -> &[LocaleTag] {
        self.defaults.available_locales()
    }

    // --- Reads ---

    /// Resolve `field`: the stored value if present and valid, else the default.
    pub fn get(&self, field: SettingField) -> SettingValue {
        tracing::trace!("Resolving {}", field);
        let value = self
            .stored(field)
            .unwrap_or_else(|| self.defaults.default_value(field));
        tracing::debug!("{} resolved to {}", field, value);
        value
    }

    pub fn locale(&self) -> LocaleTag {
        match self.get(SettingField::Locale) {
            SettingValue::Locale(locale) => locale,
            _ => self.defaults.default_locale(),
        }
    }

    pub fn theme(&self) -> Theme {
        match self.get(SettingField::Theme) {
            SettingValue::Theme(theme) => theme,
            _ => self.defaults.default_theme(),
        }
    }

    pub fn editor_font_family(&self) -> String {
        match self.get(SettingField::EditorFontFamily) {
            SettingValue::EditorFontFamily(family) => family,
            _ => self.defaults.default_editor_font().family,
        }
    }

    pub fn editor_font_style(&self) -> FontStyle {
        match self.get(SettingField::EditorFontStyle) {
            SettingValue::EditorFontStyle(style) => style,
            _ => self.defaults.default_editor_font().style,
        }
    }

    pub fn editor_font_size(&self) -> u32 {
        match self.get(SettingField::EditorFontSize) {
            SettingValue::EditorFontSize(size) => size,
            _ => self.defaults.default_editor_font().size,
        }
    }

    pub fn editor_font(&self) -> EditorFont {
        EditorFont::new(
            self.editor_font_family(),
            self.editor_font_style(),
            self.editor_font_size(),
        )
    }

    pub fn editor_foreground(&self) -> Option<Rgb> {
        match self.get(SettingField::EditorForeground) {
            SettingValue::EditorForeground(color) => color,
            _ => self.defaults.default_editor_foreground(),
        }
    }

    pub fn editor_background(&self) -> Option<Rgb> {
        match self.get(SettingField::EditorBackground) {
            SettingValue::EditorBackground(color) => color,
            _ => self.defaults.default_editor_background(),
        }
    }

    // --- Writes ---

    /// Validate and persist `value`, then notify listeners once.
    pub fn set(&mut self, value: SettingValue) -> Result<()> {
        let field = value.field();
        tracing::trace!("Setting {} to {}", field, value);
        if let Err(e) = value.validate(self.defaults.available_locales()) {
            tracing::error!("Rejected {} for {}: {}", value, field, e);
            return Err(e);
        }

        self.backend.put(field.key(), encode(&value))?;
        tracing::info!("{} set to {}", field, value);
        self.notifier.publish();
        Ok(())
    }

    /// Parse user input for `field` and store it.
    pub fn set_from_str(&mut self, field: SettingField, raw: &str) -> Result<()> {
        let value = SettingValue::parse(field, raw)?;
        self.set(value)
    }

    pub fn set_locale(&mut self, locale: LocaleTag) -> Result<()> {
        self.set(SettingValue::Locale(locale))
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.set(SettingValue::Theme(theme))
    }

    pub fn set_editor_font_family(&mut self, family: impl Into<String>) -> Result<()> {
        self.set(SettingValue::EditorFontFamily(family.into()))
    }

    pub fn set_editor_font_style(&mut self, style: FontStyle) -> Result<()> {
        self.set(SettingValue::EditorFontStyle(style))
    }

    pub fn set_editor_font_size(&mut self, size: u32) -> Result<()> {
        self.set(SettingValue::EditorFontSize(size))
    }

    /// Store all three font fields together; one notification.
    pub fn set_editor_font(&mut self, font: EditorFont) -> Result<()> {
        tracing::trace!("Setting editor font to {}", font);
        let values = [
            SettingValue::EditorFontFamily(font.family.clone()),
            SettingValue::EditorFontStyle(font.style),
            SettingValue::EditorFontSize(font.size),
        ];
        for value in &values {
            value.validate(self.defaults.available_locales())?;
        }

        let entries: Vec<(&str, PrefValue)> = values
            .iter()
            .map(|value| (value.field().key(), encode(value)))
            .collect();
        self.backend.put_all(&entries)?;
        tracing::info!("Editor font set to {}", font);
        self.notifier.publish();
        Ok(())
    }

    /// `None` is stored as no color and reads back as the default foreground.
    pub fn set_editor_foreground(&mut self, color: Option<Rgb>) -> Result<()> {
        self.set(SettingValue::EditorForeground(color))
    }

    /// `None` is stored as no color and reads back as the default background.
    pub fn set_editor_background(&mut self, color: Option<Rgb>) -> Result<()> {
        self.set(SettingValue::EditorBackground(color))
    }

    // --- Resets ---

    /// Store the default for `field` and notify listeners once.
    pub fn reset(&mut self, field: SettingField) -> Result<()> {
        tracing::trace!("Resetting {} to default", field);
        let default = self.defaults.default_value(field);
        self.backend.put(field.key(), encode(&default))?;
        tracing::info!("{} reset to default: {}", field, default);
        self.notifier.publish();
        Ok(())
    }

    /// Reset the three font fields, notifying after each.
    pub fn reset_editor_font(&mut self) -> Result<()> {
        for field in [
            SettingField::EditorFontFamily,
            SettingField::EditorFontStyle,
            SettingField::EditorFontSize,
        ] {
            self.reset(field)?;
        }
        Ok(())
    }

    /// Reset every field in `SettingField::ALL` order, one notification per
    /// field so listeners can follow along.
    pub fn reset_all(&mut self) -> Result<()> {
        tracing::trace!("Resetting all settings to default");
        for field in SettingField::ALL {
            self.reset(field)?;
        }
        tracing::info!("All settings reset to default");
        Ok(())
    }

    // --- Listeners ---

    pub fn subscribe(&self, listener: Rc<dyn SettingsListener>) -> bool {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, listener: &Rc<dyn SettingsListener>) -> bool {
        self.notifier.unsubscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.len()
    }

    fn stored(&self, field: SettingField) -> Option<SettingValue> {
        let raw = self.backend.get(field.key())?;
        let decoded = decode(field, &raw, &self.defaults);
        match decoded {
            Some(value) => match value.validate(self.defaults.available_locales()) {
                Ok(()) => Some(value),
                Err(e) => {
                    tracing::warn!("Stored {} is not usable ({}), using default", field, e);
                    None
                }
            },
            None => {
                tracing::warn!("Stored {} could not be read ({:?}), using default", field, raw);
                None
            }
        }
    }
}

fn encode(value: &SettingValue) -> PrefValue {
    match value {
        SettingValue::Locale(locale) => PrefValue::from(locale.as_str()),
        SettingValue::Theme(theme) => PrefValue::from(theme.key()),
        SettingValue::EditorFontFamily(family) => PrefValue::from(family.as_str()),
        SettingValue::EditorFontStyle(style) => PrefValue::Int(style.code()),
        SettingValue::EditorFontSize(size) => PrefValue::Int(i64::from(*size)),
        SettingValue::EditorForeground(c) | SettingValue::EditorBackground(c) => {
            PrefValue::from(color::encode(*c))
        }
    }
}

fn decode(field: SettingField, raw: &PrefValue, defaults: &impl SettingsDefaults) -> Option<SettingValue> {
    let value = match field {
        SettingField::Locale => SettingValue::Locale(LocaleTag::new(raw.as_str()?).ok()?),
        SettingField::Theme => SettingValue::Theme(raw.as_str()?.parse().ok()?),
        SettingField::EditorFontFamily => SettingValue::EditorFontFamily(raw.as_str()?.to_string()),
        SettingField::EditorFontStyle => SettingValue::EditorFontStyle(FontStyle::from_code(raw.as_int()?)?),
        SettingField::EditorFontSize => SettingValue::EditorFontSize(u32::try_from(raw.as_int()?).ok()?),
        SettingField::EditorForeground => SettingValue::EditorForeground(color::decode(
            raw.as_str()?,
            defaults.default_editor_foreground(),
        )),
        SettingField::EditorBackground => SettingValue::EditorBackground(color::decode(
            raw.as_str()?,
            defaults.default_editor_background(),
        )),
    };
    Some(value)
}
