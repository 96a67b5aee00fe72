//! Partial settings read back from storage, and the default-merge.
//!
//! # Why a separate partial type? (for beginners)
//!
//! A settings file written by an older plugin version does not know about
//! fields added later.  A hand-edited file may contain a typo such as
//! `"autoRefreshInterval": "sixty"`.  Neither should cost the user the rest of
//! their settings.
//!
//! [`SettingsOverrides`] therefore makes every field optional and
//! deserializes each one on its own: a missing key, a `null`, or a value of
//! the wrong type simply becomes `None`.  [`merge`] then walks the fields one
//! by one and takes the override when it is present and valid, otherwise the
//! default.  This is the only schema-evolution mechanism; there are no
//! migration steps.
//!
//! ```text
//! persisted {autoRefreshInterval: 120}
//!        +
//! defaults  {fadeToggle: true, autoRefreshInterval: 60, ...}
//!        =
//! result    {fadeToggle: true, autoRefreshInterval: 120, ...}
//! ```

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::settings::{validate_appended_date_format, validate_auto_refresh_interval, Settings};

/// Settings fields recovered from storage.  `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    #[serde(default, deserialize_with = "lenient")]
    pub fade_toggle: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub auto_refresh_toggle: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub auto_refresh_interval: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_heading: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_description: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_date: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_date_icon: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_append_date: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub appended_date_format: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_project: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_project_icon: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_labels: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub render_labels_icon: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub debug_logging: Option<bool>,
}

impl SettingsOverrides {
    /// Returns `true` when no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Accepts a value of type `T`, or anything else as "absent".
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Other(IgnoredAny),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(v) => Some(v),
        Lenient::Other(_) => None,
    })
}

/// Overlays `overrides` onto `defaults`, one field at a time.
///
/// An override that would break a field constraint (interval `0`, blank date
/// format) is dropped and the default kept, so the result always passes
/// [`Settings::validate`] when `defaults` does.
pub fn merge(defaults: Settings, overrides: SettingsOverrides) -> Settings {
    let auto_refresh_interval = match overrides.auto_refresh_interval {
        Some(v) if validate_auto_refresh_interval(v).is_ok() => v,
        Some(v) => {
            warn!("ignoring persisted autoRefreshInterval {v}; using {}", defaults.auto_refresh_interval);
            defaults.auto_refresh_interval
        }
        None => defaults.auto_refresh_interval,
    };

    let appended_date_format = match overrides.appended_date_format {
        Some(v) if validate_appended_date_format(&v).is_ok() => v,
        Some(_) => {
            warn!("ignoring blank persisted appendedDateFormat");
            defaults.appended_date_format
        }
        None => defaults.appended_date_format,
    };

    Settings {
        fade_toggle: overrides.fade_toggle.unwrap_or(defaults.fade_toggle),
        auto_refresh_toggle: overrides
            .auto_refresh_toggle
            .unwrap_or(defaults.auto_refresh_toggle),
        auto_refresh_interval,
        render_heading: overrides.render_heading.unwrap_or(defaults.render_heading),
        render_description: overrides
            .render_description
            .unwrap_or(defaults.render_description),
        render_date: overrides.render_date.unwrap_or(defaults.render_date),
        render_date_icon: overrides
            .render_date_icon
            .unwrap_or(defaults.render_date_icon),
        render_append_date: overrides
            .render_append_date
            .unwrap_or(defaults.render_append_date),
        appended_date_format,
        render_project: overrides.render_project.unwrap_or(defaults.render_project),
        render_project_icon: overrides
            .render_project_icon
            .unwrap_or(defaults.render_project_icon),
        render_labels: overrides.render_labels.unwrap_or(defaults.render_labels),
        render_labels_icon: overrides
            .render_labels_icon
            .unwrap_or(defaults.render_labels_icon),
        debug_logging: overrides.debug_logging.unwrap_or(defaults.debug_logging),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
