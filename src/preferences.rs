//! Persisted user preferences.
//!
//! Only the theme is stored today, under the `theme` key of the
//! `user_preferences` table. Reads happen once at startup; writes happen on
//! every toggle and never block the UI.
use crate::storage::{Database, DatabaseError};
use crate::theme::ThemeVariant;

/// Preference key holding `"dark"` or `"light"`.
pub const THEME_KEY: &str = "theme";

/// Read the stored theme. Absent, unreadable or unrecognised values give Light.
pub async fn load_theme(db: &Database) -> ThemeVariant {
    match db.get_preference(THEME_KEY).await {
        Ok(Some(value)) => ThemeVariant::from_str_name(&value).unwrap_or_else(|| {
            tracing::warn!(value = %value, "Ignoring unknown stored theme");
            ThemeVariant::default()
        }),
        Ok(None) => ThemeVariant::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read theme preference");
            ThemeVariant::default()
        }
    }
}

/// Persist the theme choice.
pub async fn save_theme(db: &Database, variant: ThemeVariant) -> Result<(), DatabaseError> {
    db.set_preference(THEME_KEY, variant.as_pref_value()).await?;
    tracing::debug!(theme = variant.as_pref_value(), "Saved theme preference");
    Ok(())
}

/// Forget every stored preference (`--reset-preferences`).
pub async fn reset(db: &Database) -> Result<(), DatabaseError> {
    let removed = db.clear_preferences().await?;
    tracing::info!(removed, "Reset stored preferences");
    Ok(())
}
