//! App settings repository
//!
//! The settings collection holds a single document under a fixed key.

use serde_json::Value;
use wafr_model::{AppSettings, Entity};

use crate::error::Result;
use crate::plane::{Collection, DataPlane};
use crate::repos::text_column;

/// Fixed key of the singleton settings document
const SETTINGS_KEY: &str = "app";

/// Settings repository
pub struct SettingsRepo<'a> {
    plane: &'a DataPlane,
}

impl<'a> SettingsRepo<'a> {
    pub(crate) fn new(plane: &'a DataPlane) -> Self {
        Self { plane }
    }

    /// The current settings; defaults when never written
    pub async fn get(&self) -> Result<AppSettings> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query("SELECT data FROM settings WHERE id = ?1", [SETTINGS_KEY])
            .await?;

        match rows.next().await? {
            Some(row) => {
                let value: Value = serde_json::from_str(&text_column(&row, 0)?)?;
                Ok(AppSettings::decode(SETTINGS_KEY, &value)?)
            }
            None => Ok(AppSettings::default()),
        }
    }

    /// Replace the settings document
    pub async fn put(&self, settings: &AppSettings) -> Result<()> {
        let data = serde_json::to_string(settings)?;
        let conn = self.plane.db().connect()?;

        let updated = conn
            .execute(
                "UPDATE settings SET data = ?2 WHERE id = ?1",
                [SETTINGS_KEY, data.as_str()],
            )
            .await?;
        if updated == 0 {
            conn.execute(
                "INSERT INTO settings (id, data) VALUES (?1, ?2)",
                [SETTINGS_KEY, data.as_str()],
            )
            .await?;
        }

        self.plane.publish(Collection::Settings, SETTINGS_KEY);
        Ok(())
    }
}
