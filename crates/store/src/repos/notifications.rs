//! Notification repository

use serde_json::Value;
use wafr_model::{Entity, Notification};

use crate::error::{Result, StoreError};
use crate::plane::{Collection, DataPlane};
use crate::repos::text_column;

/// Notification repository
pub struct NotificationRepo<'a> {
    plane: &'a DataPlane,
}

impl<'a> NotificationRepo<'a> {
    pub(crate) fn new(plane: &'a DataPlane) -> Self {
        Self { plane }
    }

    /// Create a notification
    pub async fn create(&self, note: &Notification) -> Result<()> {
        let data = serde_json::to_string(note)?;
        let created_at = note.created_at.to_rfc3339();
        let conn = self.plane.db().connect()?;

        let params = [
            note.id.as_str(),
            note.device_id.as_str(),
            created_at.as_str(),
            data.as_str(),
        ];
        let updated = conn
            .execute(
                "UPDATE notifications SET device_id = ?2, created_at = ?3, data = ?4 \
                 WHERE id = ?1",
                params,
            )
            .await?;
        if updated == 0 {
            conn.execute(
                "INSERT INTO notifications (id, device_id, created_at, data) \
                 VALUES (?1, ?2, ?3, ?4)",
                params,
            )
            .await?;
        }

        self.plane.publish(Collection::Notifications, &note.id);
        Ok(())
    }

    /// Get a notification by id
    pub async fn get(&self, id: &str) -> Result<Option<Notification>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query("SELECT id, data FROM notifications WHERE id = ?1", [id])
            .await?;

        match rows.next().await? {
            Some(row) => {
                let id = text_column(&row, 0)?;
                Ok(Some(decode(&id, &text_column(&row, 1)?)?))
            }
            None => Ok(None),
        }
    }

    /// Notifications addressed to one device, newest first
    pub async fn list_for_device(&self, device_id: &str) -> Result<Vec<Notification>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query(
                "SELECT id, data FROM notifications WHERE device_id = ?1 ORDER BY created_at DESC",
                [device_id],
            )
            .await?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = text_column(&row, 0)?;
            notes.push(decode(&id, &text_column(&row, 1)?)?);
        }
        Ok(notes)
    }

    /// Mark a notification read
    pub async fn mark_read(&self, id: &str) -> Result<Notification> {
        let mut note = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("notification", id))?;
        note.is_read = true;
        self.create(&note).await?;
        Ok(note)
    }
}

fn decode(id: &str, data: &str) -> Result<Notification> {
    let value: Value = serde_json::from_str(data)?;
    Ok(Notification::decode(id, &value)?)
}
