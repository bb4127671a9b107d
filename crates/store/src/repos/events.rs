//! Usage event repository
//!
//! Append-only: there is no update or delete API. The stored stream is the
//! canonical input to usage aggregation.

use chrono::{DateTime, Utc};
use serde_json::Value;
use wafr_usage::UsageEvent;

use crate::error::Result;
use crate::plane::{Collection, DataPlane};
use crate::repos::text_column;

/// Usage event repository
pub struct EventRepo<'a> {
    plane: &'a DataPlane,
}

impl<'a> EventRepo<'a> {
    pub(crate) fn new(plane: &'a DataPlane) -> Self {
        Self { plane }
    }

    /// Append one event, returning its generated id
    pub async fn append(&self, event: &UsageEvent) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        let data = serde_json::to_string(event)?;
        let created_at = event.created_at.to_rfc3339();
        let conn = self.plane.db().connect()?;

        conn.execute(
            "INSERT INTO coupon_events (id, coupon_id, created_at, data) VALUES (?1, ?2, ?3, ?4)",
            [
                id.as_str(),
                event.coupon_id.as_str(),
                created_at.as_str(),
                data.as_str(),
            ],
        )
        .await?;

        self.plane.publish(Collection::CouponEvents, &id);
        Ok(id)
    }

    /// Events at or after `since` (all events when `None`), oldest first
    pub async fn list_since(&self, since: Option<DateTime<Utc>>) -> Result<Vec<UsageEvent>> {
        let conn = self.plane.db().connect()?;
        let mut events = Vec::new();

        let mut rows = match since {
            Some(since) => {
                let stamp = since.to_rfc3339();
                conn.query(
                    "SELECT data FROM coupon_events WHERE created_at >= ?1 ORDER BY created_at",
                    [stamp.as_str()],
                )
                .await?
            }
            None => {
                conn.query("SELECT data FROM coupon_events ORDER BY created_at", ())
                    .await?
            }
        };

        while let Some(row) = rows.next().await? {
            events.push(decode(&text_column(&row, 0)?)?);
        }
        Ok(events)
    }

    /// All events for one coupon, oldest first
    pub async fn list_for_coupon(&self, coupon_id: &str) -> Result<Vec<UsageEvent>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query(
                "SELECT data FROM coupon_events WHERE coupon_id = ?1 ORDER BY created_at",
                [coupon_id],
            )
            .await?;

        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(decode(&text_column(&row, 0)?)?);
        }
        Ok(events)
    }
}

fn decode(data: &str) -> Result<UsageEvent> {
    let value: Value = serde_json::from_str(data)?;
    Ok(serde_json::from_value(value)?)
}
