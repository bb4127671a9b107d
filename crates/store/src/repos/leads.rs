//! Lead repository
//!
//! Leads are created once per device during onboarding. The client keeps a
//! local marker as the fast path; the unique device check here is the
//! backstop against resubmission.

use serde_json::Value;
use wafr_model::{Entity, Lead};

use crate::error::{Result, StoreError};
use crate::plane::{Collection, DataPlane};
use crate::repos::text_column;

/// Lead repository
pub struct LeadRepo<'a> {
    plane: &'a DataPlane,
}

impl<'a> LeadRepo<'a> {
    pub(crate) fn new(plane: &'a DataPlane) -> Self {
        Self { plane }
    }

    /// Create a lead; fails when the device has already onboarded
    ///
    /// The unique device index is the arbiter, so a duplicate that races a
    /// concurrent submit surfaces the same way as a plain resubmit.
    pub async fn create(&self, lead: &Lead) -> Result<()> {
        lead.validate()?;

        let data = serde_json::to_string(lead)?;
        let created_at = lead.created_at.to_rfc3339();
        let conn = self.plane.db().connect()?;

        if let Err(err) = conn
            .execute(
                "INSERT INTO leads (id, device_id, created_at, data) VALUES (?1, ?2, ?3, ?4)",
                [
                    lead.id.as_str(),
                    lead.device_id.as_str(),
                    created_at.as_str(),
                    data.as_str(),
                ],
            )
            .await
        {
            if err.to_string().contains("UNIQUE constraint") {
                return Err(StoreError::already_exists("lead", &lead.device_id));
            }
            return Err(err.into());
        }

        self.plane.publish(Collection::Leads, &lead.id);
        Ok(())
    }

    /// The lead submitted by a device, if any
    pub async fn by_device(&self, device_id: &str) -> Result<Option<Lead>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query(
                "SELECT id, data FROM leads WHERE device_id = ?1",
                [device_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => {
                let id = text_column(&row, 0)?;
                Ok(Some(decode(&id, &text_column(&row, 1)?)?))
            }
            None => Ok(None),
        }
    }

    /// All leads, newest first (admin view)
    pub async fn list_all(&self) -> Result<Vec<Lead>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query("SELECT id, data FROM leads ORDER BY created_at DESC", ())
            .await?;

        let mut leads = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = text_column(&row, 0)?;
            leads.push(decode(&id, &text_column(&row, 1)?)?);
        }
        Ok(leads)
    }
}

fn decode(id: &str, data: &str) -> Result<Lead> {
    let value: Value = serde_json::from_str(data)?;
    Ok(Lead::decode(id, &value)?)
}
