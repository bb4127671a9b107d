//! Report repository

use serde_json::Value;
use wafr_model::{Entity, Report};

use crate::error::{Result, StoreError};
use crate::plane::{Collection, DataPlane};
use crate::repos::text_column;

/// Report repository
pub struct ReportRepo<'a> {
    plane: &'a DataPlane,
}

impl<'a> ReportRepo<'a> {
    pub(crate) fn new(plane: &'a DataPlane) -> Self {
        Self { plane }
    }

    /// File a report
    pub async fn create(&self, report: &Report) -> Result<()> {
        self.write(report).await
    }

    /// Get a report by id
    pub async fn get(&self, id: &str) -> Result<Option<Report>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query("SELECT id, data FROM reports WHERE id = ?1", [id])
            .await?;

        match rows.next().await? {
            Some(row) => {
                let id = text_column(&row, 0)?;
                Ok(Some(decode(&id, &text_column(&row, 1)?)?))
            }
            None => Ok(None),
        }
    }

    /// All reports, newest first
    pub async fn list_all(&self) -> Result<Vec<Report>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query("SELECT id, data FROM reports ORDER BY created_at DESC", ())
            .await?;

        let mut reports = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = text_column(&row, 0)?;
            reports.push(decode(&id, &text_column(&row, 1)?)?);
        }
        Ok(reports)
    }

    /// Mark a report resolved
    pub async fn resolve(&self, id: &str) -> Result<Report> {
        let mut report = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found("report", id))?;
        report.is_resolved = true;
        self.write(&report).await?;
        Ok(report)
    }

    /// Delete a report
    pub async fn delete(&self, id: &str) -> Result<()> {
        let conn = self.plane.db().connect()?;
        let affected = conn
            .execute("DELETE FROM reports WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(StoreError::not_found("report", id));
        }
        self.plane.publish(Collection::Reports, id);
        Ok(())
    }

    async fn write(&self, report: &Report) -> Result<()> {
        let data = serde_json::to_string(report)?;
        let created_at = report.created_at.to_rfc3339();
        let conn = self.plane.db().connect()?;

        let params = [report.id.as_str(), created_at.as_str(), data.as_str()];
        let updated = conn
            .execute(
                "UPDATE reports SET created_at = ?2, data = ?3 WHERE id = ?1",
                params,
            )
            .await?;
        if updated == 0 {
            conn.execute(
                "INSERT INTO reports (id, created_at, data) VALUES (?1, ?2, ?3)",
                params,
            )
            .await?;
        }

        self.plane.publish(Collection::Reports, &report.id);
        Ok(())
    }
}

fn decode(id: &str, data: &str) -> Result<Report> {
    let value: Value = serde_json::from_str(data)?;
    Ok(Report::decode(id, &value)?)
}
