//! Generic document repository
//!
//! CRUD for the four catalog collections (countries, categories, stores,
//! coupons), which are plain `(id, data)` tables with no helper columns.
//! The type parameter carries the collection name and the decode/validate
//! boundary.

use serde_json::Value;
use wafr_model::Entity;

use crate::error::{Result, StoreError};
use crate::plane::{Collection, DataPlane};
use crate::repos::text_column;

/// Generic repository over one catalog collection
pub struct Documents<'a, T: Entity> {
    plane: &'a DataPlane,
    collection: Collection,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T: Entity> Documents<'a, T> {
    pub(crate) fn new(plane: &'a DataPlane, collection: Collection) -> Self {
        Self {
            plane,
            collection,
            _marker: std::marker::PhantomData,
        }
    }

    /// Insert or replace a document
    ///
    /// Validates first; concurrent writers get last-write-wins semantics,
    /// which is the documented contract for admin edits. Update-first so a
    /// replaced row keeps its rowid and therefore its insertion order.
    pub async fn put(&self, entity: &T) -> Result<()> {
        entity.validate()?;
        let data = serde_json::to_string(entity)?;
        let conn = self.plane.db().connect()?;

        let updated = conn
            .execute(
                &format!(
                    "UPDATE {} SET data = ?2 WHERE id = ?1",
                    self.collection.as_str()
                ),
                [entity.id(), data.as_str()],
            )
            .await?;
        if updated == 0 {
            conn.execute(
                &format!(
                    "INSERT INTO {} (id, data) VALUES (?1, ?2)",
                    self.collection.as_str()
                ),
                [entity.id(), data.as_str()],
            )
            .await?;
        }

        self.plane.publish(self.collection, entity.id());
        Ok(())
    }

    /// Get a document by id
    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query(
                &format!("SELECT data FROM {} WHERE id = ?1", self.collection.as_str()),
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::decode_row(id, &text_column(&row, 0)?)?)),
            None => Ok(None),
        }
    }

    /// List every document, insertion-ordered
    pub async fn list_all(&self) -> Result<Vec<T>> {
        let conn = self.plane.db().connect()?;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT id, data FROM {} ORDER BY rowid",
                    self.collection.as_str()
                ),
                (),
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            let id = text_column(&row, 0)?;
            out.push(Self::decode_row(&id, &text_column(&row, 1)?)?);
        }
        Ok(out)
    }

    /// List live documents only, insertion-ordered
    pub async fn list_active(&self) -> Result<Vec<T>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|entity| entity.active())
            .collect())
    }

    /// Delete a document
    pub async fn delete(&self, id: &str) -> Result<()> {
        let conn = self.plane.db().connect()?;
        let affected = conn
            .execute(
                &format!("DELETE FROM {} WHERE id = ?1", self.collection.as_str()),
                [id],
            )
            .await?;

        if affected == 0 {
            return Err(StoreError::not_found(self.collection.as_str(), id));
        }
        self.plane.publish(self.collection, id);
        Ok(())
    }

    fn decode_row(id: &str, data: &str) -> Result<T> {
        let value: Value = serde_json::from_str(data)?;
        Ok(T::decode(id, &value)?)
    }
}
