//! The record entity.
//!
//! [`Record`] is a thin typed view over a [`DirtyTracked`] bag keyed by
//! [`Column`]. Every setter goes through the bag, so the store can persist a
//! record with only the columns touched since it was loaded or last saved.
//!
//! Payload and metas are kept as serialised JSON strings, exactly as stored.
//! The map accessors decode on every call and report corrupt data as
//! [`RecordError::Decode`] rather than returning an empty value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::columns::{Column, MAX_DATETIME};
use crate::dirty::DirtyTracked;
use crate::error::RecordError;
use crate::timestamp::{format_timestamp, parse_timestamp};

/// A single row of the record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: DirtyTracked<Column>,
}

impl Record {
    /// Create a live record of the given type.
    ///
    /// The record receives a random 32-character identifier, empty payload,
    /// metas and memo, creation and update stamps taken from `clock`, and the
    /// [`MAX_DATETIME`] deletion sentinel. Every column starts out dirty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mockable::DefaultClock;
    /// use record_core::{Column, Record};
    ///
    /// let record = Record::new("person", &DefaultClock);
    /// assert_eq!(record.id().len(), 32);
    /// assert_eq!(record.changed_fields().len(), Column::ALL.len());
    /// ```
    #[must_use]
    pub fn new(record_type: impl Into<String>, clock: &dyn Clock) -> Self {
        let now = format_timestamp(clock.utc());
        let mut fields = DirtyTracked::new();
        fields.set(Column::Id, Uuid::new_v4().simple().to_string());
        fields.set(Column::RecordType, record_type);
        fields.set(Column::Payload, "");
        fields.set(Column::Metas, "");
        fields.set(Column::Memo, "");
        fields.set(Column::CreatedAt, now.clone());
        fields.set(Column::UpdatedAt, now);
        fields.set(Column::SoftDeletedAt, MAX_DATETIME);
        Self { fields }
    }

    /// Rebuild a clean record from a row returned by the database.
    ///
    /// Keys that are not record columns are ignored.
    #[must_use]
    pub fn from_row<I, K, V>(row: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self {
            fields: DirtyTracked::new(),
        };
        record.hydrate(row);
        record
    }

    /// Replace every column from a loaded row and mark the record clean.
    pub fn hydrate<I, K, V>(&mut self, row: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.fields.hydrate(row.into_iter().filter_map(|(key, value)| {
            key.as_ref()
                .parse::<Column>()
                .ok()
                .map(|column| (column, value.into()))
        }));
    }

    /// Whether any column changed since the record was loaded or saved.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.fields.is_dirty()
    }

    /// Columns changed since the record was loaded or saved.
    #[must_use]
    pub const fn changed_fields(&self) -> &BTreeMap<Column, String> {
        self.fields.changed_fields()
    }

    /// Every column value, as used for inserts.
    #[must_use]
    pub const fn data(&self) -> &BTreeMap<Column, String> {
        self.fields.data()
    }

    /// Clear change tracking after a successful write.
    pub fn mark_clean(&mut self) {
        self.fields.mark_clean();
    }

    /// Raw value of an arbitrary column.
    #[must_use]
    pub fn get(&self, column: Column) -> &str {
        self.fields.get(column)
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.fields.get(Column::Id)
    }

    /// Replace the identifier. Only meaningful before the first insert.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.fields.set(Column::Id, id);
    }

    /// Category tag.
    #[must_use]
    pub fn record_type(&self) -> &str {
        self.fields.get(Column::RecordType)
    }

    /// Replace the category tag.
    pub fn set_record_type(&mut self, record_type: impl Into<String>) {
        self.fields.set(Column::RecordType, record_type);
    }

    /// Serialised JSON payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        self.fields.get(Column::Payload)
    }

    /// Store an already serialised payload verbatim.
    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.fields.set(Column::Payload, payload);
    }

    /// Free-text note.
    #[must_use]
    pub fn memo(&self) -> &str {
        self.fields.get(Column::Memo)
    }

    /// Replace the note.
    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.fields.set(Column::Memo, memo);
    }

    /// Creation timestamp string.
    #[must_use]
    pub fn created_at(&self) -> &str {
        self.fields.get(Column::CreatedAt)
    }

    /// Creation timestamp, if it parses.
    #[must_use]
    pub fn created_at_datetime(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at())
    }

    /// Replace the creation timestamp string.
    pub fn set_created_at(&mut self, created_at: impl Into<String>) {
        self.fields.set(Column::CreatedAt, created_at);
    }

    /// Update timestamp string.
    #[must_use]
    pub fn updated_at(&self) -> &str {
        self.fields.get(Column::UpdatedAt)
    }

    /// Update timestamp, if it parses.
    #[must_use]
    pub fn updated_at_datetime(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at())
    }

    /// Replace the update timestamp string.
    pub fn set_updated_at(&mut self, updated_at: impl Into<String>) {
        self.fields.set(Column::UpdatedAt, updated_at);
    }

    /// Deletion timestamp string, [`MAX_DATETIME`] while live.
    #[must_use]
    pub fn soft_deleted_at(&self) -> &str {
        self.fields.get(Column::SoftDeletedAt)
    }

    /// Replace the deletion timestamp string.
    pub fn set_soft_deleted_at(&mut self, soft_deleted_at: impl Into<String>) {
        self.fields.set(Column::SoftDeletedAt, soft_deleted_at);
    }

    /// Whether the record is deleted as seen from `clock`'s current instant.
    #[must_use]
    pub fn is_soft_deleted(&self, clock: &dyn Clock) -> bool {
        self.is_soft_deleted_at(clock.utc())
    }

    /// Whether the deletion timestamp is at or before `now`.
    ///
    /// The boundary belongs to "deleted", matching the strict
    /// `soft_deleted_at > now` visibility predicate. A timestamp that does
    /// not parse counts as live.
    #[must_use]
    pub fn is_soft_deleted_at(&self, now: DateTime<Utc>) -> bool {
        parse_timestamp(self.soft_deleted_at()).is_some_and(|deleted_at| deleted_at <= now)
    }

    /// Decoded metadata map. An empty column decodes to an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] when the stored metas are not a JSON
    /// object of strings.
    pub fn metas(&self) -> Result<BTreeMap<String, String>, RecordError> {
        decode_column(Column::Metas, self.fields.get(Column::Metas))
    }

    /// A single metadata value, `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] when the stored metas cannot be
    /// decoded.
    pub fn meta(&self, name: &str) -> Result<Option<String>, RecordError> {
        Ok(self.metas()?.remove(name))
    }

    /// Replace the whole metadata map.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Encode`] when the map cannot be serialised.
    pub fn set_metas(&mut self, metas: &BTreeMap<String, String>) -> Result<(), RecordError> {
        let encoded =
            serde_json::to_string(metas).map_err(|err| RecordError::encode(Column::Metas, err))?;
        self.fields.set(Column::Metas, encoded);
        Ok(())
    }

    /// Set a single metadata value, keeping the others.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] without modifying the record when the
    /// stored metas are corrupt.
    pub fn set_meta(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), RecordError> {
        self.upsert_metas([(name.into(), value.into())])
    }

    /// Merge `entries` into the metadata map, overwriting existing keys.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] without modifying the record when the
    /// stored metas are corrupt.
    pub fn upsert_metas<I, K, V>(&mut self, entries: I) -> Result<(), RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut metas = self.metas()?;
        metas.extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        self.set_metas(&metas)
    }

    /// Decoded payload object. An empty column decodes to an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] when the payload is not a JSON object.
    pub fn payload_map(&self) -> Result<Map<String, Value>, RecordError> {
        decode_column(Column::Payload, self.payload())
    }

    /// Serialise `payload` into the payload column.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Encode`] when the map cannot be serialised.
    pub fn set_payload_map(&mut self, payload: &Map<String, Value>) -> Result<(), RecordError> {
        let encoded = serde_json::to_string(payload)
            .map_err(|err| RecordError::encode(Column::Payload, err))?;
        self.fields.set(Column::Payload, encoded);
        Ok(())
    }

    /// A single top-level payload value, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] when the payload is corrupt.
    pub fn payload_key(&self, key: &str) -> Result<Option<Value>, RecordError> {
        Ok(self.payload_map()?.remove(key))
    }

    /// Set a single top-level payload value, keeping the others.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Decode`] without modifying the record when the
    /// stored payload is corrupt.
    pub fn set_payload_key(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), RecordError> {
        let mut payload = self.payload_map()?;
        payload.insert(key.into(), value.into());
        self.set_payload_map(&payload)
    }
}

fn decode_column<T>(column: Column, raw: &str) -> Result<T, RecordError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if raw.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(raw).map_err(|err| RecordError::decode(column, err))
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
