//! Record query builder.
//!
//! [`RecordQuery`] is a consuming builder: each `with_*` method takes the
//! query by value and returns it, so options chain without shared mutable
//! state. [`RecordQuery::to_plan`] turns the options into a [`SelectPlan`],
//! adding the soft-delete visibility rule unless the caller opts out.

use chrono::{DateTime, Utc};

use crate::columns::Column;
use crate::error::RecordError;
use crate::plan::{Dialect, OrderBy, Predicate, SelectPlan, SortOrder};
use crate::timestamp::format_timestamp;

/// Limit applied when an offset is requested without an explicit limit.
pub const DEFAULT_OFFSET_LIMIT: u64 = 10;

/// Filter, sort and pagination options for listing or counting records.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use record_core::{Column, Dialect, RecordQuery};
///
/// let plan = RecordQuery::new()
///     .with_type("person")
///     .with_payload_search("approved")
///     .with_offset(20)
///     .with_order_by(Column::CreatedAt)
///     .to_plan(Dialect::Sqlite, "records", Utc::now())
///     .expect("valid query");
/// assert_eq!(plan.limit, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    id: Option<String>,
    record_type: Option<String>,
    columns: Vec<Column>,
    limit: Option<u64>,
    offset: Option<u64>,
    order_by: Option<Column>,
    sort_order: SortOrder,
    count_only: bool,
    include_soft_deleted: bool,
    payload_search: Vec<String>,
    payload_search_not: Vec<String>,
}

impl RecordQuery {
    /// A query matching every live record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Match a single identifier. An empty string fails validation.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Match a record type. An empty string fails validation.
    #[must_use]
    pub fn with_type(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    /// Restrict the selected columns. An empty list selects every column.
    #[must_use]
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    /// Cap the number of returned rows.
    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip rows. Implies [`DEFAULT_OFFSET_LIMIT`] when no limit is set.
    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sort on `column`, descending unless [`Self::with_sort_order`] says
    /// otherwise.
    #[must_use]
    pub const fn with_order_by(mut self, column: Column) -> Self {
        self.order_by = Some(column);
        self
    }

    /// Direction used with [`Self::with_order_by`].
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Plan a count instead of a listing; pagination is dropped.
    #[must_use]
    pub const fn with_count_only(mut self, count_only: bool) -> Self {
        self.count_only = count_only;
        self
    }

    /// Disable the soft-delete visibility rule.
    ///
    /// Such a plan returns every row of the table: identifier, type and
    /// payload filters as well as pagination and ordering are not applied.
    #[must_use]
    pub const fn with_include_soft_deleted(mut self, include: bool) -> Self {
        self.include_soft_deleted = include;
        self
    }

    /// Require the payload to contain `needle`. Terms are OR-combined.
    #[must_use]
    pub fn with_payload_search(mut self, needle: impl Into<String>) -> Self {
        self.payload_search.push(needle.into());
        self
    }

    /// Require the payload not to contain `needle`. Terms are AND-combined.
    #[must_use]
    pub fn with_payload_search_not(mut self, needle: impl Into<String>) -> Self {
        self.payload_search_not.push(needle.into());
        self
    }

    /// Whether an identifier filter was set, even an empty one.
    #[must_use]
    pub const fn is_id_set(&self) -> bool {
        self.id.is_some()
    }

    /// Identifier filter.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether a type filter was set, even an empty one.
    #[must_use]
    pub const fn is_type_set(&self) -> bool {
        self.record_type.is_some()
    }

    /// Type filter.
    #[must_use]
    pub fn record_type(&self) -> Option<&str> {
        self.record_type.as_deref()
    }

    /// Explicit projection.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether a limit was set explicitly.
    #[must_use]
    pub const fn is_limit_set(&self) -> bool {
        self.limit.is_some()
    }

    /// Explicit limit.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Whether an offset was set.
    #[must_use]
    pub const fn is_offset_set(&self) -> bool {
        self.offset.is_some()
    }

    /// Requested offset.
    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Whether a sort column was set.
    #[must_use]
    pub const fn is_order_by_set(&self) -> bool {
        self.order_by.is_some()
    }

    /// Sort column.
    #[must_use]
    pub const fn order_by(&self) -> Option<Column> {
        self.order_by
    }

    /// Sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Whether the query counts rather than lists.
    #[must_use]
    pub const fn is_count_only(&self) -> bool {
        self.count_only
    }

    /// Whether soft-deleted rows are visible.
    #[must_use]
    pub const fn is_soft_deleted_included(&self) -> bool {
        self.include_soft_deleted
    }

    /// Inclusion search terms.
    #[must_use]
    pub fn payload_search(&self) -> &[String] {
        &self.payload_search
    }

    /// Exclusion search terms.
    #[must_use]
    pub fn payload_search_not(&self) -> &[String] {
        &self.payload_search_not
    }

    /// Limit the plan will carry: the explicit one, or
    /// [`DEFAULT_OFFSET_LIMIT`] when only an offset was given.
    #[must_use]
    pub fn effective_limit(&self) -> Option<u64> {
        self.limit
            .or_else(|| self.offset.map(|_| DEFAULT_OFFSET_LIMIT))
    }

    /// Reject filters that were set to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] when the identifier or type filter
    /// is present but empty.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id.as_deref() == Some("") {
            return Err(RecordError::validation("id is required"));
        }
        if self.record_type.as_deref() == Some("") {
            return Err(RecordError::validation("type is required"));
        }
        Ok(())
    }

    /// Build the select plan for `table` as seen at instant `now`.
    ///
    /// Live rows are those whose `soft_deleted_at` is strictly after `now`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] from [`Self::validate`]; no plan is
    /// produced in that case.
    pub fn to_plan(
        &self,
        dialect: Dialect,
        table: &str,
        now: DateTime<Utc>,
    ) -> Result<SelectPlan, RecordError> {
        self.validate()?;

        let mut plan = SelectPlan::new(dialect, table);
        if self.include_soft_deleted {
            return Ok(plan);
        }

        if let Some(id) = &self.id {
            plan.predicates.push(Predicate::equals(Column::Id, id.as_str()));
        }

        if let Some(search) = self.payload_search_predicate() {
            plan.predicates.push(search);
        }

        if !self.count_only {
            plan.limit = self.effective_limit();
            plan.offset = self.offset;
        }

        plan.order = self.order_by.map(|column| OrderBy {
            column,
            direction: self.sort_order,
        });
        plan.projection.clone_from(&self.columns);

        if let Some(record_type) = &self.record_type {
            plan.predicates
                .push(Predicate::equals(Column::RecordType, record_type.as_str()));
        }
        plan.predicates.push(Predicate::greater_than(
            Column::SoftDeletedAt,
            format_timestamp(now),
        ));

        Ok(plan)
    }

    fn payload_search_predicate(&self) -> Option<Predicate> {
        let mut conditions = Vec::new();
        if !self.payload_search.is_empty() {
            conditions.push(Predicate::Or(
                self.payload_search
                    .iter()
                    .map(|needle| Predicate::contains(Column::Payload, needle))
                    .collect(),
            ));
        }
        conditions.extend(
            self.payload_search_not
                .iter()
                .map(|needle| Predicate::not_contains(Column::Payload, needle)),
        );

        if conditions.is_empty() {
            None
        } else {
            Some(Predicate::And(conditions))
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
