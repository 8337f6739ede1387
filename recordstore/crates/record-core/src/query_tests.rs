//! Tests for query planning.

use chrono::TimeZone;
use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture instant")
}

fn live_predicate() -> Predicate {
    Predicate::greater_than(Column::SoftDeletedAt, "2025-06-01 12:00:00")
}

fn plan(query: &RecordQuery, now: DateTime<Utc>) -> SelectPlan {
    query
        .to_plan(Dialect::Sqlite, "records", now)
        .expect("query should plan")
}

#[rstest]
fn default_query_only_hides_deleted_rows(now: DateTime<Utc>) {
    let plan = plan(&RecordQuery::new(), now);

    assert_eq!(plan.table, "records");
    assert_eq!(plan.dialect, Dialect::Sqlite);
    assert_eq!(plan.predicates, vec![live_predicate()]);
    assert!(plan.projection.is_empty());
    assert_eq!(plan.order, None);
    assert_eq!(plan.limit, None);
    assert_eq!(plan.offset, None);
}

#[rstest]
#[case(RecordQuery::new().with_id(""), "invalid query: id is required")]
#[case(RecordQuery::new().with_type(""), "invalid query: type is required")]
#[case(
    RecordQuery::new().with_id("").with_include_soft_deleted(true),
    "invalid query: id is required"
)]
fn empty_filters_fail_validation(
    #[case] query: RecordQuery,
    #[case] message: &str,
    now: DateTime<Utc>,
) {
    let err = query
        .to_plan(Dialect::Sqlite, "records", now)
        .expect_err("empty filter must be rejected");
    assert!(matches!(err, RecordError::Validation { .. }));
    assert_eq!(err.to_string(), message);
}

#[rstest]
fn unset_filters_are_inactive() {
    let query = RecordQuery::new();
    assert!(!query.is_id_set());
    assert!(!query.is_type_set());
    assert!(query.validate().is_ok());
}

#[rstest]
fn id_and_type_filters_surround_search_and_precede_visibility(now: DateTime<Utc>) {
    let query = RecordQuery::new()
        .with_id("abc")
        .with_type("person")
        .with_payload_search("Jon");

    let plan = plan(&query, now);

    assert_eq!(
        plan.predicates,
        vec![
            Predicate::equals(Column::Id, "abc"),
            Predicate::And(vec![Predicate::Or(vec![Predicate::contains(
                Column::Payload,
                "Jon"
            )])]),
            Predicate::equals(Column::RecordType, "person"),
            live_predicate(),
        ]
    );
}

#[rstest]
fn inclusion_terms_or_and_exclusion_terms_and(now: DateTime<Utc>) {
    let query = RecordQuery::new()
        .with_payload_search("approved")
        .with_payload_search("draft")
        .with_payload_search_not("Tom Brown")
        .with_payload_search_not("Acme");

    let plan = plan(&query, now);

    let expected_search = Predicate::And(vec![
        Predicate::Or(vec![
            Predicate::contains(Column::Payload, "approved"),
            Predicate::contains(Column::Payload, "draft"),
        ]),
        Predicate::not_contains(Column::Payload, "Tom Brown"),
        Predicate::not_contains(Column::Payload, "Acme"),
    ]);
    assert_eq!(plan.predicates, vec![expected_search, live_predicate()]);
}

#[rstest]
fn exclusion_only_search_has_no_or_group(now: DateTime<Utc>) {
    let plan = plan(&RecordQuery::new().with_payload_search_not("draft"), now);
    assert_eq!(
        plan.predicates.first(),
        Some(&Predicate::And(vec![Predicate::not_contains(
            Column::Payload,
            "draft"
        )]))
    );
}

#[rstest]
fn offset_without_limit_defaults_to_ten(now: DateTime<Utc>) {
    let query = RecordQuery::new().with_offset(1);

    assert_eq!(query.effective_limit(), Some(DEFAULT_OFFSET_LIMIT));
    let plan = plan(&query, now);
    assert_eq!(plan.limit, Some(10));
    assert_eq!(plan.offset, Some(1));
}

#[rstest]
fn explicit_limit_wins_over_default(now: DateTime<Utc>) {
    let plan = plan(&RecordQuery::new().with_limit(3).with_offset(6), now);
    assert_eq!(plan.limit, Some(3));
    assert_eq!(plan.offset, Some(6));
}

#[rstest]
fn count_only_drops_pagination(now: DateTime<Utc>) {
    let query = RecordQuery::new()
        .with_limit(5)
        .with_offset(5)
        .with_count_only(true);

    let plan = plan(&query, now);

    assert_eq!(plan.limit, None);
    assert_eq!(plan.offset, None);
    assert_eq!(plan.predicates, vec![live_predicate()]);
}

#[rstest]
#[case(None, SortOrder::Descending)]
#[case(Some(SortOrder::Ascending), SortOrder::Ascending)]
fn ordering_defaults_to_descending(
    #[case] requested: Option<SortOrder>,
    #[case] expected: SortOrder,
    now: DateTime<Utc>,
) {
    let mut query = RecordQuery::new().with_order_by(Column::CreatedAt);
    if let Some(direction) = requested {
        query = query.with_sort_order(direction);
    }

    let plan = plan(&query, now);

    assert_eq!(
        plan.order,
        Some(OrderBy {
            column: Column::CreatedAt,
            direction: expected,
        })
    );
}

#[rstest]
fn explicit_columns_become_the_projection(now: DateTime<Utc>) {
    let query = RecordQuery::new().with_columns([Column::Id, Column::Payload]);
    let plan = plan(&query, now);
    assert_eq!(plan.projection, vec![Column::Id, Column::Payload]);
}

#[rstest]
fn including_soft_deleted_returns_an_unfiltered_plan(now: DateTime<Utc>) {
    let query = RecordQuery::new()
        .with_id("abc")
        .with_type("person")
        .with_payload_search("approved")
        .with_columns([Column::Id])
        .with_limit(1)
        .with_order_by(Column::CreatedAt)
        .with_include_soft_deleted(true);

    let plan = plan(&query, now);

    assert!(!plan.is_filtered());
    assert!(plan.projection.is_empty());
    assert_eq!(plan.limit, None);
    assert_eq!(plan.order, None);
}

#[rstest]
fn planning_does_not_mutate_the_query(now: DateTime<Utc>) {
    let query = RecordQuery::new().with_offset(4);
    let before = query.clone();

    let _plan = plan(&query, now);

    assert_eq!(query, before);
    assert!(!query.is_limit_set());
}

#[rstest]
fn getters_reflect_builder_calls() {
    let query = RecordQuery::new()
        .with_id("abc")
        .with_type("person")
        .with_limit(2)
        .with_offset(4)
        .with_order_by(Column::UpdatedAt)
        .with_sort_order(SortOrder::Ascending)
        .with_count_only(true)
        .with_include_soft_deleted(true)
        .with_payload_search("x")
        .with_payload_search_not("y");

    assert_eq!(query.id(), Some("abc"));
    assert_eq!(query.record_type(), Some("person"));
    assert_eq!(query.limit(), Some(2));
    assert_eq!(query.offset(), Some(4));
    assert!(query.is_order_by_set());
    assert_eq!(query.order_by(), Some(Column::UpdatedAt));
    assert_eq!(query.sort_order(), SortOrder::Ascending);
    assert!(query.is_count_only());
    assert!(query.is_soft_deleted_included());
    assert_eq!(query.payload_search(), ["x".to_owned()]);
    assert_eq!(query.payload_search_not(), ["y".to_owned()]);
}
