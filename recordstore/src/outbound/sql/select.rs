//! `SELECT` and `COUNT` rendering from a [`SelectPlan`].

use crate::domain::ports::Statement;
use crate::domain::{Dialect, Predicate, SelectPlan, SortOrder};

use super::dialect::{Binder, quote_column, quote_identifier};

/// Render a plan as a row-returning `SELECT`.
pub fn render_select(plan: &SelectPlan) -> Statement {
    let dialect = plan.dialect;
    let mut binder = Binder::new(dialect);
    let columns = plan
        .projected_columns()
        .iter()
        .map(|column| quote_column(dialect, *column))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!(
        "SELECT {columns} FROM {}",
        quote_identifier(dialect, &plan.table)
    );
    push_where(&mut sql, &mut binder, plan);
    push_order_and_page(&mut sql, plan);
    binder.finish(sql)
}

/// Render a plan as `SELECT COUNT(*) AS count`.
///
/// Ordering and pagination are ignored; a count covers every matching row.
pub fn render_count(plan: &SelectPlan) -> Statement {
    let dialect = plan.dialect;
    let mut binder = Binder::new(dialect);
    let mut sql = format!(
        "SELECT COUNT(*) AS {} FROM {}",
        quote_identifier(dialect, "count"),
        quote_identifier(dialect, &plan.table)
    );
    push_where(&mut sql, &mut binder, plan);
    binder.finish(sql)
}

fn push_where(sql: &mut String, binder: &mut Binder, plan: &SelectPlan) {
    if !plan.is_filtered() {
        return;
    }
    let clauses = plan
        .predicates
        .iter()
        .map(|predicate| render_predicate(plan.dialect, binder, predicate))
        .collect::<Vec<_>>();
    sql.push_str(" WHERE ");
    sql.push_str(&clauses.join(" AND "));
}

fn render_predicate(dialect: Dialect, binder: &mut Binder, predicate: &Predicate) -> String {
    match predicate {
        Predicate::Eq { column, value } => format!(
            "{} = {}",
            quote_column(dialect, *column),
            binder.bind(*column, value)
        ),
        Predicate::Gt { column, value } => format!(
            "{} > {}",
            quote_column(dialect, *column),
            binder.bind(*column, value)
        ),
        Predicate::Like { column, pattern } => format!(
            "{} LIKE {}",
            quote_column(dialect, *column),
            binder.bind(*column, pattern)
        ),
        Predicate::NotLike { column, pattern } => format!(
            "{} NOT LIKE {}",
            quote_column(dialect, *column),
            binder.bind(*column, pattern)
        ),
        Predicate::Or(nested) => render_group(dialect, binder, nested, " OR ", "1 = 0"),
        Predicate::And(nested) => render_group(dialect, binder, nested, " AND ", "1 = 1"),
    }
}

fn render_group(
    dialect: Dialect,
    binder: &mut Binder,
    nested: &[Predicate],
    separator: &str,
    identity: &str,
) -> String {
    match nested {
        [] => identity.to_owned(),
        [single] => render_predicate(dialect, binder, single),
        _ => {
            let parts = nested
                .iter()
                .map(|predicate| render_predicate(dialect, binder, predicate))
                .collect::<Vec<_>>();
            format!("({})", parts.join(separator))
        }
    }
}

fn push_order_and_page(sql: &mut String, plan: &SelectPlan) {
    let dialect = plan.dialect;
    if let Some(order) = plan.order {
        let direction = match order.direction {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        sql.push_str(&format!(
            " ORDER BY {} {direction}",
            quote_column(dialect, order.column)
        ));
    }

    match dialect {
        Dialect::MsSql => push_offset_fetch(sql, plan),
        Dialect::MySql | Dialect::Postgres | Dialect::Sqlite => push_limit_offset(sql, plan),
    }
}

fn push_limit_offset(sql: &mut String, plan: &SelectPlan) {
    match (plan.limit, plan.offset) {
        (Some(limit), _) => sql.push_str(&format!(" LIMIT {limit}")),
        // MySQL and SQLite reject OFFSET without LIMIT.
        (None, Some(_)) => match plan.dialect {
            Dialect::Sqlite => sql.push_str(" LIMIT -1"),
            Dialect::MySql => sql.push_str(&format!(" LIMIT {}", u64::MAX)),
            Dialect::Postgres | Dialect::MsSql => {}
        },
        (None, None) => {}
    }
    if let Some(offset) = plan.offset {
        sql.push_str(&format!(" OFFSET {offset}"));
    }
}

fn push_offset_fetch(sql: &mut String, plan: &SelectPlan) {
    if plan.limit.is_none() && plan.offset.is_none() {
        return;
    }
    if plan.order.is_none() {
        sql.push_str(" ORDER BY (SELECT NULL)");
    }
    sql.push_str(&format!(" OFFSET {} ROWS", plan.offset.unwrap_or(0)));
    if let Some(limit) = plan.limit {
        sql.push_str(&format!(" FETCH NEXT {limit} ROWS ONLY"));
    }
}
