use super::*;
use async_trait::async_trait;
use rstest::{fixture, rstest};
use std::sync::Mutex;

/// Executor double that records every statement it is handed.
#[derive(Default)]
struct RecordingExecutor {
    seen: Mutex<Vec<Statement>>,
}

impl RecordingExecutor {
    fn seen(&self) -> Vec<Statement> {
        self.seen.lock().expect("executor log poisoned").clone()
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn execute(&self, statement: &Statement) -> Result<u64, SqlExecutorError> {
        self.seen
            .lock()
            .expect("executor log poisoned")
            .push(statement.clone());
        Ok(1)
    }

    async fn select_rows(&self, statement: &Statement) -> Result<Vec<Row>, SqlExecutorError> {
        self.seen
            .lock()
            .expect("executor log poisoned")
            .push(statement.clone());
        Ok(vec![Row::from([("id".to_owned(), "abc".to_owned())])])
    }
}

#[fixture]
fn insert() -> Statement {
    Statement::new(
        "INSERT INTO \"records\" (\"id\") VALUES (?)",
        vec!["abc".to_owned()],
    )
}

#[rstest]
#[tokio::test]
async fn executors_are_usable_as_trait_objects(insert: Statement) {
    let recording = RecordingExecutor::default();
    let executor: &dyn SqlExecutor = &recording;

    let affected = executor.execute(&insert).await.expect("execute succeeds");
    let rows = executor
        .select_rows(&Statement::raw("SELECT \"id\" FROM \"records\""))
        .await
        .expect("select succeeds");

    assert_eq!(affected, 1);
    assert_eq!(rows.first().and_then(|row| row.get("id")).map(String::as_str), Some("abc"));
    assert_eq!(recording.seen().len(), 2);
    assert_eq!(recording.seen().first(), Some(&insert));
}

#[rstest]
#[tokio::test]
async fn fixture_executor_is_inert(insert: Statement) {
    let executor = FixtureSqlExecutor;
    assert_eq!(executor.execute(&insert).await.expect("execute succeeds"), 0);
    assert!(
        executor
            .select_rows(&insert)
            .await
            .expect("select succeeds")
            .is_empty()
    );
}

#[rstest]
fn raw_statements_bind_nothing() {
    let statement = Statement::raw("DROP TABLE \"records\"");
    assert!(statement.params.is_empty());
}

#[rstest]
fn executor_errors_render_context() {
    assert_eq!(
        SqlExecutorError::decode("created_at", "unsupported type").to_string(),
        "failed to decode column created_at: unsupported type"
    );
    assert_eq!(
        SqlExecutorError::connection("pool timed out").to_string(),
        "sql executor connection failed: pool timed out"
    );
}
