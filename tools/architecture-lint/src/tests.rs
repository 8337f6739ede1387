//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::fixture;
use rstest::rstest;

use super::*;

#[derive(Clone, Copy)]
struct LintSingle;

impl LintSingle {
    fn lint(self, file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
        lint_sources(&[LintSource {
            file: PathBuf::from(file),
            contents: contents.to_owned(),
        }])
    }
}

#[fixture]
fn lint_single() -> LintSingle {
    LintSingle
}

#[rstest]
#[case(
    "store/mod.rs",
    "use crate::outbound::sql::render_select; fn list() { let _ = render_select; }",
    true
)]
#[case(
    "store/mod.rs",
    "use sqlx::SqlitePool; fn list() {}",
    false
)]
#[case(
    "domain/ports/sql_executor.rs",
    "use crate::outbound::persistence::SqliteSqlExecutor; fn port() { let _ = 1; }",
    false
)]
#[case(
    "domain/ports/sql_executor.rs",
    "use recordstore::store::RecordStore; fn port() { let _ = 1; }",
    false
)]
#[case(
    "domain/ports/sql_executor.rs",
    "use async_trait::async_trait; #[async_trait] trait Port {}",
    true
)]
#[case(
    "domain/mod.rs",
    "use sqlx::Row; fn thing() {}",
    false
)]
#[case(
    "outbound/sql/select.rs",
    "use crate::store::RecordStore; fn thing() { let _ = 1; }",
    false
)]
#[case(
    "outbound/persistence/sqlite_executor.rs",
    "use sqlx::sqlite::SqlitePool; use crate::domain::ports::SqlExecutor; fn thing() {}",
    true
)]
#[case(
    "outbound/persistence/config.rs",
    "use ortho_config::OrthoConfig; fn thing() {}",
    false
)]
#[case(
    "record_core/record.rs",
    "use crate::columns::Column; use serde_json::Value; fn thing() {}",
    true
)]
#[case(
    "record_core/query.rs",
    "#[tokio::test] async fn thing() {}",
    false
)]
fn detects_boundary_violations(
    lint_single: LintSingle,
    #[case] file: &str,
    #[case] contents: &str,
    #[case] ok: bool,
) {
    let result = lint_single.lint(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn files_outside_known_layers_are_rejected(lint_single: LintSingle) {
    let result = lint_single.lint("bin/recordstore_schema.rs", "fn main() {}");
    assert!(
        matches!(result, Err(ArchitectureLintError::Parse { .. })),
        "result: {result:?}"
    );
}

#[rstest]
fn locates_the_recordstore_crate_from_a_nested_directory() {
    let root = tempfile::tempdir().expect("temp dir");
    let crate_dir = root.path().join("recordstore");
    std::fs::create_dir_all(crate_dir.join("src").join("store")).expect("store dir");
    std::fs::write(crate_dir.join("Cargo.toml"), "[package]\n").expect("manifest");
    let nested = root.path().join("tools").join("architecture-lint").join("src");
    std::fs::create_dir_all(&nested).expect("nested dir");

    assert_eq!(locate_recordstore_dir(&nested), Some(crate_dir));
}

#[rstest]
fn ignores_directories_that_are_not_the_store_crate() {
    let root = tempfile::tempdir().expect("temp dir");
    std::fs::create_dir_all(root.path().join("recordstore").join("docs")).expect("decoy dir");

    assert_eq!(locate_recordstore_dir(root.path()), None);
}
