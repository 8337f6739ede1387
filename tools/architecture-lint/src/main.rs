//! Command-line entry point: `architecture-lint [RECORDSTORE_DIR]`.
//!
//! Without an argument the `recordstore/` crate is searched for upwards from
//! the current directory, then from this tool's manifest directory.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use architecture_lint::{lint_recordstore_sources, locate_recordstore_dir};

fn main() -> ExitCode {
    let Some(recordstore_dir) = resolve_target(env::args_os().nth(1).map(PathBuf::from)) else {
        report(format_args!(
            "recordstore crate not found; pass its directory as the first argument"
        ));
        return ExitCode::from(2);
    };

    match lint_recordstore_sources(&recordstore_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(format_args!("{}: {err}", recordstore_dir.display()));
            ExitCode::FAILURE
        }
    }
}

fn resolve_target(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir);
    }
    env::current_dir()
        .ok()
        .and_then(|cwd| locate_recordstore_dir(&cwd))
        .or_else(|| locate_recordstore_dir(Path::new(env!("CARGO_MANIFEST_DIR"))))
}

fn report(message: std::fmt::Arguments<'_>) {
    let _ = writeln!(io::stderr().lock(), "{message}");
}
