//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use gitit_format::{TicketKind, TicketRecord, TicketStatus};
use std::path::Path;
use std::process::{Command, Output};

/// Run the `it` binary in `dir` with colors disabled.
pub fn run_it_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_it"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("GITIT_TITLE_WIDTH", "20")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute it binary")
}

/// Stdout of a successful run, panicking with stderr otherwise.
pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A ticket with fixed field values.
pub fn sample_ticket(release: &str, id: &str, title: &str) -> TicketRecord {
    TicketRecord {
        title: title.to_string(),
        kind: TicketKind::Bug,
        issuer: "Jane Doe <jane@example.com>".to_string(),
        created_at: chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(14, 5, 0))
            .unwrap(),
        body: "Steps to reproduce.\n".to_string(),
        priority: 1,
        weight: 3,
        status: TicketStatus::Open,
        assigned_to: "-".to_string(),
        id: id.to_string(),
        release: release.to_string(),
    }
}
