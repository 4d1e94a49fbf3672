// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::APP_NAME;

const LOG_TARGET_ENV: &str = "FLOATCHAT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Stderr,
    Stdout,
    File(PathBuf),
    Default,
}

impl LogTarget {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("stderr") => Self::Stderr,
            Some("stdout") => Self::Stdout,
            Some("") | None => Self::Default,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }
}

/// Install the global subscriber. The terminal belongs to the UI, so logs go
/// to a file unless `FLOATCHAT_LOG` says otherwise. Level comes from
/// `RUST_LOG` and defaults to info.
pub fn init_logging() -> Result<()> {
    let raw = std::env::var(LOG_TARGET_ENV).ok();
    let (writer, ansi) = match LogTarget::parse(raw.as_deref()) {
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogTarget::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogTarget::Default => match default_log_path().map(|path| open_log_file(&path)) {
            Some(Ok(file)) => (BoxMakeWriter::new(Mutex::new(file)), false),
            _ => (BoxMakeWriter::new(std::io::sink), false),
        },
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .try_init()
        .map_err(|err| anyhow!("install log subscriber: {err}"))
}

fn default_log_path() -> Option<PathBuf> {
    let root = dirs::state_dir().or_else(dirs::data_local_dir)?;
    Some(root.join(APP_NAME).join("floatchat.log"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
