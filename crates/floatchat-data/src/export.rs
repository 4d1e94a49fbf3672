// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use floatchat_app::{FloatId, FloatRecord};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use time::Date;
use time::macros::format_description;
use tracing::info;

pub const CSV_HEADERS: [&str; 9] = [
    "Float ID",
    "Date",
    "Latitude",
    "Longitude",
    "Temperature",
    "Salinity",
    "Depth",
    "QC",
    "Status",
];

pub const CSV_MIME_TYPE: &str = "text/csv";

/// Rows to export: the selected ones, in table order, when anything is
/// selected; otherwise every filtered row.
pub fn export_selection(filtered: &[FloatRecord], selected: &BTreeSet<FloatId>) -> Vec<FloatRecord> {
    if selected.is_empty() {
        return filtered.to_vec();
    }
    filtered
        .iter()
        .filter(|record| selected.contains(&record.id))
        .cloned()
        .collect()
}

fn csv_fields(record: &FloatRecord) -> [String; 9] {
    [
        record.id.to_string(),
        record.date.to_string(),
        record.lat.to_string(),
        record.lng.to_string(),
        record.temperature.to_string(),
        record.salinity.to_string(),
        record.depth.to_string(),
        record.qc.as_str().to_owned(),
        record.status.as_str().to_owned(),
    ]
}

/// Header line plus one line per record, newline separated with no
/// trailing newline. Fields are never quoted, so a comma inside a value
/// shifts columns.
pub fn render_csv(rows: &[FloatRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .context("write csv header")?;
    for record in rows {
        writer
            .write_record(csv_fields(record))
            .with_context(|| format!("write csv row for float {}", record.id))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow!("flush csv buffer: {}", err.error()))?;
    let mut text = String::from_utf8(bytes).context("csv output is not utf-8")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

pub fn export_file_name(today: Date) -> Result<String> {
    let stamp = today
        .format(format_description!("[year]-[month]-[day]"))
        .context("format export date")?;
    Ok(format!("argo_data_{stamp}.csv"))
}

/// Render `rows` and write them to `dir`, creating it if needed. Returns
/// the path written.
pub fn write_export(dir: &Path, today: Date, rows: &[FloatRecord]) -> Result<PathBuf> {
    let text = render_csv(rows)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("create export directory {}", dir.display()))?;
    let path = dir.join(export_file_name(today)?);
    fs::write(&path, text).with_context(|| {
        format!(
            "write export to {}; check that the directory is writable",
            path.display()
        )
    })?;
    info!(path = %path.display(), rows = rows.len(), mime = CSV_MIME_TYPE, "exported csv");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, render_csv};
    use anyhow::Result;
    use time::macros::date;

    #[test]
    fn empty_export_is_header_only() -> Result<()> {
        assert_eq!(
            render_csv(&[])?,
            "Float ID,Date,Latitude,Longitude,Temperature,Salinity,Depth,QC,Status"
        );
        Ok(())
    }

    #[test]
    fn file_name_uses_iso_date() -> Result<()> {
        assert_eq!(
            export_file_name(date!(2024 - 03 - 07))?,
            "argo_data_2024-03-07.csv"
        );
        Ok(())
    }
}
