// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use floatchat_app::{
    Bounds, DateRangePatch, FilterState, FilterUpdate, FloatOptionsPatch, MonthStamp, PageSize,
    ParamCode, ViewKind,
};
use floatchat_assistant::DelayRange;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "floatchat";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_MIN_DELAY: &str = "1500ms";
const DEFAULT_MAX_DELAY: &str = "2500ms";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub assistant: Assistant,
    #[serde(default)]
    pub table: Table,
    #[serde(default)]
    pub export: Export,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            assistant: Assistant::default(),
            table: Table::default(),
            export: Export::default(),
            filters: Filters::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assistant {
    pub min_delay: Option<String>,
    pub max_delay: Option<String>,
    pub seed: Option<u64>,
}

impl Default for Assistant {
    fn default() -> Self {
        Self {
            min_delay: Some(DEFAULT_MIN_DELAY.to_owned()),
            max_delay: Some(DEFAULT_MAX_DELAY.to_owned()),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    pub page_size: Option<usize>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            page_size: Some(PageSize::default().get()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Export {
    pub dir: Option<String>,
}

/// Startup overrides merged into the default filter state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filters {
    pub latitude: Option<[f64; 2]>,
    pub longitude: Option<[f64; 2]>,
    pub depth_range: Option<[f64; 2]>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub params: Option<Vec<String>>,
    pub qc_filter: Option<bool>,
    pub bgc_only: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_view: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_view: Some(ViewKind::Chat.label().to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("FLOATCHAT_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set FLOATCHAT_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` at the top",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        self.reply_delays()
            .with_context(|| format!("invalid [assistant] delays in {}", path.display()))?;
        self.page_size()
            .with_context(|| format!("invalid [table] section in {}", path.display()))?;
        self.start_view()
            .with_context(|| format!("invalid [ui] section in {}", path.display()))?;
        self.startup_filters()
            .with_context(|| format!("invalid [filters] section in {}", path.display()))?;
        Ok(())
    }

    pub fn reply_delays(&self) -> Result<DelayRange> {
        let min = parse_duration(
            self.assistant
                .min_delay
                .as_deref()
                .unwrap_or(DEFAULT_MIN_DELAY),
        )?;
        let max = parse_duration(
            self.assistant
                .max_delay
                .as_deref()
                .unwrap_or(DEFAULT_MAX_DELAY),
        )?;
        DelayRange::new(min, max)
    }

    pub fn reply_seed(&self) -> Option<u64> {
        self.assistant.seed
    }

    pub fn page_size(&self) -> Result<PageSize> {
        let count = self.table.page_size.unwrap_or(PageSize::default().get());
        PageSize::from_count(count)
            .ok_or_else(|| anyhow!("table.page_size must be one of 5, 10, 25 or 50, got {count}"))
    }

    pub fn start_view(&self) -> Result<ViewKind> {
        let raw = self
            .ui
            .start_view
            .as_deref()
            .unwrap_or(ViewKind::Chat.label());
        ViewKind::parse(raw.trim()).ok_or_else(|| {
            anyhow!("ui.start_view must be one of chat, map, profiles or table, got {raw:?}")
        })
    }

    /// Export target: `[export].dir`, else the platform download directory,
    /// else the working directory.
    pub fn export_dir(&self) -> PathBuf {
        match &self.export.dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn startup_filters(&self) -> Result<FilterState> {
        let overrides = &self.filters;
        let mut update = FilterUpdate::default();
        if let Some(pair) = overrides.latitude {
            update.latitude = Some(bounds("filters.latitude", pair, -90.0, 90.0)?);
        }
        if let Some(pair) = overrides.longitude {
            update.longitude = Some(bounds("filters.longitude", pair, -180.0, 180.0)?);
        }
        if let Some(pair) = overrides.depth_range {
            update.depth_range = Some(bounds("filters.depth_range", pair, 0.0, f64::MAX)?);
        }

        let start = overrides
            .date_start
            .as_deref()
            .map(MonthStamp::parse)
            .transpose()
            .context("filters.date_start")?;
        let end = overrides
            .date_end
            .as_deref()
            .map(MonthStamp::parse)
            .transpose()
            .context("filters.date_end")?;
        if start.is_some() || end.is_some() {
            update.date_range = Some(DateRangePatch { start, end });
        }

        if let Some(params) = &overrides.params {
            let mut codes = BTreeSet::new();
            for raw in params {
                let code = ParamCode::parse(raw).ok_or_else(|| {
                    anyhow!(
                        "unknown parameter {raw:?} in filters.params; use TEMP, PSAL, PRES, DOXY, CHLA, BBP or CDOM"
                    )
                })?;
                codes.insert(code);
            }
            update.selected_params = Some(codes);
        }

        if overrides.qc_filter.is_some() || overrides.bgc_only.is_some() {
            update.float_options = Some(FloatOptionsPatch {
                qc_filter: overrides.qc_filter,
                bgc_only: overrides.bgc_only,
                ..FloatOptionsPatch::default()
            });
        }

        let mut state = FilterState::default();
        state.apply(&update);
        if state.date_range.start > state.date_range.end {
            bail!(
                "filters.date_start ({}) is after filters.date_end ({})",
                state.date_range.start,
                state.date_range.end
            );
        }
        Ok(state)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# floatchat config\n# Place this file at: {}\n\nversion = 1\n\n[assistant]\nmin_delay = \"{}\"\nmax_delay = \"{}\"\n# Optional. Fixes the reply sequence for demos and tests.\n# seed = 42\n\n[table]\npage_size = {}\n\n[export]\n# Optional. Default is the platform download directory.\n# dir = \"/absolute/path/to/exports\"\n\n[filters]\n# latitude = [-90.0, 90.0]\n# longitude = [-180.0, 180.0]\n# depth_range = [0.0, 2000.0]\n# date_start = \"2023-01\"\n# date_end = \"2024-12\"\n# params = [\"TEMP\", \"PSAL\"]\n# qc_filter = false\n# bgc_only = false\n\n[ui]\nstart_view = \"chat\"\n",
            path.display(),
            DEFAULT_MIN_DELAY,
            DEFAULT_MAX_DELAY,
            PageSize::default().get(),
        )
    }
}

fn bounds(name: &str, pair: [f64; 2], lowest: f64, highest: f64) -> Result<Bounds> {
    let [min, max] = pair;
    if !(min.is_finite() && max.is_finite()) {
        bail!("{name} must hold two finite numbers");
    }
    if min > max {
        bail!("{name} minimum {min} is greater than maximum {max}");
    }
    if min < lowest || max > highest {
        bail!("{name} must stay within {lowest} to {highest}, got {min} to {max}");
    }
    Ok(Bounds::new(min, max))
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid delay duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid delay duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid delay duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 2s)")
}
