// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

use crate::ids::FloatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QcFlag {
    Good,
    Questionable,
    Bad,
}

impl QcFlag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Questionable => "QUESTIONABLE",
            Self::Bad => "BAD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GOOD" => Some(Self::Good),
            "QUESTIONABLE" => Some(Self::Questionable),
            "BAD" => Some(Self::Bad),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatStatus {
    Active,
    Inactive,
}

impl FloatStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamCode {
    Temp,
    Psal,
    Pres,
    Doxy,
    Chla,
    Bbp,
    Cdom,
}

impl ParamCode {
    pub const ALL: [Self; 7] = [
        Self::Temp,
        Self::Psal,
        Self::Pres,
        Self::Doxy,
        Self::Chla,
        Self::Bbp,
        Self::Cdom,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temp => "TEMP",
            Self::Psal => "PSAL",
            Self::Pres => "PRES",
            Self::Doxy => "DOXY",
            Self::Chla => "CHLA",
            Self::Bbp => "BBP",
            Self::Cdom => "CDOM",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Temp => "Temperature",
            Self::Psal => "Salinity",
            Self::Pres => "Pressure",
            Self::Doxy => "Dissolved O2",
            Self::Chla => "Chlorophyll-a",
            Self::Bbp => "Backscatter",
            Self::Cdom => "CDOM",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapMode {
    Flat,
    Globe,
}

impl MapMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "2d",
            Self::Globe => "3d",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "2d" => Some(Self::Flat),
            "3d" => Some(Self::Globe),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Flat => Self::Globe,
            Self::Globe => Self::Flat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    Chat,
    Map,
    Profiles,
    Table,
}

impl ViewKind {
    pub const ALL: [Self; 4] = [Self::Chat, Self::Map, Self::Profiles, Self::Table];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Map => "map",
            Self::Profiles => "profiles",
            Self::Table => "table",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Search,
    Compose,
    Filters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Calendar month in `YYYY-MM` form, as used by the date range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthStamp {
    year: i32,
    month: u8,
}

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

impl MonthStamp {
    pub fn new(year: i32, month: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            bail!("year must be between 0 and 9999, got {year}");
        }
        if !(1..=12).contains(&month) {
            bail!("month must be between 1 and 12, got {month}");
        }
        Ok(Self { year, month })
    }

    /// Infallible constructor for literals; year and month are clamped into
    /// range.
    pub const fn saturating(year: i32, month: u8) -> Self {
        let year = if year < MIN_YEAR {
            MIN_YEAR
        } else if year > MAX_YEAR {
            MAX_YEAR
        } else {
            year
        };
        let month = if month < 1 {
            1
        } else if month > 12 {
            12
        } else {
            month
        };
        Self { year, month }
    }

    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let Some((year, month)) = trimmed.split_once('-') else {
            bail!("invalid month {trimmed:?}; use YYYY-MM (for example 2024-01)");
        };
        let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u8>()) else {
            bail!("invalid month {trimmed:?}; use YYYY-MM (for example 2024-01)");
        };
        Self::new(year, month)
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u8 {
        self.month
    }

    pub fn shifted(self, months: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let index = index.clamp(
            i64::from(MIN_YEAR) * 12,
            i64::from(MAX_YEAR) * 12 + 11,
        );
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u8,
        }
    }
}

impl fmt::Display for MonthStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for MonthStamp {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<MonthStamp> for String {
    fn from(value: MonthStamp) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub lat: f64,
    pub lng: f64,
    pub date: Date,
    pub temperature: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatRecord {
    pub id: FloatId,
    pub date: Date,
    pub lat: f64,
    pub lng: f64,
    pub depth: f64,
    pub temperature: f64,
    pub salinity: f64,
    pub pressure: f64,
    pub oxygen: Option<f64>,
    pub chlorophyll: Option<f64>,
    /// Carries the biogeochemical sensor suite. Set per float; a core float
    /// may still report a chlorophyll estimate.
    pub bgc: bool,
    pub status: FloatStatus,
    pub qc: QcFlag,
    pub platform: String,
    pub region: String,
    pub cycle: i64,
    pub battery: i64,
    pub trajectory: Vec<TrajectoryPoint>,
}

impl FloatRecord {
    pub fn bgc_enabled(&self) -> bool {
        self.bgc
    }

    /// String form of every scalar field, in column order.
    pub fn field_strings(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.to_string(),
            self.lat.to_string(),
            self.lng.to_string(),
            self.depth.to_string(),
            self.temperature.to_string(),
            self.salinity.to_string(),
            self.pressure.to_string(),
            self.oxygen.map(|value| value.to_string()).unwrap_or_default(),
            self.chlorophyll
                .map(|value| value.to_string())
                .unwrap_or_default(),
            self.status.as_str().to_owned(),
            self.qc.as_str().to_owned(),
            self.platform.clone(),
            self.region.clone(),
            self.cycle.to_string(),
            self.battery.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileParameter {
    Temperature,
    Salinity,
    Pressure,
}

impl ProfileParameter {
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Salinity, Self::Pressure];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::Pressure => "pressure",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Salinity => "PSU",
            Self::Pressure => "dbar",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|parameter| *parameter == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileLevel {
    pub depth: f64,
    pub temperature: f64,
    pub salinity: f64,
    pub pressure: f64,
}

impl ProfileLevel {
    pub const fn value(&self, parameter: ProfileParameter) -> f64 {
        match parameter {
            ProfileParameter::Temperature => self.temperature,
            ProfileParameter::Salinity => self.salinity,
            ProfileParameter::Pressure => self.pressure,
        }
    }
}

/// Per-profile summary of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub max_depth: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub float_id: FloatId,
    pub region: String,
    pub date: Date,
    pub levels: Vec<ProfileLevel>,
}

impl Profile {
    /// `None` when no levels are left, e.g. after depth clipping.
    pub fn stats(&self, parameter: ProfileParameter) -> Option<ProfileStats> {
        let (min, max) = self.value_range(parameter)?;
        let total: f64 = self.levels.iter().map(|level| level.value(parameter)).sum();
        let max_depth = self
            .levels
            .iter()
            .map(|level| level.depth)
            .fold(f64::NEG_INFINITY, f64::max);
        Some(ProfileStats {
            mean: total / self.levels.len() as f64,
            min,
            max,
            max_depth,
        })
    }

    pub fn value_range(&self, parameter: ProfileParameter) -> Option<(f64, f64)> {
        self.levels.iter().map(|level| level.value(parameter)).fold(
            None,
            |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            },
        )
    }
}
