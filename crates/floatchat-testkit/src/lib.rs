// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use floatchat_app::{
    FloatId, FloatRecord, FloatStatus, Profile, ProfileLevel, QcFlag, ReplySource,
    TrajectoryPoint,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::path::PathBuf;
use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime};

const REGIONS: [&str; 8] = [
    "North Atlantic",
    "South Atlantic",
    "North Pacific",
    "South Pacific",
    "Indian Ocean",
    "Southern Ocean",
    "Arabian Sea",
    "Mediterranean Sea",
];

const PLATFORMS: [&str; 4] = ["APEX", "NOVA", "NAVIS", "ARVOR"];

const PROFILE_DEPTHS: [f64; 10] = [
    0.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 1500.0, 2000.0,
];

/// Seeded generator of plausible float records and profiles. The same seed
/// always yields the same sequence.
#[derive(Debug, Clone)]
pub struct FloatFaker {
    rng: StdRng,
    seed: u64,
    next_id: i64,
}

impl FloatFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            next_id: 6_900_000,
        }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub fn float_record(&mut self) -> FloatRecord {
        let region = self.pick(&REGIONS);
        self.float_in_region(region)
    }

    pub fn float_in_region(&mut self, region: &str) -> FloatRecord {
        self.next_id += 1;
        let bgc = self.rng.random_bool(0.5);
        let lat = self.coordinate(-70.0, 70.0);
        let lng = self.coordinate(-180.0, 180.0);
        let depth = f64::from(self.rng.random_range(100_u32..=2100) / 50 * 50);
        let temperature = self.reading(-1.5, 30.0);
        let date = self.date_between(date!(2023 - 01 - 01), date!(2024 - 12 - 31));
        let trajectory = (0..self.rng.random_range(0_i64..=3))
            .map(|step| TrajectoryPoint {
                lat: lat - 0.1 * step as f64,
                lng: lng - 0.1 * step as f64,
                date: date - Duration::days(step),
                temperature: temperature - 0.2 * step as f64,
                depth,
            })
            .collect();

        FloatRecord {
            id: FloatId::new(self.next_id),
            date,
            lat,
            lng,
            depth,
            temperature,
            salinity: self.reading(33.0, 37.5),
            pressure: depth / 10.0 + self.reading(0.0, 5.0),
            oxygen: bgc.then(|| self.reading(150.0, 400.0)),
            chlorophyll: bgc.then(|| self.reading(0.01, 0.6)),
            bgc,
            status: if self.rng.random_bool(0.85) {
                FloatStatus::Active
            } else {
                FloatStatus::Inactive
            },
            qc: match self.rng.random_range(0..10) {
                0 => QcFlag::Bad,
                1 | 2 => QcFlag::Questionable,
                _ => QcFlag::Good,
            },
            platform: self.pick(&PLATFORMS).to_owned(),
            region: region.to_owned(),
            cycle: self.rng.random_range(1..=300),
            battery: self.rng.random_range(5..=100),
            trajectory,
        }
    }

    pub fn floats(&mut self, count: usize) -> Vec<FloatRecord> {
        (0..count).map(|_| self.float_record()).collect()
    }

    /// Ten-level profile with temperature falling and salinity wobbling
    /// with depth.
    pub fn profile(&mut self, record: &FloatRecord) -> Profile {
        let surface = record.temperature;
        let base_salinity = record.salinity;
        let levels = PROFILE_DEPTHS
            .iter()
            .enumerate()
            .map(|(index, &depth)| ProfileLevel {
                depth,
                temperature: round1(surface - (surface - 2.5) * (index as f64 / 9.0)),
                salinity: round1(base_salinity + self.reading(-0.4, 0.4)),
                pressure: depth,
            })
            .collect();
        Profile {
            float_id: record.id,
            region: record.region.clone(),
            date: record.date,
            levels,
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.random_range(0..items.len())]
    }

    fn coordinate(&mut self, min: f64, max: f64) -> f64 {
        round1(self.rng.random_range(min..=max))
    }

    fn reading(&mut self, min: f64, max: f64) -> f64 {
        (self.rng.random_range(min..=max) * 100.0).round() / 100.0
    }

    fn date_between(&mut self, start: Date, end: Date) -> Date {
        let span = (end - start).whole_days();
        if span <= 0 {
            return start;
        }
        start + Duration::days(self.rng.random_range(0..=span))
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reply source that replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<f64>,
    pending: VecDeque<f64>,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let script: Vec<f64> = values.into_iter().collect();
        Self {
            pending: script.iter().copied().collect(),
            script,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl ReplySource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.pending.is_empty() {
            self.pending.extend(self.script.iter().copied());
        }
        self.pending.pop_front().unwrap_or(0.0)
    }
}

pub fn temp_export_dir() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let export_dir = dir.path().join("exports");
    Ok((dir, export_dir))
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("floatchat").join("config.toml");
    Ok((dir, path))
}

pub fn fixture_now() -> OffsetDateTime {
    datetime!(2024-01-15 12:34:56 UTC)
}
