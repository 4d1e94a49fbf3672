// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use floatchat_app::{
    FloatId, FloatRecord, FloatStatus, Profile, ProfileLevel, QcFlag, TrajectoryPoint,
};
use time::Date;
use time::macros::date;

/// Reference data shared by every view. Built once at startup and never
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    floats: Vec<FloatRecord>,
    profiles: Vec<Profile>,
}

impl Dataset {
    pub fn new(floats: Vec<FloatRecord>, profiles: Vec<Profile>) -> Self {
        Self { floats, profiles }
    }

    /// The bundled ARGO sample: seven floats, four with recent trajectories,
    /// three with full depth profiles.
    pub fn builtin() -> Self {
        Self::new(builtin_floats(), builtin_profiles())
    }

    pub fn floats(&self) -> &[FloatRecord] {
        &self.floats
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn float(&self, id: FloatId) -> Option<&FloatRecord> {
        self.floats.iter().find(|record| record.id == id)
    }
}

struct Row {
    id: i64,
    date: Date,
    lat: f64,
    lng: f64,
    depth: f64,
    temperature: f64,
    salinity: f64,
    pressure: f64,
    oxygen: f64,
    chlorophyll: f64,
    bgc: bool,
    status: FloatStatus,
    qc: QcFlag,
    platform: &'static str,
    region: &'static str,
    cycle: i64,
    battery: i64,
}

impl Row {
    fn into_record(self, trajectory: &[(f64, f64, Date, f64, f64)]) -> FloatRecord {
        FloatRecord {
            id: FloatId::new(self.id),
            date: self.date,
            lat: self.lat,
            lng: self.lng,
            depth: self.depth,
            temperature: self.temperature,
            salinity: self.salinity,
            pressure: self.pressure,
            oxygen: Some(self.oxygen),
            chlorophyll: Some(self.chlorophyll),
            bgc: self.bgc,
            status: self.status,
            qc: self.qc,
            platform: self.platform.to_owned(),
            region: self.region.to_owned(),
            cycle: self.cycle,
            battery: self.battery,
            trajectory: trajectory
                .iter()
                .map(|&(lat, lng, date, temperature, depth)| TrajectoryPoint {
                    lat,
                    lng,
                    date,
                    temperature,
                    depth,
                })
                .collect(),
        }
    }
}

// 5906298 and 5906301 report chlorophyll but are core floats, not BGC.
fn builtin_floats() -> Vec<FloatRecord> {
    vec![
        Row {
            id: 5906298,
            date: date!(2024 - 01 - 15),
            lat: 35.2,
            lng: -65.8,
            depth: 2000.0,
            temperature: 18.5,
            salinity: 35.2,
            pressure: 203.1,
            oxygen: 256.8,
            chlorophyll: 0.18,
            bgc: false,
            status: FloatStatus::Active,
            qc: QcFlag::Good,
            platform: "APEX",
            region: "North Atlantic",
            cycle: 127,
            battery: 85,
        }
        .into_record(&[
            (35.2, -65.8, date!(2024 - 01 - 15), 18.5, 2000.0),
            (35.1, -65.9, date!(2024 - 01 - 14), 18.2, 1980.0),
            (35.0, -66.0, date!(2024 - 01 - 13), 18.0, 1950.0),
        ]),
        Row {
            id: 5906299,
            date: date!(2024 - 01 - 14),
            lat: 40.1,
            lng: -70.2,
            depth: 1800.0,
            temperature: 15.2,
            salinity: 35.8,
            pressure: 182.4,
            oxygen: 289.1,
            chlorophyll: 0.24,
            bgc: true,
            status: FloatStatus::Active,
            qc: QcFlag::Good,
            platform: "NOVA",
            region: "North Atlantic",
            cycle: 89,
            battery: 92,
        }
        .into_record(&[
            (40.1, -70.2, date!(2024 - 01 - 14), 15.2, 1800.0),
            (40.0, -70.3, date!(2024 - 01 - 13), 15.0, 1780.0),
        ]),
        Row {
            id: 5906300,
            date: date!(2024 - 01 - 13),
            lat: -20.5,
            lng: 115.3,
            depth: 1850.0,
            temperature: 22.8,
            salinity: 34.6,
            pressure: 187.2,
            oxygen: 198.5,
            chlorophyll: 0.31,
            bgc: true,
            status: FloatStatus::Active,
            qc: QcFlag::Good,
            platform: "APEX",
            region: "Indian Ocean",
            cycle: 156,
            battery: 78,
        }
        .into_record(&[
            (-20.5, 115.3, date!(2024 - 01 - 13), 22.8, 1850.0),
            (-20.4, 115.2, date!(2024 - 01 - 12), 22.5, 1830.0),
        ]),
        Row {
            id: 5906301,
            date: date!(2024 - 01 - 12),
            lat: 35.7,
            lng: 139.7,
            depth: 1950.0,
            temperature: 16.4,
            salinity: 34.1,
            pressure: 198.7,
            oxygen: 267.3,
            chlorophyll: 0.15,
            bgc: false,
            status: FloatStatus::Active,
            qc: QcFlag::Good,
            platform: "NAVIS",
            region: "North Pacific",
            cycle: 134,
            battery: 89,
        }
        .into_record(&[
            (35.7, 139.7, date!(2024 - 01 - 12), 16.4, 1950.0),
            (35.6, 139.8, date!(2024 - 01 - 11), 16.2, 1920.0),
        ]),
        Row {
            id: 5906302,
            date: date!(2024 - 01 - 11),
            lat: -45.2,
            lng: -60.1,
            depth: 2050.0,
            temperature: 8.9,
            salinity: 34.2,
            pressure: 205.4,
            oxygen: 312.7,
            chlorophyll: 0.08,
            bgc: true,
            status: FloatStatus::Active,
            qc: QcFlag::Good,
            platform: "APEX",
            region: "South Atlantic",
            cycle: 178,
            battery: 67,
        }
        .into_record(&[]),
        Row {
            id: 5906303,
            date: date!(2024 - 01 - 10),
            lat: 65.2,
            lng: -18.5,
            depth: 1750.0,
            temperature: 4.2,
            salinity: 35.1,
            pressure: 176.8,
            oxygen: 398.2,
            chlorophyll: 0.42,
            bgc: true,
            status: FloatStatus::Active,
            qc: QcFlag::Good,
            platform: "NOVA",
            region: "North Atlantic",
            cycle: 203,
            battery: 94,
        }
        .into_record(&[]),
        Row {
            id: 5906304,
            date: date!(2024 - 01 - 05),
            lat: -35.8,
            lng: 175.2,
            depth: 1900.0,
            temperature: 14.7,
            salinity: 34.8,
            pressure: 192.3,
            oxygen: 245.1,
            chlorophyll: 0.19,
            bgc: true,
            status: FloatStatus::Inactive,
            qc: QcFlag::Questionable,
            platform: "APEX",
            region: "South Pacific",
            cycle: 245,
            battery: 23,
        }
        .into_record(&[]),
    ]
}

const STANDARD_DEPTHS: [f64; 9] = [0.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 1500.0];

fn profile(
    id: i64,
    region: &str,
    date: Date,
    bottom: f64,
    temperature: [f64; 10],
    salinity: [f64; 10],
) -> Profile {
    let depths = STANDARD_DEPTHS.iter().copied().chain(std::iter::once(bottom));
    let levels = depths
        .zip(temperature)
        .zip(salinity)
        .map(|((depth, temperature), salinity)| ProfileLevel {
            depth,
            temperature,
            salinity,
            // dbar, tracking depth in metres.
            pressure: depth,
        })
        .collect();
    Profile {
        float_id: FloatId::new(id),
        region: region.to_owned(),
        date,
        levels,
    }
}

fn builtin_profiles() -> Vec<Profile> {
    vec![
        profile(
            5906298,
            "North Atlantic",
            date!(2024 - 01 - 15),
            2000.0,
            [18.5, 18.2, 17.8, 16.5, 14.2, 11.8, 8.5, 5.2, 3.8, 2.9],
            [35.2, 35.3, 35.4, 35.6, 35.8, 35.9, 35.7, 35.1, 34.9, 34.8],
        ),
        profile(
            5906299,
            "North Atlantic",
            date!(2024 - 01 - 14),
            1800.0,
            [15.2, 15.0, 14.8, 14.2, 12.8, 10.5, 7.8, 4.9, 3.5, 2.8],
            [35.8, 35.9, 36.0, 36.1, 36.0, 35.8, 35.5, 35.0, 34.8, 34.7],
        ),
        profile(
            5906300,
            "Indian Ocean",
            date!(2024 - 01 - 13),
            1850.0,
            [22.8, 22.5, 21.9, 20.1, 17.8, 14.2, 9.8, 6.1, 4.2, 3.1],
            [34.6, 34.7, 34.8, 35.0, 35.2, 35.4, 35.1, 34.8, 34.6, 34.5],
        ),
    ]
}
