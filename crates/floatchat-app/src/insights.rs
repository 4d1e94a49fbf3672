// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{FloatRecord, FloatStatus, QcFlag};

/// Map legend counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetCounts {
    pub active: usize,
    pub inactive: usize,
    pub bgc: usize,
}

impl FleetCounts {
    pub fn from_rows(rows: &[FloatRecord]) -> Self {
        rows.iter().fold(Self::default(), |mut counts, row| {
            match row.status {
                FloatStatus::Active => counts.active += 1,
                FloatStatus::Inactive => counts.inactive += 1,
            }
            if row.bgc_enabled() {
                counts.bgc += 1;
            }
            counts
        })
    }
}

/// Summary shown beside the table, computed over every filtered row rather
/// than the visible page. Averages are `None` for an empty row set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TableInsights {
    pub rows: usize,
    pub active: usize,
    pub good_qc: usize,
    pub mean_temperature: Option<f64>,
    pub temperature_range: Option<(f64, f64)>,
    pub mean_salinity: Option<f64>,
    pub max_depth: Option<f64>,
}

impl TableInsights {
    pub fn from_rows(rows: &[FloatRecord]) -> Self {
        let count = rows.len();
        let mean = |value: fn(&FloatRecord) -> f64| {
            (count > 0).then(|| rows.iter().map(value).sum::<f64>() / count as f64)
        };
        let temperature_range = rows.iter().fold(None, |range, row| match range {
            None => Some((row.temperature, row.temperature)),
            Some((low, high)) => Some((
                f64::min(low, row.temperature),
                f64::max(high, row.temperature),
            )),
        });
        Self {
            rows: count,
            active: rows
                .iter()
                .filter(|row| row.status == FloatStatus::Active)
                .count(),
            good_qc: rows.iter().filter(|row| row.qc == QcFlag::Good).count(),
            mean_temperature: mean(|row| row.temperature),
            temperature_range,
            mean_salinity: mean(|row| row.salinity),
            max_depth: rows.iter().map(|row| row.depth).reduce(f64::max),
        }
    }

    /// Share of rows with GOOD QC, 0 for no rows.
    pub fn good_qc_percent(&self) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        self.good_qc as f64 * 100.0 / self.rows as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{FleetCounts, TableInsights};
    use crate::ids::FloatId;
    use crate::model::{FloatRecord, FloatStatus, QcFlag};
    use time::macros::date;

    fn row(
        status: FloatStatus,
        qc: QcFlag,
        bgc: bool,
        depth: f64,
        temperature: f64,
    ) -> FloatRecord {
        FloatRecord {
            id: FloatId::new(1),
            date: date!(2024 - 01 - 15),
            lat: 0.0,
            lng: 0.0,
            depth,
            temperature,
            salinity: 35.0,
            pressure: depth / 10.0,
            oxygen: None,
            chlorophyll: None,
            bgc,
            status,
            qc,
            platform: "APEX".to_owned(),
            region: "Indian Ocean".to_owned(),
            cycle: 1,
            battery: 80,
            trajectory: Vec::new(),
        }
    }

    fn sample() -> Vec<FloatRecord> {
        vec![
            row(FloatStatus::Active, QcFlag::Good, true, 1500.0, 10.0),
            row(FloatStatus::Inactive, QcFlag::Questionable, false, 2000.0, 4.0),
            row(FloatStatus::Active, QcFlag::Good, false, 800.0, 16.0),
            row(FloatStatus::Active, QcFlag::Bad, true, 1200.0, 12.0),
        ]
    }

    #[test]
    fn fleet_counts_split_by_status_and_bgc() {
        assert_eq!(
            FleetCounts::from_rows(&sample()),
            FleetCounts {
                active: 3,
                inactive: 1,
                bgc: 2,
            }
        );
        assert_eq!(FleetCounts::from_rows(&[]), FleetCounts::default());
    }

    #[test]
    fn table_insights_cover_every_row() {
        let insights = TableInsights::from_rows(&sample());
        assert_eq!(insights.rows, 4);
        assert_eq!(insights.active, 3);
        assert_eq!(insights.good_qc, 2);
        assert_eq!(insights.good_qc_percent(), 50.0);
        assert_eq!(insights.mean_temperature, Some(10.5));
        assert_eq!(insights.temperature_range, Some((4.0, 16.0)));
        assert_eq!(insights.mean_salinity, Some(35.0));
        assert_eq!(insights.max_depth, Some(2000.0));
    }

    #[test]
    fn empty_rows_yield_no_averages() {
        let insights = TableInsights::from_rows(&[]);
        assert_eq!(insights, TableInsights::default());
        assert_eq!(insights.good_qc_percent(), 0.0);
        assert!(insights.good_qc_percent().is_finite());
    }
}
