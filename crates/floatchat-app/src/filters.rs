// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use crate::{MapMode, MonthStamp, ParamCode};

/// Inclusive `[min, max]` pair. Nothing enforces `min <= max`; an inverted
/// pair simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: MonthStamp,
    pub end: MonthStamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatOptions {
    pub trajectory: bool,
    pub adjusted: bool,
    pub qc_filter: bool,
    pub bgc_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub date_range: DateRange,
    pub latitude: Bounds,
    pub longitude: Bounds,
    pub depth_range: Bounds,
    pub selected_params: BTreeSet<ParamCode>,
    pub float_options: FloatOptions,
    pub map_mode: MapMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            date_range: DateRange {
                start: MonthStamp::saturating(2023, 1),
                end: MonthStamp::saturating(2024, 12),
            },
            latitude: Bounds::new(-90.0, 90.0),
            longitude: Bounds::new(-180.0, 180.0),
            depth_range: Bounds::new(0.0, 2000.0),
            selected_params: BTreeSet::from([ParamCode::Temp, ParamCode::Psal]),
            float_options: FloatOptions {
                trajectory: true,
                adjusted: true,
                qc_filter: false,
                bgc_only: false,
            },
            map_mode: MapMode::Flat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRangePatch {
    pub start: Option<MonthStamp>,
    pub end: Option<MonthStamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatOptionsPatch {
    pub trajectory: Option<bool>,
    pub adjusted: Option<bool>,
    pub qc_filter: Option<bool>,
    pub bgc_only: Option<bool>,
}

/// Partial update. `None` leaves the field alone; nested patches merge
/// key by key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterUpdate {
    pub date_range: Option<DateRangePatch>,
    pub latitude: Option<Bounds>,
    pub longitude: Option<Bounds>,
    pub depth_range: Option<Bounds>,
    pub selected_params: Option<BTreeSet<ParamCode>>,
    pub float_options: Option<FloatOptionsPatch>,
    pub map_mode: Option<MapMode>,
}

impl FilterUpdate {
    pub fn latitude(bounds: Bounds) -> Self {
        Self {
            latitude: Some(bounds),
            ..Self::default()
        }
    }

    pub fn longitude(bounds: Bounds) -> Self {
        Self {
            longitude: Some(bounds),
            ..Self::default()
        }
    }

    pub fn depth_range(bounds: Bounds) -> Self {
        Self {
            depth_range: Some(bounds),
            ..Self::default()
        }
    }

    pub fn map_mode(mode: MapMode) -> Self {
        Self {
            map_mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn float_options(patch: FloatOptionsPatch) -> Self {
        Self {
            float_options: Some(patch),
            ..Self::default()
        }
    }

    pub fn date_range(patch: DateRangePatch) -> Self {
        Self {
            date_range: Some(patch),
            ..Self::default()
        }
    }

    pub fn selected_params(params: BTreeSet<ParamCode>) -> Self {
        Self {
            selected_params: Some(params),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    DateRange,
    Latitude,
    Longitude,
    DepthRange,
    SelectedParams,
    FloatOptions,
    MapMode,
}

impl FilterState {
    /// Merge `update` in place and report which fields changed value.
    pub fn apply(&mut self, update: &FilterUpdate) -> Vec<FilterField> {
        let mut changed = Vec::new();

        if let Some(patch) = update.date_range {
            let next = DateRange {
                start: patch.start.unwrap_or(self.date_range.start),
                end: patch.end.unwrap_or(self.date_range.end),
            };
            replace(&mut self.date_range, next, FilterField::DateRange, &mut changed);
        }
        if let Some(bounds) = update.latitude {
            replace(&mut self.latitude, bounds, FilterField::Latitude, &mut changed);
        }
        if let Some(bounds) = update.longitude {
            replace(&mut self.longitude, bounds, FilterField::Longitude, &mut changed);
        }
        if let Some(bounds) = update.depth_range {
            replace(&mut self.depth_range, bounds, FilterField::DepthRange, &mut changed);
        }
        if let Some(params) = &update.selected_params {
            replace(
                &mut self.selected_params,
                params.clone(),
                FilterField::SelectedParams,
                &mut changed,
            );
        }
        if let Some(patch) = update.float_options {
            let current = self.float_options;
            let next = FloatOptions {
                trajectory: patch.trajectory.unwrap_or(current.trajectory),
                adjusted: patch.adjusted.unwrap_or(current.adjusted),
                qc_filter: patch.qc_filter.unwrap_or(current.qc_filter),
                bgc_only: patch.bgc_only.unwrap_or(current.bgc_only),
            };
            replace(&mut self.float_options, next, FilterField::FloatOptions, &mut changed);
        }
        if let Some(mode) = update.map_mode {
            replace(&mut self.map_mode, mode, FilterField::MapMode, &mut changed);
        }

        changed
    }

    /// Parameter set with `code` flipped in or out.
    pub fn params_toggling(&self, code: ParamCode) -> BTreeSet<ParamCode> {
        let mut params = self.selected_params.clone();
        if !params.remove(&code) {
            params.insert(code);
        }
        params
    }
}

fn replace<T: PartialEq>(
    slot: &mut T,
    value: T,
    field: FilterField,
    changed: &mut Vec<FilterField>,
) {
    if *slot != value {
        *slot = value;
        changed.push(field);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub type FilterListener = Box<dyn FnMut(&FilterState)>;

/// Owner of the session's filter state. Consumers get the store passed in
/// explicitly; every update goes through [`FilterStore::update`].
pub struct FilterStore {
    state: FilterState,
    revision: u64,
    listeners: Vec<(SubscriptionId, FilterListener)>,
    next_subscription: u64,
}

impl fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

impl FilterStore {
    pub fn new(state: FilterState) -> Self {
        Self {
            state,
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.state
    }

    /// Bumped on every update, changed or not.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn update(&mut self, update: FilterUpdate) -> Vec<FilterField> {
        let changed = self.state.apply(&update);
        self.revision = self.revision.saturating_add(1);
        debug!(revision = self.revision, changed = ?changed, "filters updated");
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        changed
    }

    pub fn subscribe(&mut self, listener: FilterListener) -> SubscriptionId {
        self.next_subscription = self.next_subscription.saturating_add(1);
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}
