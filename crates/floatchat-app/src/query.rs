// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::{FilterState, FloatRecord, Profile, ProfileLevel, QcFlag, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Date,
    Lat,
    Lng,
    Depth,
    Temperature,
    Salinity,
    Pressure,
    Oxygen,
    Chlorophyll,
    Status,
    Qc,
    Platform,
    Region,
    Cycle,
    Battery,
}

impl SortKey {
    pub const ALL: [Self; 16] = [
        Self::Id,
        Self::Date,
        Self::Lat,
        Self::Lng,
        Self::Depth,
        Self::Temperature,
        Self::Salinity,
        Self::Pressure,
        Self::Oxygen,
        Self::Chlorophyll,
        Self::Status,
        Self::Qc,
        Self::Platform,
        Self::Region,
        Self::Cycle,
        Self::Battery,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "Float ID",
            Self::Date => "Date",
            Self::Lat => "Latitude",
            Self::Lng => "Longitude",
            Self::Depth => "Depth",
            Self::Temperature => "Temperature",
            Self::Salinity => "Salinity",
            Self::Pressure => "Pressure",
            Self::Oxygen => "Oxygen",
            Self::Chlorophyll => "Chlorophyll",
            Self::Status => "Status",
            Self::Qc => "QC",
            Self::Platform => "Platform",
            Self::Region => "Region",
            Self::Cycle => "Cycle",
            Self::Battery => "Battery",
        }
    }

    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::Id | Self::Date | Self::Status | Self::Qc | Self::Platform | Self::Region
        )
    }

    fn text(self, record: &FloatRecord) -> String {
        match self {
            Self::Id => record.id.to_string(),
            Self::Date => record.date.to_string(),
            Self::Status => record.status.as_str().to_owned(),
            Self::Qc => record.qc.as_str().to_owned(),
            Self::Platform => record.platform.clone(),
            Self::Region => record.region.clone(),
            _ => String::new(),
        }
    }

    fn number(self, record: &FloatRecord) -> Option<f64> {
        match self {
            Self::Lat => Some(record.lat),
            Self::Lng => Some(record.lng),
            Self::Depth => Some(record.depth),
            Self::Temperature => Some(record.temperature),
            Self::Salinity => Some(record.salinity),
            Self::Pressure => Some(record.pressure),
            Self::Oxygen => record.oxygen,
            Self::Chlorophyll => record.chlorophyll,
            Self::Cycle => Some(record.cycle as f64),
            Self::Battery => Some(record.battery as f64),
            _ => None,
        }
    }

    /// Ascending comparison. Text ignores case, falling back to byte order
    /// on a case-only tie; missing readings sort after present ones.
    fn compare(self, left: &FloatRecord, right: &FloatRecord) -> Ordering {
        if self.is_text() {
            let (left, right) = (self.text(left), self.text(right));
            return left
                .to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(&right));
        }
        match (self.number(left), self.number(right)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Same key flips direction; a new key starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Asc,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [Self; 4] = [Self::Five, Self::Ten, Self::TwentyFive, Self::Fifty];

    pub const fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
        }
    }

    pub fn from_count(count: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == count)
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Five => Self::Ten,
            Self::Ten => Self::TwentyFive,
            Self::TwentyFive => Self::Fifty,
            Self::Fifty => Self::Five,
        }
    }
}

/// Which predicates a view applies. QC and BGC toggles always apply; the
/// date range is edited in the panel but filters no view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterScope {
    pub spatial: bool,
    pub depth: bool,
}

impl FilterScope {
    pub const MAP: Self = Self {
        spatial: true,
        depth: true,
    };
    pub const TABLE: Self = Self {
        spatial: false,
        depth: false,
    };
    pub const PROFILES: Self = Self {
        spatial: false,
        depth: false,
    };
}

fn matches_search(record: &FloatRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record
        .field_strings()
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
}

pub fn record_matches(
    record: &FloatRecord,
    filters: &FilterState,
    scope: FilterScope,
    search: &str,
) -> bool {
    let options = filters.float_options;
    if options.qc_filter && record.qc != QcFlag::Good {
        return false;
    }
    if options.bgc_only && !record.bgc_enabled() {
        return false;
    }
    if scope.spatial
        && !(filters.latitude.contains(record.lat) && filters.longitude.contains(record.lng))
    {
        return false;
    }
    if scope.depth && !filters.depth_range.contains(record.depth) {
        return false;
    }
    matches_search(record, &search.trim().to_lowercase())
}

/// Records passing every active predicate, in input order.
pub fn filter_records(
    records: &[FloatRecord],
    filters: &FilterState,
    scope: FilterScope,
    search: &str,
) -> Vec<FloatRecord> {
    records
        .iter()
        .filter(|record| record_matches(record, filters, scope, search))
        .cloned()
        .collect()
}

/// Stable sort; ties keep their input order in both directions.
pub fn sort_records(records: &mut [FloatRecord], sort: SortSpec) {
    records.sort_by(|left, right| {
        let ordering = sort.key.compare(left, right);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn total_pages(total_rows: usize, page_size: PageSize) -> usize {
    total_rows.div_ceil(page_size.get()).max(1)
}

pub fn clamp_page(page: usize, total_rows: usize, page_size: PageSize) -> usize {
    page.clamp(1, total_pages(total_rows, page_size))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<FloatRecord>,
    /// 1-based, already clamped.
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub page_size: PageSize,
}

impl Page {
    /// 1-based index of the first row shown, 0 when empty.
    pub fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size.get() + 1
        }
    }

    pub fn last_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_row() + self.rows.len() - 1
        }
    }
}

pub fn paginate(records: &[FloatRecord], page: usize, page_size: PageSize) -> Page {
    let page = clamp_page(page, records.len(), page_size);
    let start = (page - 1) * page_size.get();
    let rows = records
        .iter()
        .skip(start)
        .take(page_size.get())
        .cloned()
        .collect();
    Page {
        rows,
        page,
        total_pages: total_pages(records.len(), page_size),
        total_rows: records.len(),
        page_size,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableQuery {
    pub search: String,
    pub sort: SortSpec,
    pub page_size: PageSize,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableResult {
    /// Every row passing the filters, sorted. Export reads from here.
    pub filtered: Vec<FloatRecord>,
    pub page: Page,
}

impl TableQuery {
    pub fn run(&self, records: &[FloatRecord], filters: &FilterState) -> TableResult {
        let mut filtered = filter_records(records, filters, FilterScope::TABLE, &self.search);
        sort_records(&mut filtered, self.sort);
        let page = paginate(&filtered, self.page, self.page_size);
        TableResult { filtered, page }
    }
}

/// Profiles whose float passes the QC and BGC toggles, with levels clipped
/// to the depth range. Profiles without a matching float record are kept.
pub fn profiles_in_scope(
    profiles: &[Profile],
    records: &[FloatRecord],
    filters: &FilterState,
) -> Vec<Profile> {
    profiles
        .iter()
        .filter(|profile| {
            records
                .iter()
                .find(|record| record.id == profile.float_id)
                .is_none_or(|record| record_matches(record, filters, FilterScope::PROFILES, ""))
        })
        .map(|profile| Profile {
            levels: clip_levels(&profile.levels, filters),
            ..profile.clone()
        })
        .collect()
}

pub fn clip_levels(levels: &[ProfileLevel], filters: &FilterState) -> Vec<ProfileLevel> {
    levels
        .iter()
        .filter(|level| filters.depth_range.contains(level.depth))
        .copied()
        .collect()
}
