use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{coerce_number, coerce_optional_number};
use crate::data::loader::{RawRow, load_csv_rows, read_csv_rows};
use crate::error::ChartResult;

const TEXT_COLUMNS: [&str; 3] = ["country", "leader", "gender"];
const FIELD_COLUMNS: [&str; 8] = [
    "start_year",
    "end_year",
    "start_age",
    "end_age",
    "duration",
    "pcgdp",
    "label",
    "id",
];
const MISSING_GDP: &str = "NA";

/// One national leader tenure.
///
/// Columns other than the typed ones (`oecd`, `eu27`, `brics`, ...) are group
/// membership flags and live in `memberships`, keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRecord {
    pub id: Option<i64>,
    pub leader: String,
    pub country: String,
    pub gender: String,
    pub start_year: f64,
    pub end_year: f64,
    pub start_age: f64,
    pub end_age: f64,
    pub duration: f64,
    /// GDP per capita; `None` where the source says `NA`.
    pub pcgdp: Option<f64>,
    /// `1` marks a leader drawn with emphasis.
    pub label: f64,
    pub memberships: IndexMap<String, f64>,
}

impl LeaderRecord {
    #[must_use]
    pub fn new(id: i64, leader: impl Into<String>, gender: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            leader: leader.into(),
            country: String::new(),
            gender: gender.into(),
            start_year: f64::NAN,
            end_year: f64::NAN,
            start_age: f64::NAN,
            end_age: f64::NAN,
            duration: 0.0,
            pcgdp: None,
            label: 0.0,
            memberships: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    #[must_use]
    pub fn with_tenure(mut self, start_year: f64, end_year: f64) -> Self {
        self.start_year = start_year;
        self.end_year = end_year;
        self.duration = end_year - start_year;
        self
    }

    #[must_use]
    pub fn with_ages(mut self, start_age: f64, end_age: f64) -> Self {
        self.start_age = start_age;
        self.end_age = end_age;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_pcgdp(mut self, pcgdp: Option<f64>) -> Self {
        self.pcgdp = pcgdp;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: f64) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn with_membership(mut self, group: impl Into<String>, flag: f64) -> Self {
        self.memberships.insert(group.into(), flag);
        self
    }

    /// Whether this leader belongs to `group` (flag column equal to `1`).
    #[must_use]
    pub fn is_member_of(&self, group: &str) -> bool {
        self.memberships.get(group).is_some_and(|flag| *flag == 1.0)
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.label == 1.0
    }

    fn from_row(row: &RawRow) -> Self {
        let id = row.number("id");
        let memberships = row
            .columns()
            .filter(|(column, _)| {
                !TEXT_COLUMNS.contains(column) && !FIELD_COLUMNS.contains(column)
            })
            .map(|(column, value)| (column.to_owned(), coerce_number(value)))
            .collect();

        Self {
            id: (id.is_finite() && id.fract() == 0.0).then_some(id as i64),
            leader: row.text("leader"),
            country: row.text("country"),
            gender: row.text("gender"),
            start_year: row.number("start_year"),
            end_year: row.number("end_year"),
            start_age: row.number("start_age"),
            end_age: row.number("end_age"),
            duration: row.number("duration"),
            pcgdp: row
                .get("pcgdp")
                .map_or(Some(f64::NAN), |raw| coerce_optional_number(raw, MISSING_GDP)),
            label: row.number("label"),
            memberships,
        }
    }
}

fn finish(rows: &[RawRow]) -> Vec<LeaderRecord> {
    let mut leaders: Vec<LeaderRecord> = rows.iter().map(LeaderRecord::from_row).collect();
    // Stable, so equal labels keep file order; highlighted leaders end up last.
    leaders.sort_by(|a, b| a.label.total_cmp(&b.label));
    debug!(count = leaders.len(), "coerced leader records");
    leaders
}

/// Reads and coerces leader rows, sorted by `label` ascending.
pub fn read_leaders<R: Read>(reader: R) -> ChartResult<Vec<LeaderRecord>> {
    Ok(finish(&read_csv_rows(reader)?))
}

pub fn load_leaders(path: impl AsRef<Path>) -> ChartResult<Vec<LeaderRecord>> {
    Ok(finish(&load_csv_rows(path)?))
}
