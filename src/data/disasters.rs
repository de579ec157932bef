use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{day_of_year, parse_iso_date};
use crate::data::loader::{RawRow, load_csv_rows, read_csv_rows};
use crate::error::ChartResult;

/// One billion-dollar disaster event (`mid,year,cost,category,name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterRecord {
    /// Mid-point date as it appears in the source, `YYYY-MM-DD`.
    pub mid: String,
    pub year: f64,
    /// Cost in billions of dollars.
    pub cost: f64,
    pub category: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    /// Days since 1 January; `NaN` when `mid` is not a date.
    pub day_of_year: f64,
    /// Zero-based month of `date`.
    pub month: Option<u32>,
}

impl DisasterRecord {
    /// Builds a record and derives its calendar fields from `mid`.
    #[must_use]
    pub fn new(
        mid: impl Into<String>,
        year: f64,
        cost: f64,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let mid = mid.into();
        let date = parse_iso_date(&mid);
        Self {
            year,
            cost,
            category: category.into(),
            name: name.into(),
            date,
            day_of_year: date.map_or(f64::NAN, day_of_year),
            month: date.map(|d| d.month0()),
            mid,
        }
    }

    fn from_row(row: &RawRow) -> Self {
        Self::new(
            row.text("mid"),
            row.number("year"),
            row.number("cost"),
            row.text("category"),
            row.text("name"),
        )
    }
}

pub fn read_disasters<R: Read>(reader: R) -> ChartResult<Vec<DisasterRecord>> {
    Ok(read_csv_rows(reader)?
        .iter()
        .map(DisasterRecord::from_row)
        .collect())
}

pub fn load_disasters(path: impl AsRef<Path>) -> ChartResult<Vec<DisasterRecord>> {
    Ok(load_csv_rows(path)?
        .iter()
        .map(DisasterRecord::from_row)
        .collect())
}
