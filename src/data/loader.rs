use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::coerce_number;
use crate::error::ChartResult;

/// One CSV row keyed by column header, in file column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    fields: IndexMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Numeric value of a column; a missing column reads as `NaN`.
    #[must_use]
    pub fn number(&self, column: &str) -> f64 {
        self.get(column).map_or(f64::NAN, coerce_number)
    }

    #[must_use]
    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_owned()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reads header-keyed rows from any CSV source.
pub fn read_csv_rows<R: Read>(reader: R) -> ChartResult<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_owned()))
            .collect();
        rows.push(RawRow { fields });
    }

    debug!(columns = headers.len(), rows = rows.len(), "read csv rows");
    Ok(rows)
}

/// Opens `path` and reads its rows. Fails when the file is missing or malformed.
pub fn load_csv_rows(path: impl AsRef<Path>) -> ChartResult<Vec<RawRow>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading csv resource");
    let file = File::open(path)?;
    read_csv_rows(file)
}
