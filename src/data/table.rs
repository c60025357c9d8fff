use std::collections::HashMap;
use std::io::Read;

use crate::foundation::error::VizResult;

/// A header-addressed table of string fields, as read from CSV.
///
/// Rows shorter than the header are kept; their missing trailing fields read as absent.
#[derive(Clone, Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from in-memory headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut index = HashMap::with_capacity(headers.len());
        for (i, h) in headers.iter().enumerate() {
            // First column wins when a header is duplicated.
            index.entry(h.clone()).or_insert(i);
        }
        Self {
            headers,
            index,
            rows,
        }
    }

    /// Parse CSV with a header row.
    ///
    /// Only an unreadable header or an I/O failure is an error. Fields that are not valid
    /// UTF-8 are decoded lossily and left to the normalizers to accept or drop.
    pub fn from_csv_reader(reader: impl Read) -> VizResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_owned())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        let mut repaired = 0usize;
        for record in rdr.byte_records() {
            let record = record?;
            let mut lossy = false;
            let fields = record
                .iter()
                .map(|f| match std::str::from_utf8(f) {
                    Ok(s) => s.to_owned(),
                    Err(_) => {
                        lossy = true;
                        String::from_utf8_lossy(f).into_owned()
                    }
                })
                .collect();
            repaired += usize::from(lossy);
            rows.push(fields);
        }
        if repaired > 0 {
            tracing::debug!(repaired, "rows with invalid utf-8 decoded lossily");
        }
        Ok(Self::new(headers, rows))
    }

    pub fn from_csv_str(s: &str) -> VizResult<Self> {
        Self::from_csv_reader(s.as_bytes())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> + '_ {
        self.rows.iter().map(move |fields| RowRef {
            table: self,
            fields,
        })
    }
}

/// Borrowed view of one table row.
#[derive(Clone, Copy, Debug)]
pub struct RowRef<'a> {
    table: &'a Table,
    fields: &'a [String],
}

impl<'a> RowRef<'a> {
    /// Field by column name; `None` when the column or the field is absent.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let i = *self.table.index.get(column)?;
        self.fields.get(i).map(String::as_str)
    }
}
