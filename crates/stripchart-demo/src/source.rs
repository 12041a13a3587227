// File: crates/stripchart-demo/src/source.rs
// Summary: Sample sources feeding the demo chart: synthetic random walks or CSV columns.

use std::path::Path;

use anyhow::{Context, Result};

use crate::random_walk::{RandomWalk, WalkParams};

/// Produces one row (a value per line) per data point.
pub trait SampleSource {
    fn line_count(&self) -> usize;
    /// Fill `row`; false once the source is exhausted.
    fn next_row(&mut self, row: &mut Vec<f32>) -> bool;
}

pub struct WalkSource {
    walks: Vec<RandomWalk>,
}

impl WalkSource {
    pub fn new(params: &[WalkParams], seed: u64) -> Self {
        let walks = params
            .iter()
            .enumerate()
            .map(|(i, p)| RandomWalk::new(*p, seed.wrapping_add(i as u64)))
            .collect();
        Self { walks }
    }
}

impl SampleSource for WalkSource {
    fn line_count(&self) -> usize {
        self.walks.len()
    }

    fn next_row(&mut self, row: &mut Vec<f32>) -> bool {
        row.clear();
        row.extend(self.walks.iter_mut().map(RandomWalk::next_value));
        true
    }
}

/// Pre-loaded CSV rows.
pub struct CsvSource {
    rows: std::vec::IntoIter<Vec<f32>>,
    lines: usize,
}

impl CsvSource {
    /// Read the first `lines` numeric columns of every record. Rows with a missing or
    /// unparsable value are skipped with a warning.
    pub fn load(path: &Path, lines: usize) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
        log::debug!("csv headers: {headers:?}");

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (n, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("reading record {n}"))?;
            let row: Option<Vec<f32>> = (0..lines)
                .map(|col| record.get(col).and_then(|v| v.trim().parse::<f32>().ok()))
                .collect();
            match row {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            log::warn!("{}: skipped {skipped} rows without {lines} numeric columns", path.display());
        }
        anyhow::ensure!(!rows.is_empty(), "{} holds no usable rows", path.display());
        log::info!("loaded {} rows from {}", rows.len(), path.display());
        Ok(Self { rows: rows.into_iter(), lines })
    }

    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl SampleSource for CsvSource {
    fn line_count(&self) -> usize {
        self.lines
    }

    fn next_row(&mut self, row: &mut Vec<f32>) -> bool {
        let Some(next) = self.rows.next() else { return false };
        row.clear();
        row.extend(next);
        true
    }
}
