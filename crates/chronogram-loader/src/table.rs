//! CSV table loading.
//!
//! The loader resolves configured column headers to field indices once,
//! then builds one normalized [`RawRecord`] per data row. Boolean-like
//! cells go through the pipeline's flag normalization; absent cells
//! degrade to empty text. Missing *columns* are a genuine loader error:
//! the core pipeline assumes well-formed column presence.

use std::path::Path;

use chronogram_core::RawRecord;
use chronogram_pipeline::normalize;
use csv::StringRecord;

use crate::{Config, LoadError};

/// Configured column headers resolved to positional indices.
#[derive(Clone, Copy, Debug)]
pub struct ColumnMap {
    product: usize,
    solution: usize,
    planning: usize,
    tribe: usize,
    squad: usize,
    full_kube: usize,
    full_z: usize,
    mosart: usize,
    critical: usize,
    decommissioned: usize,
    validated: usize,
    subtask: usize,
    realization: usize,
}

impl ColumnMap {
    /// Resolve every configured header against the actual header row.
    pub fn resolve(headers: &StringRecord, config: &Config) -> Result<Self, LoadError> {
        let find = |name: &str| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let columns = &config.columns;
        Ok(Self {
            product: find(&columns.product)?,
            solution: find(&columns.solution)?,
            planning: find(&columns.planning)?,
            tribe: find(&columns.tribe)?,
            squad: find(&columns.squad)?,
            full_kube: find(&columns.full_kube)?,
            full_z: find(&columns.full_z)?,
            mosart: find(&columns.mosart)?,
            critical: find(&columns.critical)?,
            decommissioned: find(&columns.decommissioned)?,
            validated: find(&columns.validated)?,
            subtask: find(&columns.subtask)?,
            realization: find(&columns.realization)?,
        })
    }

    /// Build a normalized record from one data row. Cells beyond the
    /// row's width count as absent.
    pub fn record(&self, row: &StringRecord) -> RawRecord {
        let cell = |idx: usize| row.get(idx);
        let flag = |idx: usize| normalize::flag(cell(idx).unwrap_or_default());

        RawRecord {
            product: normalize::text(cell(self.product)),
            solution: normalize::text(cell(self.solution)),
            tribe: normalize::text(cell(self.tribe)).trim().to_string(),
            squad: normalize::text(cell(self.squad)),
            quarter: normalize::text(cell(self.planning)),
            full_kube: flag(self.full_kube),
            full_z: flag(self.full_z),
            mosart: flag(self.mosart),
            critical: flag(self.critical),
            decommissioned: flag(self.decommissioned),
            validated: flag(self.validated),
            subtask: normalize::text(cell(self.subtask)),
            realization: normalize::text(cell(self.realization)),
        }
    }
}

/// Load the full delivery table from a CSV file with headers.
pub fn load_table(path: &Path, config: &Config) -> Result<Vec<RawRecord>, LoadError> {
    let file = std::fs::File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let map = ColumnMap::resolve(reader.headers()?, config)?;

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(map.record(&row?));
    }
    Ok(records)
}

/// Distinct non-empty tribe values, in first-seen order.
pub fn tribes(records: &[RawRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if !record.tribe.is_empty() && !seen.contains(&record.tribe) {
            seen.push(record.tribe.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn test_config() -> Config {
        serde_json::from_str(
            r##"{
                "columns": {
                    "product": "Produit",
                    "solution": "Solution",
                    "planning": "Planification",
                    "tribe": "Tribu",
                    "squad": "Squad",
                    "full_kube": "Full Kube",
                    "full_z": "Full Z",
                    "mosart": "Mosart",
                    "critical": "Critique",
                    "decommissioned": "Decom",
                    "validated": "Validation",
                    "subtask": "Type",
                    "realization": "Realise"
                }
            }"##,
        )
        .unwrap()
    }

    const HEADER: &str =
        "Produit,Solution,Planification,Tribu,Squad,Full Kube,Full Z,Mosart,Critique,Decom,Validation,Type,Realise";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn loads_and_normalizes_rows() {
        let file = write_csv(&[
            "PRD-1,SOL-1,T1/2025,Payments,Squad Alpha,oui,non,Lot 2,non,,OUI,Reconstruction,oui",
            "PRD-2,SOL-9,garbage,Lending,Squad Beta,non,,,,,non,,NR",
        ]);

        let records = load_table(file.path(), &test_config()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.product, "PRD-1");
        assert_eq!(first.quarter, "T1/2025");
        assert!(first.full_kube);
        assert!(!first.full_z);
        assert!(first.mosart); // "Lot 2"
        assert!(first.validated); // "OUI"
        assert_eq!(first.subtask, "Reconstruction");

        let second = &records[1];
        assert!(!second.full_kube);
        assert_eq!(second.subtask, "");
        assert_eq!(second.realization, "NR");
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let mut file = tempfile::NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Produit,Solution").unwrap();

        let err = load_table(file.path(), &test_config()).unwrap_err();
        match err {
            LoadError::MissingColumn(name) => assert_eq!(name, "Planification"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_whitespace_is_tolerated() {
        let config = test_config();
        let headers = StringRecord::from(vec![
            " Produit ",
            "Solution",
            "Planification",
            "Tribu",
            "Squad",
            "Full Kube",
            "Full Z",
            "Mosart",
            "Critique",
            "Decom",
            "Validation",
            "Type",
            "Realise",
        ]);
        assert!(ColumnMap::resolve(&headers, &config).is_ok());
    }

    #[test]
    fn tribes_in_first_seen_order_without_duplicates() {
        let records = vec![
            RawRecord::new("A", "S").tribe("Payments"),
            RawRecord::new("B", "S").tribe("Lending"),
            RawRecord::new("C", "S").tribe("Payments"),
            RawRecord::new("D", "S"), // empty tribe dropped
        ];
        assert_eq!(tribes(&records), ["Payments", "Lending"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("/nonexistent/deliveries.csv");
        assert!(matches!(
            load_table(path, &test_config()),
            Err(LoadError::Io(_))
        ));
    }
}
