//! CSV reading for the trip catalog.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::domain::TripRecord;

use super::{Catalog, CatalogError};

/// Read CSV data into one string-keyed mapping per data row.
///
/// The first row is the header and supplies the keys. Every data row must
/// have as many fields as the header.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<HashMap<String, String>>, CatalogError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|record| -> Result<HashMap<String, String>, CatalogError> {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect())
        })
        .collect()
}

pub(super) fn load_path(path: &Path) -> Result<Catalog, CatalogError> {
    debug!("Loading catalog from {}", path.display());
    let now = Instant::now();
    let file = File::open(path)?;
    let catalog = load_reader(file)?;
    info!(
        "Loaded {} trips from {} in {:?}",
        catalog.len(),
        path.display(),
        now.elapsed()
    );
    Ok(catalog)
}

pub(super) fn load_reader<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let rows = read_rows(reader)?;
    let trips = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            TripRecord::from_row(row).map_err(|source| CatalogError::Record { row: i + 1, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(trips))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, column};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Bus Number,Bus Name,Departure,Destination,Timing,Day of Departure,Fare (INR),Ratings,Duration,AC,Sleeper,Seats";

    fn csv_text(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    #[test]
    fn read_rows_keys_by_header() {
        let text = csv_text(&[
            "KA-01,KSRTC,Bengaluru,Mysuru,06:30 AM,\"Monday, Friday\",450,4.3,3h 15m,Yes,No,12",
        ]);
        let rows = read_rows(text.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][column::BUS_NUMBER], "KA-01");
        assert_eq!(rows[0][column::DAYS], "Monday, Friday");
        assert_eq!(rows[0][column::DURATION], "3h 15m");
    }

    #[test]
    fn load_reader_builds_records() {
        let text = csv_text(&[
            "KA-01,KSRTC,Bengaluru,Mysuru,06:30 AM,Monday,450,4.3,3h 15m,Yes,No,12",
            "KA-02,VRL,Bengaluru,Hubballi,09:45 PM,Daily,900,4.6,8h 0m,Yes,Yes,4",
        ]);
        let catalog = load_reader(text.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.trips()[0].bus_number, "KA-01");
        assert_eq!(catalog.trips()[1].arrival_point, "Hubballi");
        assert_eq!(catalog.trips()[1].fare().unwrap(), 900);
    }

    #[test]
    fn missing_column_aborts_load() {
        let text = "Bus Number,Departure\nKA-01,Bengaluru\n";
        let err = load_reader(text.as_bytes()).unwrap_err();

        match err {
            CatalogError::Record { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(source, DomainError::MissingField(column::OPERATOR));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_row_is_csv_error() {
        let text = csv_text(&["KA-01,KSRTC,Bengaluru"]);
        assert!(matches!(
            load_reader(text.as_bytes()),
            Err(CatalogError::Csv(_))
        ));
    }

    #[test]
    fn non_numeric_fields_load_verbatim() {
        // Numeric columns are checked when a query needs them, not at load
        let text = csv_text(&["KA-01,KSRTC,Bengaluru,Mysuru,soon,Monday,free,n/a,long,Yes,No,-"]);
        let catalog = load_reader(text.as_bytes()).unwrap();
        assert_eq!(catalog.trips()[0].fare, "free");
        assert!(catalog.trips()[0].fare().is_err());
    }

    #[test]
    fn header_only_is_empty() {
        let catalog = load_reader(csv_text(&[]).as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let text = csv_text(&["KA-01,KSRTC,Bengaluru,Mysuru,06:30 AM,Monday,450,4.3,3h 15m,Yes,No,12"]);
        file.write_all(text.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Catalog::load("/nonexistent/path/sample.csv").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn bundled_sample_loads() {
        let path = format!("{}/sample.csv", env!("CARGO_MANIFEST_DIR"));
        let catalog = Catalog::load(path).unwrap();

        assert!(!catalog.is_empty());
        for trip in catalog.trips() {
            assert!(!trip.bus_number.is_empty(), "bus number should never be empty");
            assert!(trip.fare().is_ok(), "sample fares should be numeric");
            assert!(trip.rating().is_ok(), "sample ratings should be numeric");
            assert!(!trip.departure().is_fallback(), "sample timings should parse");
        }
    }
}
