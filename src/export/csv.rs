//! CSV export of the full inventory.
//!
//! Pure serialization of `list_all()`. Image paths are rendered as one
//! `;`-joined field; the store itself keeps them as separate rows, so the
//! join here is display-only.

use crate::error::Result;
use crate::store::InspectionRecord;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 6] = ["id", "timestamp", "analysis", "images", "location", "risk"];

/// Separator for the images field inside one CSV cell.
pub const IMAGE_SEPARATOR: &str = ";";

pub fn write_csv<W: Write>(records: &[InspectionRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for r in records {
        wtr.write_record([
            r.id.to_string().as_str(),
            &r.timestamp,
            &r.analysis,
            &r.image_paths.join(IMAGE_SEPARATOR),
            &r.location,
            r.risk.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// File name carries the export date, matching the old download button.
pub fn dated_file_name() -> String {
    format!(
        "inventario_arbor_{}.csv",
        chrono::Local::now().format("%Y-%m-%d")
    )
}

/// Write the inventory CSV into `output_dir` and return the file path.
pub fn export_csv(records: &[InspectionRecord], output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(dated_file_name());
    let file = std::fs::File::create(&path)?;
    write_csv(records, file)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskLevel;

    fn record(id: i64, analysis: &str) -> InspectionRecord {
        InspectionRecord {
            id,
            timestamp: "01/02/2026 10:30".into(),
            analysis: analysis.into(),
            image_paths: vec!["images/a.jpg".into(), "images/b.jpg".into()],
            location: "12.34, -56.78".into(),
            risk: RiskLevel::Medium,
        }
    }

    #[test]
    fn test_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&[record(1, "fine")], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "id,timestamp,analysis,images,location,risk");
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,"));
        assert!(row.contains("images/a.jpg;images/b.jpg"));
        assert!(row.ends_with("Medium"));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let records = vec![
            record(2, "line one\nline two, with \"quotes\""),
            record(1, "plain"),
        ];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        for (row, original) in rows.iter().zip(&records) {
            assert_eq!(row[0].parse::<i64>().unwrap(), original.id);
            assert_eq!(&row[1], original.timestamp.as_str());
            assert_eq!(&row[2], original.analysis.as_str());
            assert_eq!(
                row[3].split(IMAGE_SEPARATOR).collect::<Vec<_>>(),
                original.image_paths.iter().map(String::as_str).collect::<Vec<_>>()
            );
            assert_eq!(&row[4], original.location.as_str());
            assert_eq!(&row[5], original.risk.as_str());
        }
    }

    #[test]
    fn test_empty_inventory_is_header_only() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_dated_file_name_shape() {
        let name = dated_file_name();
        assert!(name.starts_with("inventario_arbor_"));
        assert!(name.ends_with(".csv"));
    }
}
