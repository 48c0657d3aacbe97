//! CSV and PDF export integration tests.

use arbor_inspect::export::{csv as csv_export, pdf};
use arbor_inspect::risk::RiskLevel;
use arbor_inspect::store::InspectionRecord;
use tempfile::tempdir;

fn test_record(index: i64) -> InspectionRecord {
    InspectionRecord {
        id: index,
        timestamp: format!("0{}/02/2026 10:30", index),
        analysis: format!("Assessment {}: healthy crown, no visible defects.", index),
        image_paths: vec![format!("images/tree_{}.jpg", index)],
        location: format!("{}.5, -56.78", index),
        risk: RiskLevel::Low,
    }
}

#[test]
fn test_csv_export_writes_dated_file() {
    let dir = tempdir().expect("Failed to create temp dir");

    let records: Vec<InspectionRecord> = (1..=3).rev().map(test_record).collect();
    let path = csv_export::export_csv(&records, dir.path()).unwrap();

    assert!(path.exists(), "CSV file not created");
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("inventario_arbor_"));
    assert!(name.ends_with(".csv"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 4); // header + 3 rows
    assert!(content.starts_with("id,timestamp,analysis,images,location,risk"));
}

#[test]
fn test_csv_export_matches_records() {
    let dir = tempdir().expect("Failed to create temp dir");
    let records = vec![test_record(2), test_record(1)];
    let path = csv_export::export_csv(&records, dir.path()).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(row[0].parse::<i64>().unwrap(), record.id);
        assert_eq!(&row[2], record.analysis.as_str());
        assert_eq!(&row[5], record.risk.as_str());
    }
}

#[test]
fn test_pdf_generation_without_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("informe.pdf");

    let mut record = test_record(1);
    record.image_paths.clear();

    let result = pdf::generate_pdf(&record, &output_path, "Tree Inspection Report");
    assert!(result.is_ok(), "PDF generation failed: {:?}", result.err());

    let metadata = std::fs::metadata(&output_path).expect("missing PDF");
    assert!(metadata.len() > 0, "PDF file is empty");
}

#[test]
fn test_pdf_dangling_image_path_degrades_gracefully() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("informe.pdf");

    let mut record = test_record(1);
    record.image_paths = vec![dir.path().join("ghost.jpg").display().to_string()];

    let result = pdf::generate_pdf(&record, &output_path, "Tree Inspection Report");
    assert!(result.is_ok(), "dangling image must not abort: {:?}", result.err());
    assert!(output_path.exists());
}

#[test]
fn test_pdf_unreadable_image_degrades_gracefully() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("informe.pdf");

    let bogus = dir.path().join("not_an_image.jpg");
    std::fs::write(&bogus, b"definitely not jpeg bytes").unwrap();

    let mut record = test_record(1);
    record.image_paths = vec![bogus.display().to_string()];

    let result = pdf::generate_pdf(&record, &output_path, "Tree Inspection Report");
    assert!(result.is_ok(), "corrupt image must not abort: {:?}", result.err());
}

#[test]
fn test_pdf_long_analysis_spans_pages() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("long.pdf");

    let mut record = test_record(1);
    record.image_paths.clear();
    record.analysis = "Crown assessment line with enough words to wrap.\n".repeat(200);

    let result = pdf::generate_pdf(&record, &output_path, "Tree Inspection Report");
    assert!(result.is_ok(), "multi-page PDF failed: {:?}", result.err());
    assert!(std::fs::metadata(&output_path).unwrap().len() > 0);
}

#[test]
fn test_pdf_non_latin_text_is_replaced_not_fatal() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("latin1.pdf");

    let mut record = test_record(1);
    record.image_paths.clear();
    record.analysis = "риск высокий 高リスク — Medium".to_string();

    let result = pdf::generate_pdf(&record, &output_path, "Informe de Inspección");
    assert!(result.is_ok(), "non-latin text must not abort: {:?}", result.err());
}
