//! Record store integration tests against a file-backed database.

use arbor_inspect::map;
use arbor_inspect::risk::{derive_risk, RiskLevel};
use arbor_inspect::store::InspectionStore;
use tempfile::tempdir;

#[test]
fn test_persists_across_reopen() {
    let dir = tempdir().expect("Failed to create temp dir");
    let db = dir.path().join("arbor.db");

    {
        let mut store = InspectionStore::open(&db).unwrap();
        store
            .insert(
                "01/02/2026 10:30",
                "healthy crown",
                &["images/a.jpg".to_string()],
                "12.34, -56.78",
                RiskLevel::Low,
            )
            .unwrap();
    }

    let store = InspectionStore::open(&db).unwrap();
    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].analysis, "healthy crown");
    assert_eq!(records[0].image_paths, vec!["images/a.jpg".to_string()]);
}

#[test]
fn test_images_dir_next_to_db() {
    let dir = tempdir().expect("Failed to create temp dir");
    let db = dir.path().join("data").join("arbor.db");
    let store = InspectionStore::open(&db).unwrap();
    assert_eq!(store.images_dir(), dir.path().join("data").join("images"));
}

#[test]
fn test_insert_derived_risk_first_match_wins() {
    // a reply mentioning both families is always High
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = InspectionStore::open(&dir.path().join("arbor.db")).unwrap();

    let text = "Assessment: Alto risk Medio overall";
    let id = store
        .insert("t", text, &[], "0.0, 0.0", derive_risk(text))
        .unwrap();

    let record = store.get(id).unwrap().unwrap();
    assert_eq!(record.risk, RiskLevel::High);
}

#[test]
fn test_delete_middle_record_scenario() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = InspectionStore::open(&dir.path().join("arbor.db")).unwrap();

    let ids: Vec<i64> = ["1.0, 1.0", "2.0, 2.0", "3.0, 3.0"]
        .iter()
        .map(|loc| store.insert("t", "text", &[], loc, RiskLevel::Low).unwrap())
        .collect();

    store.delete_by_id(ids[1]).unwrap();

    let records = store.list_all().unwrap();
    let listed: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(listed, vec![ids[2], ids[0]]);

    let points = map::map_points(&records);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].id, ids[2]);
    assert_eq!(points[1].id, ids[0]);
}

#[test]
fn test_count_matches_list() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = InspectionStore::open(&dir.path().join("arbor.db")).unwrap();
    for _ in 0..4 {
        store.insert("t", "text", &[], "0.0, 0.0", RiskLevel::Low).unwrap();
    }
    store.delete_by_id(2).unwrap();
    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(store.list_all().unwrap().len(), 3);
}
