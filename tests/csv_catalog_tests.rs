use std::fs;

use arrival_picker::PickerError;
use arrival_picker::sources::{CatalogSelection, CsvEventCatalog, EventCatalog, parse_origin_time};

const CATALOG: &str = "\
time,place,magnitude
2025-07-15 10:20:00,Kagoshima Bay,3.1
2025-06-01 01:01:00,Sakurajima,2.5
not a time,Nowhere,1.0
2025-08-01T00:00:00+09:00,Aira Caldera,4.0
";

fn catalog_in(dir: &std::path::Path) -> CsvEventCatalog {
    let csv = dir.join("earthquakes.csv");
    fs::write(&csv, CATALOG).expect("write catalog");
    CsvEventCatalog::new(csv, dir.join("events"))
}

fn ids(catalog: &CsvEventCatalog) -> Vec<String> {
    catalog
        .list()
        .expect("list")
        .into_iter()
        .map(|entry| entry.event_id.to_string())
        .collect()
}

#[test]
fn lists_events_in_origin_time_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog_in(dir.path());

    assert_eq!(
        ids(&catalog),
        vec![
            "20250601_0101_Sakurajima",
            "20250715_1020_Kagoshima_Bay",
            "20250801_0000_Aira_Caldera",
        ]
    );
}

#[test]
fn entries_point_at_event_directory_and_channel_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog_in(dir.path());

    let first = catalog.list().expect("list").remove(0);
    let expected_dir = dir.path().join("events").join("20250601_0101_Sakurajima");
    assert_eq!(first.directory, expected_dir);
    assert_eq!(
        first.metadata_path,
        expected_dir.join("03_02_43_20250601.euc.ch")
    );

    let custom = catalog_in(dir.path()).with_metadata_prefix("01_01_01");
    let first = custom.list().expect("list").remove(0);
    assert!(first.metadata_path.ends_with("01_01_01_20250601.euc.ch"));
}

#[test]
fn date_range_selection_is_inclusive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = catalog_in(dir.path()).with_selection(CatalogSelection::DateRange {
        from: parse_origin_time("2025-06-01 01:01:00").expect("from"),
        to: parse_origin_time("2025-07-15 10:20:00").expect("to"),
    });

    assert_eq!(
        ids(&catalog),
        vec!["20250601_0101_Sakurajima", "20250715_1020_Kagoshima_Bay"]
    );
}

#[test]
fn row_selection_counts_rows_in_file_order() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Row 1 of the file is the earliest event, not the second earliest.
    let second_row = catalog_in(dir.path()).with_selection(CatalogSelection::Rows(1..2));
    assert_eq!(ids(&second_row), vec!["20250601_0101_Sakurajima"]);

    // Selected rows are still listed by origin time.
    let first_two = catalog_in(dir.path()).with_selection(CatalogSelection::Rows(0..2));
    assert_eq!(
        ids(&first_two),
        vec!["20250601_0101_Sakurajima", "20250715_1020_Kagoshima_Bay"]
    );

    // The unparseable row still occupies its position.
    let past_end = catalog_in(dir.path()).with_selection(CatalogSelection::Rows(2..50));
    assert_eq!(ids(&past_end), vec!["20250801_0000_Aira_Caldera"]);

    let beyond = catalog_in(dir.path()).with_selection(CatalogSelection::Rows(10..20));
    assert!(ids(&beyond).is_empty());
}

#[test]
fn missing_catalog_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = CsvEventCatalog::new(dir.path().join("absent.csv"), dir.path());
    assert!(matches!(catalog.list(), Err(PickerError::Catalog(_))));
}
