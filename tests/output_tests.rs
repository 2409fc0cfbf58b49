//! Tests for writing generated datasets to disk

use care_history_simulator::simulation::{
    DatasetWriter, SimulationOrchestrator, COMBINED_FILE, DOCUMENTS_DIR,
};
use care_history_simulator::types::SimulationConfig;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_generated_run_written_to_directory() {
    let config = SimulationConfig {
        seed: 23,
        anchor: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        horizon_days: 365,
        home_count: 1,
        ..Default::default()
    };
    let output = SimulationOrchestrator::new(config).unwrap().run().unwrap();

    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("out");
    let writer = DatasetWriter::new(&target);
    let written = writer.write(&output.dataset).unwrap();

    assert_eq!(written.len(), 17);
    assert!(written.iter().all(|path| path.exists()));

    let residents = read_json(&target.join("residents.json"));
    assert_eq!(residents.as_array().unwrap().len(), output.dataset.residents.len());
    let first = &residents[0];
    assert!(first.get("admissionDate").is_some());
    assert!(first.get("isActive").is_some());
    assert!(first.get("admission_date").is_none());

    let combined = read_json(&target.join(COMBINED_FILE));
    for key in [
        "homes",
        "beds",
        "bedOccupancy",
        "users",
        "caregiverHomeAssignments",
        "residents",
        "adlLogs",
        "vitalsLogs",
        "medicationLogs",
        "romLogs",
        "behaviorNotes",
        "activities",
        "activityParticipants",
        "incidents",
        "appointments",
        "documents",
    ] {
        assert!(combined.get(key).map_or(false, Value::is_array), "missing {}", key);
    }
    assert_eq!(
        combined["incidents"].as_array().unwrap().len(),
        output.dataset.incidents.len()
    );

    let documents = writer.write_documents(&output.rendered_documents).unwrap();
    assert_eq!(documents.len(), output.rendered_documents.len());
    for (path, rendered) in documents.iter().zip(&output.rendered_documents) {
        assert!(path.starts_with(target.join(DOCUMENTS_DIR)));
        assert_eq!(fs::read(path).unwrap(), rendered.content);
    }
}

#[test]
fn test_rewrite_replaces_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let writer = DatasetWriter::new(temp_dir.path());
    let mut dataset = care_history_simulator::SyntheticDataset::default();

    writer.write(&dataset).unwrap();
    assert_eq!(read_json(&temp_dir.path().join("homes.json")), Value::Array(Vec::new()));

    let config = SimulationConfig {
        anchor: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
        horizon_days: 365,
        home_count: 1,
        render_documents: false,
        ..Default::default()
    };
    dataset = SimulationOrchestrator::new(config).unwrap().run().unwrap().dataset;
    writer.write(&dataset).unwrap();

    let homes = read_json(&temp_dir.path().join("homes.json"));
    assert_eq!(homes.as_array().unwrap().len(), 1);
    assert_eq!(homes[0]["sequence"], 1);
}
