//! Writing the dataset to disk
//!
//! One pretty-printed JSON array per collection plus `all_data.json` with the
//! whole [`SyntheticDataset`]. Rendered document blobs go to `documents/`.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::documents::RenderedDocument;
use crate::simulation::dataset::SyntheticDataset;
use crate::simulation::error::SimulationResult;

/// Name of the combined file
pub const COMBINED_FILE: &str = "all_data.json";

/// Subdirectory holding rendered documents
pub const DOCUMENTS_DIR: &str = "documents";

/// Writes datasets into an output directory
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    directory: PathBuf,
}

impl DatasetWriter {
    /// Writer targeting `directory`, created on first write
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    /// Output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write every collection and the combined file; returns the paths written
    #[instrument(skip_all, fields(directory = %self.directory.display()))]
    pub fn write(&self, dataset: &SyntheticDataset) -> SimulationResult<Vec<PathBuf>> {
        fs::create_dir_all(&self.directory)?;

        let mut written = vec![
            self.write_collection("homes", &dataset.homes)?,
            self.write_collection("beds", &dataset.beds)?,
            self.write_collection("bed_occupancy", &dataset.bed_occupancy)?,
            self.write_collection("users", &dataset.users)?,
            self.write_collection("caregiver_home_assignments", &dataset.caregiver_home_assignments)?,
            self.write_collection("residents", &dataset.residents)?,
            self.write_collection("adl_logs", &dataset.adl_logs)?,
            self.write_collection("vitals_logs", &dataset.vitals_logs)?,
            self.write_collection("medication_logs", &dataset.medication_logs)?,
            self.write_collection("rom_logs", &dataset.rom_logs)?,
            self.write_collection("behavior_notes", &dataset.behavior_notes)?,
            self.write_collection("activities", &dataset.activities)?,
            self.write_collection("activity_participants", &dataset.activity_participants)?,
            self.write_collection("incidents", &dataset.incidents)?,
            self.write_collection("appointments", &dataset.appointments)?,
            self.write_collection("documents", &dataset.documents)?,
        ];

        let combined = self.directory.join(COMBINED_FILE);
        write_json(&combined, dataset)?;
        written.push(combined);

        info!(files = written.len(), records = dataset.record_count(), "Dataset written");
        Ok(written)
    }

    /// Write rendered blobs under `documents/`, named by their stored file name
    pub fn write_documents(&self, documents: &[RenderedDocument]) -> SimulationResult<Vec<PathBuf>> {
        let directory = self.directory.join(DOCUMENTS_DIR);
        fs::create_dir_all(&directory)?;

        let mut written = Vec::with_capacity(documents.len());
        for document in documents {
            let path = directory.join(&document.metadata.file_name);
            fs::write(&path, &document.content)?;
            written.push(path);
        }

        info!(documents = written.len(), "Documents written");
        Ok(written)
    }

    fn write_collection<T: Serialize>(&self, name: &str, records: &[T]) -> SimulationResult<PathBuf> {
        let path = self.directory.join(format!("{}.json", name));
        write_json(&path, records)?;
        debug!(collection = name, records = records.len(), "Collection written");
        Ok(path)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> SimulationResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::new(dir.path().join("out"));

        let written = writer.write(&SyntheticDataset::default()).unwrap();
        assert_eq!(written.len(), 17);
        let homes = fs::read_to_string(writer.directory().join("homes.json")).unwrap();
        assert_eq!(homes.trim(), "[]");

        let combined: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(writer.directory().join(COMBINED_FILE)).unwrap()).unwrap();
        assert!(combined.get("bedOccupancy").is_some());
        assert!(combined.get("activityParticipants").is_some());
    }
}
