//Copyright 2025 Loquax Authors
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

//! The flat record store: one JSON file holding every submitted
//! (text, class) pair. Whole-file read-modify-write, single writer
//! assumed, insertion order is the only ordering guarantee.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One stored labeled example. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub text: String,
    pub class: String,
}

impl classifier::TrainDataEntry for Record {
    fn text(&self) -> &str {
        &self.text
    }

    fn label(&self) -> &str {
        &self.class
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialisation(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: Utf8PathBuf,
}

impl RecordStore {
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads all records. A missing file is initialized to an empty
    /// store; an unparsable file is treated as empty and logged, never
    /// surfaced as an error.
    pub fn load(&self) -> Result<Vec<Record>, StoreError> {
        if !self.path.exists() {
            self.write_all(&[])?;
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        match serde_json::from_reader(reader) {
            Ok(records) => Ok(records),
            Err(error) => {
                log::warn!(
                    "The record store at {} is not parsable ({error}), treating it as empty.",
                    self.path
                );
                Ok(Vec::new())
            }
        }
    }

    /// Appends one record by rewriting the whole file.
    pub fn save_record(&self, text: &str, class: &str) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.push(Record {
            text: text.to_owned(),
            class: class.to_owned(),
        });
        self.write_all(&records)
    }

    /// Counts how often each class occurs, skipping empty class values.
    pub fn class_histogram(&self) -> Result<HashMap<String, usize>, StoreError> {
        let mut histogram = HashMap::new();
        for record in self.load()? {
            if !record.class.is_empty() {
                *histogram.entry(record.class).or_insert(0) += 1;
            }
        }
        Ok(histogram)
    }

    fn write_all(&self, records: &[Record]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(
            File::options()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)?,
        );
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use camino_tempfile::tempdir;

    use super::*;

    fn store_in(dir: &Utf8Path) -> RecordStore {
        RecordStore::new(dir.join("sentences.json"))
    }

    #[test]
    fn load_on_missing_file_initializes_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load().unwrap().is_empty());
        // The file now exists and holds a valid empty sequence.
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn save_appends_in_order() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_record("pierwszy", "pozytywny").unwrap();
        store.save_record("drugi", "negatywny").unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "pierwszy");
        assert_eq!(records[0].class, "pozytywny");
        assert_eq!(records[1].text, "drugi");
        assert_eq!(records[1].class, "negatywny");
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_stays_writable() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().unwrap().is_empty());
        store.save_record("nowy", "neutralny").unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn class_histogram_counts_and_skips_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_record("t1", "a").unwrap();
        store.save_record("t2", "b").unwrap();
        store.save_record("t3", "a").unwrap();
        store.save_record("t4", "").unwrap();

        let histogram = store.class_histogram().unwrap();
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram["a"], 2);
        assert_eq!(histogram["b"], 1);
    }

    #[test]
    fn stored_file_is_the_documented_wire_format() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.save_record("Ala ma kota", "neutralny").unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"text\": \"Ala ma kota\""));
        assert!(raw.contains("\"class\": \"neutralny\""));
    }
}
