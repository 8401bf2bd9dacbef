//! Append-only diagnosis log.
//!
//! Every check is recorded as one row of `datetime,symptoms,result`. Rows are never edited or
//! removed. A log that has not been written yet reads as empty.

use crate::constants::LOG_DATETIME_FORMAT;
use crate::matcher::DiagnosisResult;
use crate::symptom::SymptomSet;
use crate::{CheckerError, CheckerResult};
use chrono::NaiveDateTime;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One logged check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    /// Local time of the check, second precision.
    #[serde(with = "log_datetime")]
    pub datetime: NaiveDateTime,
    /// Reported symptoms joined with `", "`.
    pub symptoms: String,
    /// The result line shown to the user.
    pub result: String,
}

impl LogEntry {
    pub fn new(datetime: NaiveDateTime, symptoms: &SymptomSet, result: &DiagnosisResult) -> Self {
        Self {
            datetime,
            symptoms: symptoms.display_string(),
            result: result.summary(),
        }
    }

    pub fn datetime_string(&self) -> String {
        self.datetime.format(LOG_DATETIME_FORMAT).to_string()
    }
}

mod log_datetime {
    use crate::constants::LOG_DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(LOG_DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), LOG_DATETIME_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}

/// Destination for logged checks.
pub trait LogSink: Send + Sync {
    /// Appends one entry.
    fn append(&self, entry: &LogEntry) -> CheckerResult<()>;

    /// All entries in the order they were appended.
    fn entries(&self) -> CheckerResult<Vec<LogEntry>>;
}

/// Diagnosis log stored as a CSV file.
///
/// Reads and writes are serialised through one mutex and the file is opened in append mode, so
/// rows from concurrent checks in one process never interleave and a reader never sees a
/// half-written row. A file whose last row lacks a line terminator is repaired before the next
/// row is added.
#[derive(Debug)]
pub struct CsvLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn open_error(&self, source: io::Error) -> CheckerError {
        CheckerError::LogOpen {
            path: self.path.clone(),
            source,
        }
    }
}

impl LogSink for CsvLog {
    fn append(&self, entry: &LogEntry) -> CheckerResult<()> {
        let _guard = self.lock();

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.open_error(e))?;
        let needs_header = file.metadata().map_err(|e| self.open_error(e))?.len() == 0;
        if !needs_header && !ends_with_newline(&mut file).map_err(|e| self.open_error(e))? {
            tracing::warn!(path = %self.path.display(), "diagnosis log missing final newline");
            file.write_all(b"\n").map_err(CheckerError::LogFlush)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(entry).map_err(CheckerError::LogWrite)?;
        writer.flush().map_err(CheckerError::LogFlush)?;

        tracing::info!(path = %self.path.display(), "recorded diagnosis");
        Ok(())
    }

    fn entries(&self) -> CheckerResult<Vec<LogEntry>> {
        let _guard = self.lock();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "diagnosis log not created yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.open_error(e)),
        };

        csv::Reader::from_reader(file)
            .deserialize()
            .collect::<Result<Vec<LogEntry>, _>>()
            .map_err(CheckerError::LogRead)
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Diagnosis log held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for MemoryLog {
    fn append(&self, entry: &LogEntry) -> CheckerResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> CheckerResult<Vec<LogEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn entry(datetime: NaiveDateTime, symptoms: &str, result: &str) -> LogEntry {
        LogEntry {
            datetime,
            symptoms: symptoms.into(),
            result: result.into(),
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let log = CsvLog::new(temp.path().join("diagnosis_log.csv"));
        assert!(log.entries().unwrap().is_empty());
    }

    #[test]
    fn appends_rows_under_a_single_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diagnosis_log.csv");
        let log = CsvLog::new(&path);

        log.append(&entry(at(9, 0, 0), "복통, 구토", "가능한 질환: 소화불량"))
            .unwrap();
        log.append(&entry(at(9, 5, 30), "두통", "명확한 질환을 판단하기 어렵습니다."))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "datetime,symptoms,result");
        assert_eq!(
            lines[1],
            "2025-03-14 09:00:00,\"복통, 구토\",가능한 질환: 소화불량"
        );

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symptoms, "복통, 구토");
        assert_eq!(entries[1].datetime, at(9, 5, 30));
    }

    #[test]
    fn continues_an_existing_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diagnosis_log.csv");
        fs::write(
            &path,
            "datetime,symptoms,result\n2025-01-02 03:04:05,기침,없음\n",
        )
        .unwrap();

        let log = CsvLog::new(&path);
        log.append(&entry(at(10, 0, 0), "발열", "있음")).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].datetime_string(), "2025-01-02 03:04:05");
        assert_eq!(entries[1].symptoms, "발열");
    }

    #[test]
    fn continues_a_log_without_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diagnosis_log.csv");
        fs::write(&path, "datetime,symptoms,result\n2025-01-02 03:04:05,기침,없음").unwrap();

        let log = CsvLog::new(&path);
        log.append(&entry(at(10, 0, 0), "발열", "있음")).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].result, "없음");
        assert_eq!(entries[1].datetime, at(10, 0, 0));
        assert_eq!(entries[1].symptoms, "발열");
        assert!(fs::read_to_string(&path).unwrap().ends_with('\n'));
    }

    #[test]
    fn concurrent_appends_and_reads_stay_consistent() {
        const WRITERS: usize = 4;
        const ROWS_PER_WRITER: usize = 25;

        let temp = TempDir::new().unwrap();
        let log = CsvLog::new(temp.path().join("diagnosis_log.csv"));

        std::thread::scope(|scope| {
            for writer in 0..WRITERS {
                let log = &log;
                scope.spawn(move || {
                    for row in 0..ROWS_PER_WRITER {
                        let symptoms = format!("기침, 발열 {writer}-{row}");
                        log.append(&entry(at(8, 0, 0), &symptoms, "가능한 질환: 감기, 독감"))
                            .unwrap();
                    }
                });
            }

            let log = &log;
            scope.spawn(move || {
                let mut seen = 0;
                for _ in 0..50 {
                    let entries = log.entries().expect("log readable mid-write");
                    assert!(entries.len() >= seen);
                    assert!(entries.iter().all(|e| e.result == "가능한 질환: 감기, 독감"));
                    seen = entries.len();
                }
            });
        });

        assert_eq!(log.entries().unwrap().len(), WRITERS * ROWS_PER_WRITER);
    }

    #[test]
    fn empty_file_gets_a_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diagnosis_log.csv");
        fs::write(&path, "").unwrap();

        let log = CsvLog::new(&path);
        assert!(log.entries().unwrap().is_empty());
        log.append(&entry(at(11, 0, 0), "", "x")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("datetime,symptoms,result\n"));
    }

    #[test]
    fn malformed_rows_are_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("diagnosis_log.csv");
        fs::write(&path, "datetime,symptoms,result\nyesterday,기침,없음\n").unwrap();

        let err = CsvLog::new(&path).entries().expect_err("bad datetime");
        assert!(matches!(err, CheckerError::LogRead(_)));
    }

    #[test]
    fn unwritable_location_is_an_open_error() {
        let temp = TempDir::new().unwrap();
        let log = CsvLog::new(temp.path().join("missing-dir").join("log.csv"));
        let err = log
            .append(&entry(at(12, 0, 0), "기침", "x"))
            .expect_err("parent directory does not exist");
        assert!(matches!(err, CheckerError::LogOpen { .. }));
    }

    #[test]
    fn memory_log_keeps_append_order() {
        let log = MemoryLog::new();
        log.append(&entry(at(1, 0, 0), "a", "1")).unwrap();
        log.append(&entry(at(2, 0, 0), "b", "2")).unwrap();
        let symptoms: Vec<String> = log
            .entries()
            .unwrap()
            .into_iter()
            .map(|e| e.symptoms)
            .collect();
        assert_eq!(symptoms, vec!["a", "b"]);
    }
}
