//! Checker service: evaluate a symptom set and record the outcome.

use crate::config::CoreConfig;
use crate::log::{CsvLog, LogEntry, LogSink};
use crate::matcher::{DiagnosisResult, MatchThreshold, Matcher};
use crate::symptom::SymptomSet;
use crate::CheckerResult;
use chrono::{Local, NaiveDateTime, Timelike};
use std::sync::Arc;

/// Outcome of one logged check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub result: DiagnosisResult,
    pub entry: LogEntry,
}

/// Runs checks against a shared matcher and appends them to a log.
#[derive(Clone)]
pub struct CheckerService {
    matcher: Matcher,
    log: Arc<dyn LogSink>,
}

impl CheckerService {
    /// Built-in rules and the fixed default threshold, logging to the configured CSV file.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            matcher: Matcher::standard(MatchThreshold::default()),
            log: Arc::new(CsvLog::new(cfg.log_path())),
        }
    }

    pub fn with_parts(matcher: Matcher, log: Arc<dyn LogSink>) -> Self {
        Self { matcher, log }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Evaluates without recording anything.
    pub fn evaluate(&self, symptoms: &SymptomSet) -> DiagnosisResult {
        self.matcher.evaluate(symptoms)
    }

    /// Evaluates `symptoms` and records the check with the current local time.
    pub fn check(&self, symptoms: &SymptomSet) -> CheckerResult<CheckReport> {
        let now = Local::now().naive_local();
        // The log keeps second precision.
        let now = now.with_nanosecond(0).unwrap_or(now);
        self.check_at(symptoms, now)
    }

    pub fn check_at(
        &self,
        symptoms: &SymptomSet,
        datetime: NaiveDateTime,
    ) -> CheckerResult<CheckReport> {
        let result = self.matcher.evaluate(symptoms);
        let entry = LogEntry::new(datetime, symptoms, &result);
        self.log.append(&entry)?;

        if result.is_severe() {
            tracing::warn!(symptoms = %entry.symptoms, "urgent symptom reported");
        }

        Ok(CheckReport { result, entry })
    }

    /// Every logged check, oldest first.
    pub fn history(&self) -> CheckerResult<Vec<LogEntry>> {
        self.log.entries()
    }
}
