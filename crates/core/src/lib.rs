//! # Symptom checker core
//!
//! Core logic for the rule-based symptom checker:
//! - The closed symptom vocabulary and the set of symptoms reported in one check
//! - The fixed rule table and the urgent-symptom set
//! - The matcher that turns reported symptoms into a [`DiagnosisResult`]
//! - The append-only diagnosis log
//!
//! **No API concerns**: HTTP servers and wire types belong in `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod log;
pub mod matcher;
pub mod rules;
pub mod service;
pub mod symptom;

pub use config::CoreConfig;
pub use constants::{DEFAULT_LOG_PATH, DEFAULT_MATCH_THRESHOLD};
pub use error::{CheckerError, CheckerResult};
pub use log::{CsvLog, LogEntry, LogSink, MemoryLog};
pub use matcher::{ConditionScore, DiagnosisResult, Findings, MatchThreshold, Matcher};
pub use rules::{Condition, RuleTable, SeveritySet};
pub use service::{CheckReport, CheckerService};
pub use symptom::{FreeText, Symptom, SymptomLabel, SymptomSet};
