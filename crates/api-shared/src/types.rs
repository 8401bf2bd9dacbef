//! Request and response types.
//!
//! Every type derives `serde` and `utoipa::ToSchema` so the same definitions drive JSON
//! bodies and the OpenAPI document.

use serde::{Deserialize, Serialize};
use symcheck_core::constants::{DISCLAIMER, SEVERITY_NOTICE};
use symcheck_core::{
    CheckReport, Condition, DiagnosisResult, LogEntry, Matcher, Symptom, SymptomSet,
};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SymptomRes {
    pub label: String,
    pub english: String,
    /// Reporting this symptom raises the urgent notice.
    pub urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VocabularyRes {
    pub symptoms: Vec<SymptomRes>,
}

impl VocabularyRes {
    pub fn from_matcher(matcher: &Matcher) -> Self {
        Self {
            symptoms: Symptom::ALL
                .into_iter()
                .map(|symptom| SymptomRes {
                    label: symptom.label().into(),
                    english: symptom.english().into(),
                    urgent: matcher.severity().contains(symptom),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionRes {
    pub name: String,
    pub symptoms: Vec<String>,
}

impl From<&Condition> for ConditionRes {
    fn from(condition: &Condition) -> Self {
        Self {
            name: condition.name().into(),
            symptoms: condition
                .symptoms()
                .iter()
                .map(|s| s.label().to_owned())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RulesRes {
    /// Conditions in evaluation order.
    pub conditions: Vec<ConditionRes>,
    pub match_threshold: usize,
    pub severity_symptoms: Vec<String>,
}

impl RulesRes {
    pub fn from_matcher(matcher: &Matcher) -> Self {
        Self {
            conditions: matcher.rules().iter().map(ConditionRes::from).collect(),
            match_threshold: matcher.threshold().get(),
            severity_symptoms: matcher
                .severity()
                .iter()
                .map(|s| s.label().to_owned())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckReq {
    /// Selected symptom labels. Labels outside the vocabulary are recorded but never match.
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Free-text symptom description. Recorded only.
    #[serde(default)]
    pub other_symptom: Option<String>,
}

impl CheckReq {
    pub fn symptom_set(&self) -> SymptomSet {
        SymptomSet::from_selection(&self.symptoms, self.other_symptom.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckRes {
    /// Qualifying conditions in rule-table order; empty when `no_clear_result` is set.
    pub conditions: Vec<String>,
    pub no_clear_result: bool,
    pub is_severe: bool,
    pub summary: String,
    /// Present only when `is_severe` is set.
    pub severity_notice: Option<String>,
    pub disclaimer: String,
    /// Log timestamp, absent when the check was not recorded.
    pub logged_at: Option<String>,
}

impl CheckRes {
    pub fn from_result(result: &DiagnosisResult) -> Self {
        Self {
            conditions: result.conditions().to_vec(),
            no_clear_result: result.is_no_clear_result(),
            is_severe: result.is_severe(),
            summary: result.summary(),
            severity_notice: result.is_severe().then(|| SEVERITY_NOTICE.to_owned()),
            disclaimer: DISCLAIMER.to_owned(),
            logged_at: None,
        }
    }
}

impl From<&CheckReport> for CheckRes {
    fn from(report: &CheckReport) -> Self {
        Self {
            logged_at: Some(report.entry.datetime_string()),
            ..Self::from_result(&report.result)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogEntryRes {
    pub datetime: String,
    pub symptoms: String,
    pub result: String,
}

impl From<&LogEntry> for LogEntryRes {
    fn from(entry: &LogEntry) -> Self {
        Self {
            datetime: entry.datetime_string(),
            symptoms: entry.symptoms.clone(),
            result: entry.result.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryRes {
    pub entries: Vec<LogEntryRes>,
}
