//! Rule table and severity set.
//!
//! Both are built once at startup and shared read-only; nothing in the crate mutates them
//! after construction.

use crate::symptom::{Symptom, SymptomSet};
use crate::{CheckerError, CheckerResult};
use std::collections::HashSet;

/// A candidate condition and the symptoms associated with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    name: String,
    symptoms: Vec<Symptom>,
}

impl Condition {
    pub fn new(name: impl Into<String>, symptoms: Vec<Symptom>) -> Self {
        Self {
            name: name.into(),
            symptoms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    /// Number of this condition's symptoms present in `reported`.
    pub fn match_count(&self, reported: &SymptomSet) -> usize {
        self.symptoms
            .iter()
            .filter(|symptom| reported.contains(**symptom))
            .count()
    }
}

/// Ordered mapping from condition name to associated symptoms.
///
/// Iteration order is definition order, which is also the order conditions appear in a
/// result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    conditions: Vec<Condition>,
}

impl RuleTable {
    /// Validates and wraps `conditions`.
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::InvalidRuleTable` if:
    /// - the table is empty,
    /// - a condition name is blank or repeated, or
    /// - a condition has no symptoms or lists a symptom twice.
    pub fn new(conditions: Vec<Condition>) -> CheckerResult<Self> {
        if conditions.is_empty() {
            return Err(CheckerError::InvalidRuleTable(
                "at least one condition is required".into(),
            ));
        }

        let mut names = HashSet::new();
        for condition in &conditions {
            if condition.name.trim().is_empty() {
                return Err(CheckerError::InvalidRuleTable(
                    "condition name cannot be empty".into(),
                ));
            }
            if !names.insert(condition.name.as_str()) {
                return Err(CheckerError::InvalidRuleTable(format!(
                    "duplicate condition: {}",
                    condition.name
                )));
            }
            if condition.symptoms.is_empty() {
                return Err(CheckerError::InvalidRuleTable(format!(
                    "condition {} has no symptoms",
                    condition.name
                )));
            }
            let mut seen = HashSet::new();
            if let Some(repeated) = condition.symptoms.iter().find(|s| !seen.insert(**s)) {
                return Err(CheckerError::InvalidRuleTable(format!(
                    "condition {} lists {} more than once",
                    condition.name, repeated
                )));
            }
        }

        Ok(Self { conditions })
    }

    /// The built-in table used by the checker.
    pub fn standard() -> Self {
        use Symptom::*;

        Self {
            conditions: vec![
                Condition::new("감기", vec![Cough, RunnyNose, SoreThroat, Fever]),
                Condition::new("독감", vec![Fever, Cough, MusclePain, Fatigue]),
                Condition::new("소화불량", vec![AbdominalPain, Vomiting]),
                Condition::new("편두통", vec![Headache, Fatigue]),
                Condition::new("호흡기 질환", vec![Cough, ShortnessOfBreath]),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Symptoms that call for urgent care regardless of which conditions match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeveritySet {
    symptoms: Vec<Symptom>,
}

impl SeveritySet {
    pub fn new(symptoms: impl IntoIterator<Item = Symptom>) -> Self {
        let mut unique: Vec<Symptom> = Vec::new();
        for symptom in symptoms {
            if !unique.contains(&symptom) {
                unique.push(symptom);
            }
        }
        Self { symptoms: unique }
    }

    pub fn standard() -> Self {
        Self::new([Symptom::ShortnessOfBreath, Symptom::ChestPain])
    }

    pub fn contains(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }

    pub fn is_triggered_by(&self, reported: &SymptomSet) -> bool {
        reported.known().any(|symptom| self.contains(symptom))
    }

    pub fn iter(&self) -> impl Iterator<Item = Symptom> + '_ {
        self.symptoms.iter().copied()
    }
}
