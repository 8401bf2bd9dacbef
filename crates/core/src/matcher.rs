//! Rule-based symptom matching.
//!
//! [`Matcher::evaluate`] is a pure function of the reported symptoms, the rule table, the
//! severity set and the match threshold. It has no failure modes: symptoms outside the
//! vocabulary simply never match.

use crate::constants::{
    DEFAULT_MATCH_THRESHOLD, LABEL_SEPARATOR, NO_CLEAR_RESULT_MESSAGE, POSSIBLE_CONDITIONS_PREFIX,
};
use crate::rules::{RuleTable, SeveritySet};
use crate::symptom::SymptomSet;
use crate::{CheckerError, CheckerResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Minimum number of a condition's symptoms that must be reported for it to qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchThreshold(usize);

impl MatchThreshold {
    /// Rejects zero, which would report every condition for every input.
    pub fn new(value: usize) -> CheckerResult<Self> {
        if value == 0 {
            return Err(CheckerError::InvalidInput(
                "match threshold must be at least 1".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for MatchThreshold {
    fn default() -> Self {
        Self(DEFAULT_MATCH_THRESHOLD)
    }
}

impl fmt::Display for MatchThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conditions found by one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "conditions", rename_all = "snake_case")]
pub enum Findings {
    /// Qualifying conditions in rule-table order. Never empty.
    Conditions(Vec<String>),
    /// No condition reached the threshold.
    NoClearResult,
}

/// Output of [`Matcher::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisResult {
    findings: Findings,
    is_severe: bool,
}

impl DiagnosisResult {
    pub fn findings(&self) -> &Findings {
        &self.findings
    }

    /// Qualifying condition names; empty for the no-clear-result case.
    pub fn conditions(&self) -> &[String] {
        match &self.findings {
            Findings::Conditions(names) => names,
            Findings::NoClearResult => &[],
        }
    }

    pub fn is_no_clear_result(&self) -> bool {
        matches!(self.findings, Findings::NoClearResult)
    }

    pub fn is_severe(&self) -> bool {
        self.is_severe
    }

    /// The result line shown to the user and written to the `result` log column.
    pub fn summary(&self) -> String {
        match &self.findings {
            Findings::Conditions(names) => format!(
                "{}: {}",
                POSSIBLE_CONDITIONS_PREFIX,
                names.join(LABEL_SEPARATOR)
            ),
            Findings::NoClearResult => NO_CLEAR_RESULT_MESSAGE.to_owned(),
        }
    }
}

impl fmt::Display for DiagnosisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Match count for one condition, for explaining a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionScore {
    pub condition: String,
    pub matched: usize,
    pub total: usize,
    pub qualifies: bool,
}

/// Evaluates reported symptoms against a rule table and severity set.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: Arc<RuleTable>,
    severity: Arc<SeveritySet>,
    threshold: MatchThreshold,
}

impl Matcher {
    pub fn new(
        rules: Arc<RuleTable>,
        severity: Arc<SeveritySet>,
        threshold: MatchThreshold,
    ) -> Self {
        Self {
            rules,
            severity,
            threshold,
        }
    }

    /// Built-in rule table and severity set with the given threshold.
    pub fn standard(threshold: MatchThreshold) -> Self {
        Self::new(
            Arc::new(RuleTable::standard()),
            Arc::new(SeveritySet::standard()),
            threshold,
        )
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn severity(&self) -> &SeveritySet {
        &self.severity
    }

    pub fn threshold(&self) -> MatchThreshold {
        self.threshold
    }

    pub fn evaluate(&self, reported: &SymptomSet) -> DiagnosisResult {
        let threshold = self.threshold.get();
        let matched: Vec<String> = self
            .rules
            .iter()
            .filter(|condition| condition.match_count(reported) >= threshold)
            .map(|condition| condition.name().to_owned())
            .collect();

        let findings = if matched.is_empty() {
            Findings::NoClearResult
        } else {
            Findings::Conditions(matched)
        };
        let is_severe = self.severity.is_triggered_by(reported);

        tracing::debug!(
            symptoms = reported.len(),
            ?findings,
            is_severe,
            "evaluated symptoms"
        );

        DiagnosisResult {
            findings,
            is_severe,
        }
    }

    /// Per-condition match counts in rule-table order.
    pub fn match_counts(&self, reported: &SymptomSet) -> Vec<ConditionScore> {
        let threshold = self.threshold.get();
        self.rules
            .iter()
            .map(|condition| {
                let matched = condition.match_count(reported);
                ConditionScore {
                    condition: condition.name().to_owned(),
                    matched,
                    total: condition.symptoms().len(),
                    qualifies: matched >= threshold,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Condition;
    use crate::symptom::Symptom;

    fn matcher() -> Matcher {
        Matcher::standard(MatchThreshold::default())
    }

    fn labels(items: &[&str]) -> SymptomSet {
        SymptomSet::from_selection(items.iter().copied(), None)
    }

    #[test]
    fn cold_symptoms_match_cold_only() {
        let result = matcher().evaluate(&labels(&["기침", "콧물", "목 통증"]));
        assert_eq!(result.conditions(), ["감기"]);
        assert!(!result.is_severe());
    }

    #[test]
    fn qualifying_conditions_follow_table_order() {
        let result = matcher().evaluate(&labels(&["피로감", "근육통", "기침", "발열"]));
        assert_eq!(result.conditions(), ["감기", "독감"]);
        assert_eq!(result.summary(), "가능한 질환: 감기, 독감");
    }

    #[test]
    fn indigestion_is_reported_alone() {
        let result = matcher().evaluate(&labels(&["복통", "구토"]));
        assert_eq!(
            result.findings(),
            &Findings::Conditions(vec!["소화불량".to_owned()])
        );
        assert!(!result.is_severe());
    }

    #[test]
    fn severity_is_independent_of_matching() {
        let result = matcher().evaluate(&labels(&["호흡곤란"]));
        assert!(result.is_no_clear_result());
        assert!(result.is_severe());
    }

    #[test]
    fn empty_input_yields_sentinel() {
        let result = matcher().evaluate(&SymptomSet::new());
        assert!(result.is_no_clear_result());
        assert!(result.conditions().is_empty());
        assert!(!result.is_severe());
        assert_eq!(result.summary(), NO_CLEAR_RESULT_MESSAGE);
    }

    #[test]
    fn single_symptom_per_condition_is_not_enough() {
        // One symptom from every rule, never two from the same rule.
        let result = matcher().evaluate(&labels(&["목 통증", "근육통", "복통", "두통"]));
        assert!(result.is_no_clear_result());
        assert!(!result.is_severe());
    }

    #[test]
    fn unrecognized_and_free_text_symptoms_never_match() {
        let set = SymptomSet::from_selection(["재채기", "기침"], Some("콧물"));
        let result = matcher().evaluate(&set);
        assert!(result.is_no_clear_result());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let m = matcher();
        let set = labels(&["발열", "기침", "호흡곤란", "흉통"]);
        assert_eq!(m.evaluate(&set), m.evaluate(&set));
    }

    #[test]
    fn every_vocabulary_subset_follows_the_rules() {
        let reference: [(&str, &[&str]); 5] = [
            ("감기", &["기침", "콧물", "목 통증", "발열"]),
            ("독감", &["발열", "기침", "근육통", "피로감"]),
            ("소화불량", &["복통", "구토"]),
            ("편두통", &["두통", "피로감"]),
            ("호흡기 질환", &["기침", "호흡곤란"]),
        ];
        let m = matcher();

        for mask in 0u32..(1 << Symptom::ALL.len()) {
            let chosen: Vec<Symptom> = Symptom::ALL
                .into_iter()
                .enumerate()
                .filter(|&(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, symptom)| symptom)
                .collect();
            let chosen_labels: Vec<&str> = chosen.iter().map(|s| s.label()).collect();

            let expected: Vec<String> = reference
                .iter()
                .filter(|(_, rule)| {
                    rule.iter().filter(|l| chosen_labels.contains(*l)).count() >= 2
                })
                .map(|(name, _)| (*name).to_owned())
                .collect();
            let expected_severe =
                chosen_labels.contains(&"호흡곤란") || chosen_labels.contains(&"흉통");

            let set: SymptomSet = chosen.iter().copied().collect();
            let result = m.evaluate(&set);

            if expected.is_empty() {
                assert_eq!(result.findings(), &Findings::NoClearResult, "{chosen_labels:?}");
            } else {
                assert_eq!(
                    result.findings(),
                    &Findings::Conditions(expected),
                    "{chosen_labels:?}"
                );
            }
            assert_eq!(result.is_severe(), expected_severe, "{chosen_labels:?}");

            // Same input again, and the same symptoms entered in reverse order.
            assert_eq!(m.evaluate(&set), result);
            let reversed: SymptomSet = chosen.iter().rev().copied().collect();
            assert_eq!(m.evaluate(&reversed), result);
        }
    }

    #[test]
    fn threshold_boundaries() {
        let rules = Arc::new(
            RuleTable::new(vec![Condition::new(
                "테스트",
                vec![Symptom::Cough, Symptom::Fever, Symptom::Headache],
            )])
            .unwrap(),
        );
        let severity = Arc::new(SeveritySet::new(Vec::<Symptom>::new()));
        let set = labels(&["기침", "발열"]);

        for (threshold, expected) in [(1, true), (2, true), (3, false)] {
            let m = Matcher::new(
                rules.clone(),
                severity.clone(),
                MatchThreshold::new(threshold).unwrap(),
            );
            assert_eq!(
                !m.evaluate(&set).is_no_clear_result(),
                expected,
                "threshold {threshold}"
            );
        }
    }

    #[test]
    fn zero_threshold_is_rejected() {
        assert!(matches!(
            MatchThreshold::new(0),
            Err(CheckerError::InvalidInput(_))
        ));
    }

    #[test]
    fn match_counts_explain_the_result() {
        let scores = matcher().match_counts(&labels(&["기침", "호흡곤란"]));
        let respiratory = scores
            .iter()
            .find(|s| s.condition == "호흡기 질환")
            .expect("respiratory rule present");
        assert_eq!(respiratory.matched, 2);
        assert_eq!(respiratory.total, 2);
        assert!(respiratory.qualifies);
        assert_eq!(scores.len(), 5);
        assert_eq!(scores[0].condition, "감기");
        assert_eq!(scores[0].matched, 1);
    }

    #[test]
    fn findings_serialise_with_kind_tag() {
        let result = matcher().evaluate(&labels(&["복통", "구토"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["findings"]["kind"], "conditions");
        assert_eq!(json["findings"]["conditions"][0], "소화불량");
        assert_eq!(json["is_severe"], false);
    }
}
