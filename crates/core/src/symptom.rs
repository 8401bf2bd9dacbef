//! Symptom vocabulary and the set of symptoms reported in one check.
//!
//! The form offers a closed list of symptoms plus one free-text box. Known symptoms are
//! modelled as [`Symptom`]; anything else (including the free-text box, whatever it contains)
//! is carried as [`SymptomLabel::Unrecognized`] so it can be logged and displayed but never
//! takes part in matching.

use crate::constants::LABEL_SEPARATOR;
use crate::{CheckerError, CheckerResult};
use std::fmt;
use std::str::FromStr;

/// A symptom from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symptom {
    Cough,
    Fever,
    Headache,
    Fatigue,
    SoreThroat,
    AbdominalPain,
    Vomiting,
    RunnyNose,
    MusclePain,
    ShortnessOfBreath,
    ChestPain,
}

impl Symptom {
    /// Every known symptom, in the order the form lists them.
    pub const ALL: [Symptom; 11] = [
        Symptom::Cough,
        Symptom::Fever,
        Symptom::Headache,
        Symptom::Fatigue,
        Symptom::SoreThroat,
        Symptom::AbdominalPain,
        Symptom::Vomiting,
        Symptom::RunnyNose,
        Symptom::MusclePain,
        Symptom::ShortnessOfBreath,
        Symptom::ChestPain,
    ];

    /// Canonical label, as offered on the form and written to the log.
    pub const fn label(self) -> &'static str {
        match self {
            Symptom::Cough => "기침",
            Symptom::Fever => "발열",
            Symptom::Headache => "두통",
            Symptom::Fatigue => "피로감",
            Symptom::SoreThroat => "목 통증",
            Symptom::AbdominalPain => "복통",
            Symptom::Vomiting => "구토",
            Symptom::RunnyNose => "콧물",
            Symptom::MusclePain => "근육통",
            Symptom::ShortnessOfBreath => "호흡곤란",
            Symptom::ChestPain => "흉통",
        }
    }

    pub const fn english(self) -> &'static str {
        match self {
            Symptom::Cough => "cough",
            Symptom::Fever => "fever",
            Symptom::Headache => "headache",
            Symptom::Fatigue => "fatigue",
            Symptom::SoreThroat => "sore throat",
            Symptom::AbdominalPain => "stomach pain",
            Symptom::Vomiting => "vomiting",
            Symptom::RunnyNose => "runny nose",
            Symptom::MusclePain => "muscle pain",
            Symptom::ShortnessOfBreath => "shortness of breath",
            Symptom::ChestPain => "chest pain",
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Symptom {
    type Err = CheckerError;

    /// Accepts the canonical label or, ignoring ASCII case, the English name.
    ///
    /// Either spelling yields the same variant, so an English name is displayed and logged as
    /// the canonical Korean label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Symptom::ALL
            .into_iter()
            .find(|symptom| {
                symptom.label() == trimmed || symptom.english().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| CheckerError::UnknownSymptom(trimmed.to_owned()))
    }
}

/// Text that is guaranteed to be non-empty after trimming.
///
/// Used for symptoms typed into the free-text box and for selections outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FreeText(String);

impl FreeText {
    /// Trims `input` and rejects it if nothing is left.
    pub fn new(input: impl AsRef<str>) -> CheckerResult<Self> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CheckerError::InvalidInput(
                "free-text symptom cannot be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FreeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FreeText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One reported symptom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymptomLabel {
    Known(Symptom),
    /// Opaque text; kept for display and logging only.
    Unrecognized(FreeText),
}

impl SymptomLabel {
    pub fn as_str(&self) -> &str {
        match self {
            SymptomLabel::Known(symptom) => symptom.label(),
            SymptomLabel::Unrecognized(text) => text.as_str(),
        }
    }

    /// Classifies a selected option: vocabulary labels become `Known`, anything else is kept
    /// as `Unrecognized`. Blank input yields `None`.
    pub fn from_selection(input: &str) -> Option<Self> {
        match input.parse::<Symptom>() {
            Ok(symptom) => Some(SymptomLabel::Known(symptom)),
            Err(_) => FreeText::new(input).ok().map(SymptomLabel::Unrecognized),
        }
    }
}

impl fmt::Display for SymptomLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Symptom> for SymptomLabel {
    fn from(symptom: Symptom) -> Self {
        SymptomLabel::Known(symptom)
    }
}

/// The symptoms reported in one check.
///
/// Membership and equality have set semantics; insertion order is remembered only so the set
/// can be shown and logged the way it was entered.
#[derive(Debug, Clone, Default)]
pub struct SymptomSet {
    labels: Vec<SymptomLabel>,
}

impl PartialEq for SymptomSet {
    fn eq(&self, other: &Self) -> bool {
        // Labels are unique within a set, so equal length plus inclusion is set equality.
        self.labels.len() == other.labels.len()
            && self.labels.iter().all(|label| other.labels.contains(label))
    }
}

impl Eq for SymptomSet {}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from the form's inputs.
    ///
    /// `selected` are the ticked options; `other` is the free-text box, which is always
    /// treated as unrecognised text even if it spells a vocabulary label.
    pub fn from_selection<I, S>(selected: I, other: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for item in selected {
            if let Some(label) = SymptomLabel::from_selection(item.as_ref()) {
                set.insert(label);
            }
        }
        if let Some(text) = other.and_then(|o| FreeText::new(o).ok()) {
            set.insert(SymptomLabel::Unrecognized(text));
        }
        set
    }

    /// Adds a label. Returns `false` if it was already present.
    pub fn insert(&mut self, label: impl Into<SymptomLabel>) -> bool {
        let label = label.into();
        if self.labels.contains(&label) {
            return false;
        }
        self.labels.push(label);
        true
    }

    pub fn contains(&self, symptom: Symptom) -> bool {
        self.labels
            .iter()
            .any(|label| matches!(label, SymptomLabel::Known(s) if *s == symptom))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomLabel> {
        self.labels.iter()
    }

    /// Known symptoms only, in insertion order.
    pub fn known(&self) -> impl Iterator<Item = Symptom> + '_ {
        self.labels.iter().filter_map(|label| match label {
            SymptomLabel::Known(symptom) => Some(*symptom),
            SymptomLabel::Unrecognized(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels joined in insertion order, as written to the `symptoms` log column.
    pub fn display_string(&self) -> String {
        self.labels
            .iter()
            .map(SymptomLabel::as_str)
            .collect::<Vec<_>>()
            .join(LABEL_SEPARATOR)
    }
}

impl FromIterator<Symptom> for SymptomSet {
    fn from_iter<T: IntoIterator<Item = Symptom>>(iter: T) -> Self {
        let mut set = Self::new();
        for symptom in iter {
            set.insert(symptom);
        }
        set
    }
}
