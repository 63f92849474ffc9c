//! Event classification for tribe log payloads.
//!
//! Two implementations share the [`EventClassifier`] contract:
//! - **Rules**: ordered prefix/suffix patterns, first match wins
//! - **Phrase**: similarity scoring against a catalog of canonical phrases
//!
//! Both gate on the leading subject marker ("Your", as OCR sees it) before
//! looking at the rest of the text. The implementation is picked once, at
//! session construction, through [`build_classifier`].

mod phrase;
mod rules;

pub use phrase::{CatalogPhrase, DEFAULT_CATALOG, EditDistanceScorer, PhraseClassifier, PhraseScorer};
pub use rules::{Rule, RuleClassifier};

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;
use tribelog_types::{ClassifierKind, ClassifierSettings};

use crate::tribe_log::{EventKind, LogRecord, TimestampedLine};

/// "Your", tolerating one stray leading character and the Y/V, O/0 misreads.
static SUBJECT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^.?[yv][o0]ur").expect("subject marker is a valid literal regex")
});

/// Which end of the payload a terminal phrase is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Prefix,
    Suffix,
}

/// Outcome of classifying one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: EventKind,
    /// Payload with marker and matched phrase stripped
    pub subject: String,
}

impl Classification {
    pub fn new(kind: EventKind, subject: &str) -> Self {
        Self {
            kind,
            subject: subject.trim().to_string(),
        }
    }
}

pub trait EventClassifier {
    fn classify(&self, text: &str) -> Classification;

    /// Consume a timestamped line and produce its classified record.
    ///
    /// Taking the line by value means a payload is classified exactly once.
    fn classify_line(&self, line: TimestampedLine, ingested_at: NaiveDateTime) -> LogRecord {
        let Classification { kind, subject } = self.classify(&line.text);
        LogRecord::new(line.time, kind, subject, ingested_at)
    }
}

/// Strip the leading subject marker, returning the rest with leading
/// whitespace removed. `None` when the marker is absent.
pub fn strip_subject_marker(text: &str) -> Option<&str> {
    let text = text.trim();
    let marker = SUBJECT_MARKER.find(text)?;
    Some(text[marker.end()..].trim_start())
}

/// Build the classifier selected by the settings.
pub fn build_classifier(settings: &ClassifierSettings) -> Box<dyn EventClassifier + Send + Sync> {
    match settings.kind {
        ClassifierKind::Rules => Box::new(RuleClassifier::new()),
        ClassifierKind::Phrase => Box::new(PhraseClassifier::new(
            EditDistanceScorer,
            settings.min_phrase_score,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tribe_log::GameTime;
    use chrono::Local;

    #[test]
    fn test_marker_variants() {
        assert_eq!(strip_subject_marker("Your Wall"), Some("Wall"));
        assert_eq!(strip_subject_marker("your Wall"), Some("Wall"));
        assert_eq!(strip_subject_marker("Vour Wall"), Some("Wall"));
        assert_eq!(strip_subject_marker("Y0ur Wall"), Some("Wall"));
        assert_eq!(strip_subject_marker("'Your Wall"), Some("Wall"));
        assert_eq!(strip_subject_marker("  Your   Wall"), Some("Wall"));
    }

    #[test]
    fn test_marker_absent() {
        assert_eq!(strip_subject_marker("Tribemember Bob was killed!"), None);
        assert_eq!(strip_subject_marker("xxYour Wall"), None);
        assert_eq!(strip_subject_marker(""), None);
    }

    #[test]
    fn test_build_classifier_selects_implementation() {
        let text = "Your Stone Wall was destroyed!";
        for kind in [ClassifierKind::Rules, ClassifierKind::Phrase] {
            let settings = ClassifierSettings {
                kind,
                ..Default::default()
            };
            let classifier = build_classifier(&settings);
            let result = classifier.classify(text);
            assert_eq!(result.kind, EventKind::StructureDestroyedByEnemy);
            assert_eq!(result.subject, "Stone Wall");
        }
    }

    #[test]
    fn test_classify_line_carries_timestamp() {
        let classifier = RuleClassifier::new();
        let line = TimestampedLine {
            time: GameTime::new(102, 14, 23, 5),
            text: "Your Tribe Killed a Raptor!".to_string(),
        };
        let record = classifier.classify_line(line, Local::now().naive_local());
        assert_eq!(record.time, GameTime::new(102, 14, 23, 5));
        assert_eq!(record.kind, EventKind::EnemyEntityKilled);
        assert_eq!(record.subject, "a Raptor!");
        assert_eq!(record.repeat_count, 0);
    }
}
