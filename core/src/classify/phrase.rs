use super::{Anchor, Classification, EventClassifier, strip_subject_marker};
use crate::tribe_log::EventKind;

/// Scores how closely a window of payload text matches a canonical phrase.
///
/// Scores are in `0.0..=1.0`, higher is closer. Implement this to plug in
/// an external fuzzy-matching service.
pub trait PhraseScorer {
    fn score(&self, candidate: &str, phrase: &str) -> f32;
}

/// Case-insensitive normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl PhraseScorer for EditDistanceScorer {
    fn score(&self, candidate: &str, phrase: &str) -> f32 {
        let a: Vec<char> = candidate.to_lowercase().chars().collect();
        let b: Vec<char> = phrase.to_lowercase().chars().collect();
        let longest = a.len().max(b.len());
        if longest == 0 {
            return 1.0;
        }
        1.0 - levenshtein(&a, &b) as f32 / longest as f32
    }
}

fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// A canonical phrase and the event kind it signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogPhrase {
    pub phrase: &'static str,
    pub kind: EventKind,
    pub anchor: Anchor,
}

/// Canonical tribe log phrasings. Ties on score go to the earlier entry.
pub static DEFAULT_CATALOG: &[CatalogPhrase] = &[
    CatalogPhrase {
        phrase: "Tribe Killed",
        kind: EventKind::EnemyEntityKilled,
        anchor: Anchor::Prefix,
    },
    CatalogPhrase {
        phrase: "was destroyed!",
        kind: EventKind::StructureDestroyedByEnemy,
        anchor: Anchor::Suffix,
    },
    CatalogPhrase {
        phrase: "starved to death!",
        kind: EventKind::DinoStarvedToDeath,
        anchor: Anchor::Suffix,
    },
    CatalogPhrase {
        phrase: "was killed!",
        kind: EventKind::FriendlyLivingEntityKilled,
        anchor: Anchor::Suffix,
    },
    CatalogPhrase {
        phrase: "was auto-decay destroyed!",
        kind: EventKind::AutoDecayDestroyed,
        anchor: Anchor::Suffix,
    },
];

/// Byte offset `n` characters into `text`, clamped to its length.
fn char_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

/// Split `text` into (window, rest) where the window is the phrase-length
/// slice at the anchored end.
fn split_window(text: &str, anchor: Anchor, len: usize) -> (&str, &str) {
    match anchor {
        Anchor::Prefix => {
            let end = char_offset(text, len);
            (&text[..end], &text[end..])
        }
        Anchor::Suffix => {
            let count = text.chars().count();
            let start = char_offset(text, count.saturating_sub(len));
            (&text[start..], &text[..start])
        }
    }
}

/// Classifier that scores every catalog phrase against the payload and
/// keeps the best one above a threshold.
#[derive(Debug, Clone)]
pub struct PhraseClassifier<S = EditDistanceScorer> {
    scorer: S,
    catalog: &'static [CatalogPhrase],
    min_score: f32,
}

impl<S: PhraseScorer> PhraseClassifier<S> {
    pub fn new(scorer: S, min_score: f32) -> Self {
        Self::with_catalog(scorer, DEFAULT_CATALOG, min_score)
    }

    pub fn with_catalog(scorer: S, catalog: &'static [CatalogPhrase], min_score: f32) -> Self {
        Self {
            scorer,
            catalog,
            min_score,
        }
    }
}

impl<S: PhraseScorer> EventClassifier for PhraseClassifier<S> {
    fn classify(&self, text: &str) -> Classification {
        let Some(remainder) = strip_subject_marker(text) else {
            return Classification::new(EventKind::Unsupported, text);
        };

        let mut best: Option<(f32, EventKind, &str)> = None;
        for entry in self.catalog {
            let (window, rest) =
                split_window(remainder, entry.anchor, entry.phrase.chars().count());
            let score = self.scorer.score(window, entry.phrase);
            if score < self.min_score {
                continue;
            }
            if best.is_none_or(|(top, _, _)| score > top) {
                best = Some((score, entry.kind, rest));
            }
        }

        match best {
            Some((score, kind, rest)) => {
                tracing::trace!(score, ?kind, "Phrase match");
                Classification::new(kind, rest)
            }
            None => Classification::new(EventKind::Unclassified, remainder),
        }
    }
}
