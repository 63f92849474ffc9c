use regex::Regex;
use std::sync::LazyLock;

use super::{Anchor, Classification, EventClassifier, strip_subject_marker};
use crate::tribe_log::EventKind;

/// One entry of the ordered rule list.
///
/// Suffix patterns end in `.$` rather than `!$`: OCR reads the closing
/// `!` as `l`, `1` or `|` often enough that any final character is taken.
#[derive(Debug)]
pub struct Rule {
    pub kind: EventKind,
    pub anchor: Anchor,
    pattern: Regex,
}

impl Rule {
    fn new(kind: EventKind, anchor: Anchor, pattern: &str) -> Self {
        Self {
            kind,
            anchor,
            pattern: Regex::new(pattern).expect("classification rules are valid literal regexes"),
        }
    }

    /// Strip this rule's phrase from `text`, or `None` if it does not match.
    pub fn strip<'a>(&self, text: &'a str) -> Option<&'a str> {
        let m = self.pattern.find(text)?;
        let rest = match self.anchor {
            Anchor::Prefix => &text[m.end()..],
            Anchor::Suffix => &text[..m.start()],
        };
        Some(rest.trim())
    }
}

// Order matters: "was killed" is only tried once the structure and
// starvation phrasings have failed.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(EventKind::EnemyEntityKilled, Anchor::Prefix, r"(?i)^tribe killed"),
        Rule::new(
            EventKind::StructureDestroyedByEnemy,
            Anchor::Suffix,
            r"(?i)was destroyed.$",
        ),
        Rule::new(
            EventKind::DinoStarvedToDeath,
            Anchor::Suffix,
            r"(?i)star?v?ed to dea?th.$",
        ),
        Rule::new(
            EventKind::FriendlyLivingEntityKilled,
            Anchor::Suffix,
            r"(?i)was killed.$",
        ),
        Rule::new(
            EventKind::AutoDecayDestroyed,
            Anchor::Suffix,
            r"(?i)was auto-decay destroyed.$",
        ),
    ]
});

/// Fixed-priority rule classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &'static [Rule] {
        &RULES
    }
}

impl EventClassifier for RuleClassifier {
    fn classify(&self, text: &str) -> Classification {
        let Some(remainder) = strip_subject_marker(text) else {
            return Classification::new(EventKind::Unsupported, text);
        };

        for rule in self.rules() {
            if let Some(subject) = rule.strip(remainder) {
                return Classification::new(rule.kind, subject);
            }
        }

        tracing::trace!(text = remainder, "No classification rule matched");
        Classification::new(EventKind::Unclassified, remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Classification {
        RuleClassifier::new().classify(text)
    }

    #[test]
    fn test_rule_order() {
        let order: Vec<EventKind> = RuleClassifier::new().rules().iter().map(|r| r.kind).collect();
        assert_eq!(
            order,
            vec![
                EventKind::EnemyEntityKilled,
                EventKind::StructureDestroyedByEnemy,
                EventKind::DinoStarvedToDeath,
                EventKind::FriendlyLivingEntityKilled,
                EventKind::AutoDecayDestroyed,
            ]
        );
    }

    #[test]
    fn test_enemy_killed() {
        let result = classify("Your Tribe Killed a Raptor!");
        assert_eq!(result.kind, EventKind::EnemyEntityKilled);
        assert_eq!(result.subject, "a Raptor!");

        let result = classify("your tribe killed Bob - Lvl 80 (The Tribe)!");
        assert_eq!(result.kind, EventKind::EnemyEntityKilled);
        assert_eq!(result.subject, "Bob - Lvl 80 (The Tribe)!");
    }

    #[test]
    fn test_structure_destroyed() {
        let result = classify("Your Metal Wall was destroyed!");
        assert_eq!(result.kind, EventKind::StructureDestroyedByEnemy);
        assert_eq!(result.subject, "Metal Wall");
    }

    #[test]
    fn test_exclamation_misread() {
        let result = classify("Your Metal Wall was destroyedl");
        assert_eq!(result.kind, EventKind::StructureDestroyedByEnemy);
        assert_eq!(result.subject, "Metal Wall");
    }

    #[test]
    fn test_starved_tolerates_dropped_letters() {
        for text in [
            "Your Rex - Lvl 150 starved to death!",
            "Your Rex - Lvl 150 staved to death!",
            "Your Rex - Lvl 150 starved to deth!",
            "Your Rex - Lvl 150 stared to deth!",
        ] {
            let result = classify(text);
            assert_eq!(result.kind, EventKind::DinoStarvedToDeath, "{text}");
            assert_eq!(result.subject, "Rex - Lvl 150");
        }
    }

    #[test]
    fn test_friendly_killed() {
        let result = classify("Your Argentavis - Lvl 40 (Argentavis) was killed!");
        assert_eq!(result.kind, EventKind::FriendlyLivingEntityKilled);
        assert_eq!(result.subject, "Argentavis - Lvl 40 (Argentavis)");
    }

    #[test]
    fn test_auto_decay() {
        let result = classify("Your Thatch Foundation was auto-decay destroyed!");
        assert_eq!(result.kind, EventKind::AutoDecayDestroyed);
        assert_eq!(result.subject, "Thatch Foundation");
    }

    #[test]
    fn test_overlapping_suffixes_follow_priority() {
        // Ends in "was killed!", so the earlier friendly-kill rule wins even
        // though an auto-decay phrase appears further in
        let result = classify("Your Bed was auto-decay destroyed! Your Dodo was killed!");
        assert_eq!(result.kind, EventKind::FriendlyLivingEntityKilled);
        assert_eq!(result.subject, "Bed was auto-decay destroyed! Your Dodo");

        // Prefix rule is evaluated before any suffix rule
        let result = classify("Your Tribe Killed Bob who was killed!");
        assert_eq!(result.kind, EventKind::EnemyEntityKilled);
        assert_eq!(result.subject, "Bob who was killed!");
    }

    #[test]
    fn test_unclassified_keeps_remainder() {
        let result = classify("Your  Tribemember Bob demolished a Wall");
        assert_eq!(result.kind, EventKind::Unclassified);
        assert_eq!(result.subject, "Tribemember Bob demolished a Wall");
    }

    #[test]
    fn test_unsupported_keeps_text() {
        let result = classify(" Tribemember Bob was killed! ");
        assert_eq!(result.kind, EventKind::Unsupported);
        assert_eq!(result.subject, "Tribemember Bob was killed!");
    }

    #[test]
    fn test_every_input_gets_one_kind() {
        for text in ["x", "Your", "Your x", "!", "Your was killed!"] {
            let kind = classify(text).kind;
            assert!(
                matches!(
                    kind,
                    EventKind::Unsupported | EventKind::Unclassified | EventKind::FriendlyLivingEntityKilled
                ),
                "{text} -> {kind:?}"
            );
        }
    }
}
