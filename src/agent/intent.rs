//! Turn intent classification
//!
//! A pure classifier mapping a user utterance (plus the set of known
//! rendering names) to a tagged intent. The orchestrator dispatches on the
//! result with a single match; no string probing is scattered through
//! control flow. Precedence: create, then edit, then estimate, then
//! advisory - first match wins.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Classified intent of one user turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentKind {
    Create(CreateIntent),
    Edit(EditIntent),
    Estimate(EstimateIntent),
    Advisory,
}

/// Request to generate a new rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIntent {
    /// The full utterance, used as the rendering description
    pub description: String,
    /// Aspect ratio like "16:9" when one appears in the text
    pub aspect_ratio: Option<String>,
    /// Explicit asset name when the user supplies one
    pub asset_name: Option<String>,
}

/// Request to edit an existing rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditIntent {
    /// The asset the user is referring to (always a known name)
    pub target: String,
    /// The full utterance, used as the edit instructions
    pub instructions: String,
    /// Requested new display name, if any
    pub new_name: Option<String>,
}

/// Request for cost and/or timeline figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateIntent {
    pub room: Option<String>,
    pub scope: Option<String>,
    pub area: Option<i64>,
    pub wants_cost: bool,
    pub wants_timeline: bool,
}

static CREATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(generate|create|make|render|produce|visualize|show me)\b.{0,80}\b(rendering|visualization|mockup|image)\b")
        .expect("create intent regex is valid")
});

static EDIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(edit|change|update|modify|tweak|adjust|redo)\b").expect("edit intent regex is valid")
});

static ASPECT_RATIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}:\d{1,2})\b").expect("aspect ratio regex is valid"));

static ASSET_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:named?|call(?:ed)?(?:\s+it)?)\s+([A-Za-z0-9_\-]+)").expect("asset name regex is valid")
});

static RENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\brename(?:\s+it)?\s+(?:to\s+)?([A-Za-z0-9_\-]+)").expect("rename regex is valid")
});

static COST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(cost|price|budget|how much|expensive)\b").expect("cost regex is valid")
});

static TIMELINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(timeline|how long|duration|schedule)\b").expect("timeline regex is valid")
});

static ROOM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(kitchen|bathroom|bedroom|living\s*room)\b").expect("room regex is valid")
});

static SCOPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(cosmetic|moderate|full|luxury)\b").expect("scope regex is valid")
});

static AREA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d[\d,]*)\s*(?:sq\.?\s*(?:ft|feet)?|square\s+feet|sqft|sf)\b")
        .expect("area regex is valid")
});

/// Classify one user utterance
///
/// `known_assets` are the display names currently in the rendering
/// registry; an edit intent is only produced when a target among them is
/// identifiable (by name, or implicitly when exactly one exists).
pub fn classify(text: &str, known_assets: &[String]) -> IntentKind {
    debug!(text_len = %text.len(), known_asset_count = %known_assets.len(), "classify: called");

    if CREATE_RE.is_match(text) {
        let intent = IntentKind::Create(CreateIntent {
            description: text.to_string(),
            aspect_ratio: ASPECT_RATIO_RE
                .captures(text)
                .map(|c| c[1].to_string()),
            asset_name: ASSET_NAME_RE.captures(text).map(|c| c[1].to_string()),
        });
        debug!("classify: create intent");
        return intent;
    }

    if EDIT_RE.is_match(text) {
        if let Some(target) = identify_target(text, known_assets) {
            debug!(%target, "classify: edit intent");
            return IntentKind::Edit(EditIntent {
                target,
                instructions: text.to_string(),
                new_name: RENAME_RE.captures(text).map(|c| c[1].to_string()),
            });
        }
        debug!("classify: edit verb but no identifiable target");
    }

    let wants_cost = COST_RE.is_match(text);
    let wants_timeline = TIMELINE_RE.is_match(text);
    if wants_cost || wants_timeline {
        let room = ROOM_RE.captures(text).map(|c| c[1].to_lowercase());
        let scope = SCOPE_RE.captures(text).map(|c| c[1].to_lowercase());
        let area = AREA_RE
            .captures(text)
            .and_then(|c| c[1].replace(',', "").parse::<i64>().ok());

        let cost_ready = wants_cost && room.is_some() && area.is_some();
        let timeline_ready = (wants_timeline || cost_ready) && scope.is_some();
        if cost_ready || timeline_ready {
            debug!(?room, ?scope, ?area, "classify: estimate intent");
            return IntentKind::Estimate(EstimateIntent {
                room,
                scope,
                area,
                wants_cost: cost_ready,
                wants_timeline: timeline_ready,
            });
        }
        debug!("classify: estimate keywords but parameters not identifiable");
    }

    debug!("classify: advisory");
    IntentKind::Advisory
}

/// Find which known asset an edit refers to
///
/// An explicit mention wins; otherwise a lone registered asset is an
/// unambiguous implicit target.
fn identify_target(text: &str, known_assets: &[String]) -> Option<String> {
    let lower = text.to_lowercase();
    if let Some(name) = known_assets.iter().find(|name| lower.contains(&name.to_lowercase())) {
        return Some(name.clone());
    }
    if known_assets.len() == 1 {
        return Some(known_assets[0].clone());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_assets() -> Vec<String> {
        vec![]
    }

    #[test]
    fn test_create_intent() {
        let intent = classify("Please create a rendering of my kitchen with white cabinets", &no_assets());
        match intent {
            IntentKind::Create(c) => {
                assert!(c.description.contains("white cabinets"));
                assert!(c.aspect_ratio.is_none());
                assert!(c.asset_name.is_none());
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_create_intent_with_ratio_and_name() {
        let intent = classify(
            "Generate a 4:3 rendering of the bathroom, call it spa_bath",
            &no_assets(),
        );
        match intent {
            IntentKind::Create(c) => {
                assert_eq!(c.aspect_ratio.as_deref(), Some("4:3"));
                assert_eq!(c.asset_name.as_deref(), Some("spa_bath"));
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_create_takes_precedence_over_edit_words() {
        // "make" + "rendering" wins even though "change" also appears
        let intent = classify("Make a rendering and change the floors to oak", &["kitchen".to_string()]);
        assert!(matches!(intent, IntentKind::Create(_)));
    }

    #[test]
    fn test_edit_intent_explicit_target() {
        let assets = vec!["kitchen_refresh".to_string(), "spa_bath".to_string()];
        let intent = classify("Edit spa_bath: make the tile herringbone", &assets);
        match intent {
            IntentKind::Edit(e) => {
                assert_eq!(e.target, "spa_bath");
                assert!(e.new_name.is_none());
            }
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_intent_implicit_single_asset() {
        let assets = vec!["kitchen_refresh".to_string()];
        let intent = classify("Change the backsplash to emerald green", &assets);
        match intent {
            IntentKind::Edit(e) => assert_eq!(e.target, "kitchen_refresh"),
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_with_rename() {
        let assets = vec!["kitchen_refresh".to_string()];
        let intent = classify("Update kitchen_refresh and rename it to dream_kitchen", &assets);
        match intent {
            IntentKind::Edit(e) => assert_eq!(e.new_name.as_deref(), Some("dream_kitchen")),
            other => panic!("expected edit, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_without_identifiable_target_falls_through() {
        // Two assets, neither named: ambiguous, so not an edit
        let assets = vec!["a".repeat(20), "b".repeat(20)];
        let intent = classify("Change the walls to blue", &assets);
        assert_eq!(intent, IntentKind::Advisory);
    }

    #[test]
    fn test_estimate_intent_with_all_parameters() {
        let intent = classify(
            "How much would a moderate kitchen renovation cost for 100 sq ft?",
            &no_assets(),
        );
        match intent {
            IntentKind::Estimate(e) => {
                assert_eq!(e.room.as_deref(), Some("kitchen"));
                assert_eq!(e.scope.as_deref(), Some("moderate"));
                assert_eq!(e.area, Some(100));
                assert!(e.wants_cost);
                assert!(e.wants_timeline);
            }
            other => panic!("expected estimate, got {other:?}"),
        }
    }

    #[test]
    fn test_timeline_only_intent() {
        let intent = classify("What's the timeline for a full renovation?", &no_assets());
        match intent {
            IntentKind::Estimate(e) => {
                assert!(!e.wants_cost);
                assert!(e.wants_timeline);
                assert_eq!(e.scope.as_deref(), Some("full"));
            }
            other => panic!("expected estimate, got {other:?}"),
        }
    }

    #[test]
    fn test_cost_question_without_area_is_advisory() {
        let intent = classify("What's the average cost to renovate a bedroom?", &no_assets());
        assert_eq!(intent, IntentKind::Advisory);
    }

    #[test]
    fn test_area_with_commas() {
        let intent = classify("cost for a luxury kitchen, 1,200 sqft", &no_assets());
        match intent {
            IntentKind::Estimate(e) => assert_eq!(e.area, Some(1200)),
            other => panic!("expected estimate, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_question_is_advisory() {
        let intent = classify("I want to renovate my kitchen", &no_assets());
        assert_eq!(intent, IntentKind::Advisory);
    }
}
