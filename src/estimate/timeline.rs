//! Renovation timeline estimation
//!
//! A total, pure lookup: scope level -> duration description. Never fails
//! for any input string; unknown scopes use the moderate description.

use tracing::debug;

use super::cost::ScopeLevel;

/// Duration description for a scope level
pub fn timeline_for(scope: ScopeLevel) -> &'static str {
    match scope {
        ScopeLevel::Cosmetic => "1-2 weeks (quick refresh)",
        ScopeLevel::Moderate => "3-6 weeks (includes some structural work)",
        ScopeLevel::Full => "2-4 months (complete transformation)",
        ScopeLevel::Luxury => "4-6 months (custom work, high-end finishes)",
    }
}

/// Estimate a renovation timeline from a fuzzy scope label
pub fn calculate_timeline(scope: &str) -> &'static str {
    debug!(%scope, "calculate_timeline: called");
    timeline_for(ScopeLevel::parse(scope))
}

/// User-facing timeline line
pub fn timeline_reply(scope: &str) -> String {
    format!("Estimated Timeline: {}", calculate_timeline(scope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scopes_covered() {
        for scope in ScopeLevel::ALL {
            assert!(!timeline_for(scope).is_empty());
        }
    }

    #[test]
    fn test_calculate_timeline_full() {
        assert_eq!(calculate_timeline("full"), "2-4 months (complete transformation)");
    }

    #[test]
    fn test_calculate_timeline_unknown_falls_back() {
        assert_eq!(
            calculate_timeline("unknown"),
            "3-6 weeks (includes some structural work)"
        );
    }

    #[test]
    fn test_timeline_reply_format() {
        assert_eq!(
            timeline_reply("cosmetic"),
            "Estimated Timeline: 1-2 weeks (quick refresh)"
        );
    }
}
