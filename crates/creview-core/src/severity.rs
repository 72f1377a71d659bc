//! # Severity
//!
//! Finding severities in presentation order. The derived `Ord` follows
//! declaration order, so sorting a list of findings by severity puts
//! `Critical` first.

use serde::Serialize;

/// Severity of a disclosure finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Directly exploitable, e.g. a brute-forceable hash of a secret.
    Critical,
    /// A secret may leave the private scope.
    High,
    /// Needs a human to confirm the disclosure intent.
    Medium,
}

impl Severity {
    /// All severities in presentation order.
    pub fn all() -> &'static [Severity] {
        &[Self::Critical, Self::High, Self::Medium]
    }

    /// Lowercase identifier used in summaries and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
        }
    }

    /// Icon printed in front of each finding.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Critical => "\u{1F534}",
            Self::High => "\u{1F7E0}",
            Self::Medium => "\u{1F7E1}",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_presentation_order() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        let mut all = vec![Severity::Medium, Severity::Critical, Severity::High];
        all.sort();
        assert_eq!(all, Severity::all());
    }

    #[test]
    fn icons() {
        assert_eq!(Severity::Critical.icon(), "🔴");
        assert_eq!(Severity::High.icon(), "🟠");
        assert_eq!(Severity::Medium.icon(), "🟡");
    }

    #[test]
    fn display_matches_as_str() {
        for s in Severity::all() {
            assert_eq!(s.to_string(), s.as_str());
        }
    }
}
