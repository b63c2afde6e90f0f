//! Accessibility audit boundary.
//!
//! The rule engine itself is an external collaborator; the overlay only
//! consumes its findings and guarantees its own subtree is excluded.

use serde::{Deserialize, Serialize};

use crate::element::WeakElementRef;
use crate::error::AuditError;

/// Impact level of one finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditImpact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl std::fmt::Display for AuditImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditImpact::Minor => write!(f, "minor"),
            AuditImpact::Moderate => write!(f, "moderate"),
            AuditImpact::Serious => write!(f, "serious"),
            AuditImpact::Critical => write!(f, "critical"),
        }
    }
}

/// One accessibility violation reported by the rule engine.
#[derive(Debug, Clone, Serialize)]
pub struct AuditFinding {
    pub id: String,
    pub rule_id: String,
    pub impact: AuditImpact,
    pub description: String,
    pub help: String,
    pub help_url: String,
    /// Back-reference to the offending element; may be stale.
    #[serde(skip)]
    pub element: Option<WeakElementRef>,
    pub selector: String,
    pub failure_summary: String,
    pub wcag_tags: Vec<String>,
}

/// Per-impact counts over a set of findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
    pub total: usize,
}

impl AuditSummary {
    /// Tally one finding.
    pub fn record(&mut self, impact: AuditImpact) {
        match impact {
            AuditImpact::Critical => self.critical += 1,
            AuditImpact::Serious => self.serious += 1,
            AuditImpact::Moderate => self.moderate += 1,
            AuditImpact::Minor => self.minor += 1,
        }
        self.total += 1;
    }
}

/// External accessibility rule engine, invoked on demand.
pub trait AuditEngine: Send + Sync {
    /// Run the engine over the current page and return raw findings.
    fn run(&self) -> Result<Vec<AuditFinding>, AuditError>;
}
