//! Audit boundary: invoking the external rule engine and enforcing
//! self-exclusion over its findings.

use serde::Serialize;
use tracing::debug;

use pagelens_protocols::{
    is_within_marked_subtree, AuditEngine, AuditError, AuditFinding, AuditImpact, AuditSummary,
    ElementHandle, ElementRef, HostPage, OVERLAY_ROOT_ATTR,
};

/// Findings from one audit run, with the overlay's own subtree removed.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub findings: Vec<AuditFinding>,
    pub summary: AuditSummary,
}

impl AuditReport {
    /// Findings at exactly `impact`.
    pub fn findings_with_impact(&self, impact: AuditImpact) -> Vec<&AuditFinding> {
        self.findings
            .iter()
            .filter(|f| f.impact == impact)
            .collect()
    }
}

/// Live element for a finding, for re-highlighting.
///
/// Prefers the stored reference while it is still attached, then the stored
/// selector. `None` means the finding can no longer be pointed at on the
/// page; callers skip highlighting for it.
pub fn resolve_finding_element(finding: &AuditFinding, page: &dyn HostPage) -> Option<ElementRef> {
    if let Some(weak) = &finding.element {
        if let Some(element) = weak.upgrade() {
            if element.is_connected() {
                return Some(element);
            }
        }
    }
    if !finding.selector.is_empty() {
        if let Some(element) = page.query_selector(&finding.selector) {
            return Some(element);
        }
    }
    None
}

pub(crate) fn run_audit(
    engine: &dyn AuditEngine,
    page: &dyn HostPage,
) -> Result<AuditReport, AuditError> {
    let raw = engine.run()?;
    let total = raw.len();

    let mut findings = Vec::new();
    let mut summary = AuditSummary::default();
    for finding in raw {
        // The overlay's own chrome is never an audit target.
        if let Some(element) = resolve_finding_element(&finding, page) {
            if is_within_marked_subtree(&element, OVERLAY_ROOT_ATTR) {
                continue;
            }
        }
        summary.record(finding.impact);
        findings.push(finding);
    }

    debug!(
        total,
        kept = findings.len(),
        "audit run transformed"
    );
    Ok(AuditReport { findings, summary })
}
