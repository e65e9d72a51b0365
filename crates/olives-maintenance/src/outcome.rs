//! Pass identities and result types for a maintenance run.

/// The maintenance passes, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Delete expired account tokens.
    AccountTokens,
    /// Delete pending accounts past their grace window.
    PendingAccounts,
    /// Transition overdue appointments.
    Appointments,
    /// Remove junk file records and their backing files.
    JunkFiles,
}

impl Pass {
    /// Every pass, in the order the runner executes them.
    pub const ALL: [Pass; 4] = [
        Pass::AccountTokens,
        Pass::PendingAccounts,
        Pass::Appointments,
        Pass::JunkFiles,
    ];

    /// Stable name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Pass::AccountTokens => "account_tokens",
            Pass::PendingAccounts => "pending_accounts",
            Pass::Appointments => "appointments",
            Pass::JunkFiles => "junk_files",
        }
    }
}

/// Result of a single maintenance pass.
///
/// A failed pass is recorded, not propagated: the runner logs it and
/// continues with the remaining passes. Callers that only read
/// [`affected`](PassOutcome::affected) see zero for a failed pass, the
/// same as a pass that found nothing to do; match on the variant to
/// tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The pass ran to completion, touching `affected` rows.
    Completed { affected: u64 },
    /// The pass aborted; no count is available.
    Failed { error: String },
}

impl PassOutcome {
    /// Rows touched by the pass; zero when it failed.
    pub fn affected(&self) -> u64 {
        match self {
            PassOutcome::Completed { affected } => *affected,
            PassOutcome::Failed { .. } => 0,
        }
    }

    /// Whether the pass aborted.
    pub fn is_failed(&self) -> bool {
        matches!(self, PassOutcome::Failed { .. })
    }
}

/// Timing and outcome of one executed pass.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub pass: Pass,
    pub outcome: PassOutcome,
    pub duration_ms: u64,
}

/// Summary of a full maintenance run, one report per pass in order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub passes: Vec<PassReport>,
}

impl RunReport {
    pub(crate) fn push(&mut self, report: PassReport) {
        self.passes.push(report);
    }

    /// Total rows touched across every completed pass.
    pub fn total_affected(&self) -> u64 {
        self.passes.iter().map(|p| p.outcome.affected()).sum()
    }

    /// Number of passes that aborted.
    pub fn failure_count(&self) -> usize {
        self.passes.iter().filter(|p| p.outcome.is_failed()).count()
    }
}
