// crates/ledger-harness-core/src/runtime/steps.rs
// ============================================================================
// Module: Run Context and Step Judging
// Description: Per-run event emission and judged ledger steps.
// Purpose: Turn every ledger call into a recorded, judged step.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! A [`RunContext`] belongs to one scenario run. It stamps events with the
//! run identifier, forwards them to the injected reporter, and keeps the
//! ordered list of judged [`StepRecord`]s. [`RunContext::run_step`] and
//! [`RunContext::run_authorization_step`] turn a ledger call into a verdict:
//! any verdict other than [`Verdict::Pass`] becomes a [`HarnessError`] and
//! ends the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::sync::Arc;

use crate::core::events::EventKind;
use crate::core::events::HarnessEvent;
use crate::core::outcome::Expectation;
use crate::core::outcome::StepOutcome;
use crate::core::outcome::StepRecord;
use crate::core::outcome::Verdict;
use crate::core::outcome::judge;
use crate::core::outcome::judge_authorization;
use crate::interfaces::HarnessReporter;
use crate::interfaces::LedgerError;
use crate::interfaces::step_outcome;
use crate::runtime::error::HarnessError;

// ============================================================================
// SECTION: Run Context
// ============================================================================

/// Event and step bookkeeping for one run.
///
/// # Invariants
/// - Records are kept in execution order.
/// - Single-threaded: the harness never runs steps concurrently.
pub struct RunContext {
    /// Run identifier stamped on every event.
    run_id: String,
    /// Injected event sink.
    reporter: Arc<dyn HarnessReporter>,
    /// Judged steps in execution order.
    records: RefCell<Vec<StepRecord>>,
}

impl RunContext {
    /// Creates a context for one run.
    #[must_use]
    pub fn new(run_id: impl Into<String>, reporter: Arc<dyn HarnessReporter>) -> Self {
        Self {
            run_id: run_id.into(),
            reporter,
            records: RefCell::new(Vec::new()),
        }
    }

    /// Returns the run identifier.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Emits an event to the reporter.
    pub fn emit(&self, kind: EventKind) {
        self.reporter.record(&HarnessEvent::new(self.run_id.clone(), kind));
    }

    /// Emits a free-form note.
    pub fn note(&self, message: impl Into<String>) {
        self.emit(EventKind::Note {
            message: message.into(),
        });
    }

    /// Announces a step before it is submitted.
    pub fn begin(&self, step: &str, expectation: Expectation) {
        self.emit(EventKind::StepStarted {
            step: step.to_string(),
            expectation,
        });
    }

    /// Judges and records a finished step without failing the run.
    pub fn finish(&self, step: &str, expectation: Expectation, outcome: StepOutcome) -> StepRecord {
        let verdict = judge(expectation, &outcome);
        self.record(step, expectation, outcome, verdict)
    }

    /// Appends a judged step and emits it.
    fn record(
        &self,
        step: &str,
        expectation: Expectation,
        outcome: StepOutcome,
        verdict: Verdict,
    ) -> StepRecord {
        let record = StepRecord {
            step: step.to_string(),
            expectation,
            outcome,
            verdict,
        };
        self.records.borrow_mut().push(record.clone());
        self.emit(EventKind::StepFinished {
            record: record.clone(),
        });
        record
    }

    /// Runs one ledger call as a judged step.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the verdict is not a pass.
    pub fn run_step<F>(
        &self,
        step: &str,
        expectation: Expectation,
        submit: F,
    ) -> Result<StepOutcome, HarnessError>
    where
        F: FnOnce() -> Result<(), LedgerError>,
    {
        self.begin(step, expectation);
        let outcome = step_outcome(&submit());
        let record = self.finish(step, expectation, outcome);
        ensure_pass(&record)?;
        Ok(record.outcome)
    }

    /// Runs a payment whose admission depends on signature weight.
    ///
    /// Same as [`RunContext::run_step`], except that an expected rejection
    /// must carry an authorization failure code.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the verdict is not a pass.
    pub fn run_authorization_step<F>(
        &self,
        step: &str,
        expectation: Expectation,
        submit: F,
    ) -> Result<StepOutcome, HarnessError>
    where
        F: FnOnce() -> Result<(), LedgerError>,
    {
        self.begin(step, expectation);
        let outcome = step_outcome(&submit());
        let verdict = judge_authorization(expectation, &outcome);
        let record = self.record(step, expectation, outcome, verdict);
        ensure_pass(&record)?;
        Ok(record.outcome)
    }

    /// Returns a copy of the judged steps so far.
    #[must_use]
    pub fn records(&self) -> Vec<StepRecord> {
        self.records.borrow().clone()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a non-passing record into the matching fatal error.
///
/// # Errors
///
/// Returns [`HarnessError`] for every verdict other than [`Verdict::Pass`].
pub fn ensure_pass(record: &StepRecord) -> Result<(), HarnessError> {
    match &record.verdict {
        Verdict::Pass => Ok(()),
        Verdict::UnexpectedAdmission => Err(HarnessError::UnexpectedAdmission {
            step: record.step.clone(),
        }),
        Verdict::UnexpectedRejection(code) => Err(HarnessError::UnexpectedRejection {
            step: record.step.clone(),
            code: *code,
        }),
        Verdict::Infrastructure(reason) => Err(HarnessError::Infrastructure {
            step: record.step.clone(),
            reason: reason.clone(),
        }),
    }
}
