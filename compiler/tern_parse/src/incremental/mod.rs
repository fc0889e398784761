//! Incremental re-parsing.
//!
//! Rebuilds the smallest part of a syntax tree that an edit touched, instead
//! of parsing the whole unit again.
//!
//! # Architecture
//!
//! 1. **Locate** - find the smallest old node covering the edited range
//! 2. **Dispatch** - ask the dispatcher which grammar production re-reads
//!    that node as a child of its parent
//! 3. **Validate** - the new node must start where the old one started and
//!    stop at the token the old one stopped at, after mapping through the
//!    [`TokenMap`](tern_ir::TokenMap); otherwise escalate to the parent
//! 4. **Splice** - rebuild the path from the root to the replaced node,
//!    sharing every other subtree, and copy semantic annotations forward
//!
//! Reaching the root always succeeds with a full parse. The only way to get
//! no result is a dispatcher invariant violation ([`NotAChild`]).
//!
//! # Key Types
//!
//! - [`IncrementalParser`] - the driver
//! - [`DispatchOutcome`] - what the dispatcher decided for one candidate
//! - [`Reparse`] - the new tree plus the escalation trace

mod copier;
mod dispatch;
mod driver;
mod splice;

pub use copier::copy_resolution_data;
pub use dispatch::{dispatch, DispatchOutcome, NotAChild};
pub use driver::IncrementalParser;
pub use splice::{clone_with_replacement, SpliceError};

use tern_ir::{Node, NodeId, SyntaxKind, SyntaxTree};

/// Driver configuration.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseOptions {
    /// Parse the whole unit once this many candidates have been rejected.
    /// `Some(0)` skips local re-parsing entirely. `None` means no limit.
    pub max_escalations: Option<usize>,
}

/// How one candidate fared.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum AttemptOutcome {
    /// The replacement was validated and spliced in.
    Accepted,
    /// The dispatcher cannot re-read this child without wider context.
    InsufficientContext,
    /// No token of the new stream starts where the candidate started.
    StartNotFound,
    /// The replacement does not cover the tokens the candidate covered.
    Mismatch,
    /// Accepting would leave a shared node pointing at a synthetic token
    /// whose anchor the edit removed.
    StrandedSynthetic,
    /// The dispatcher reported that the candidate is not a child of its parent.
    NotAChild,
    /// The whole unit was parsed again.
    FullParse,
}

/// One step of the escalation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Attempt {
    pub candidate: SyntaxKind,
    pub candidate_id: NodeId,
    /// `None` for the root.
    pub parent: Option<SyntaxKind>,
    pub outcome: AttemptOutcome,
}

/// The result of a successful incremental re-parse.
#[derive(Debug)]
pub struct Reparse {
    /// The tree after the edit.
    pub tree: SyntaxTree,
    /// Id of the old node that was replaced (the old root on a full parse).
    pub replaced: NodeId,
    /// The node that took its place.
    pub replacement: Node,
    /// Every candidate tried, in order; the last one succeeded.
    pub attempts: Vec<Attempt>,
}

impl Reparse {
    /// Check whether the driver fell back to parsing the whole unit.
    pub fn is_full_parse(&self) -> bool {
        self.attempts
            .last()
            .is_some_and(|attempt| attempt.outcome == AttemptOutcome::FullParse)
    }

    /// Number of times the driver moved from a candidate to its parent.
    pub fn escalations(&self) -> usize {
        self.attempts.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests;
