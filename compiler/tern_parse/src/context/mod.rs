//! Parse context flags for context-sensitive checks.
//!
//! The grammar itself is context-free. The flags only decide which
//! diagnostics a statement reports: `break` needs an enclosing loop or
//! switch, `continue` needs an enclosing loop.

/// Context flags for parsing.
///
/// Multiple flags can be combined using bitwise OR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseContext(u16);

impl ParseContext {
    /// No special context.
    pub const NONE: Self = Self(0);

    /// Inside a loop body.
    /// Makes `break` and `continue` valid.
    pub const IN_LOOP: Self = Self(1 << 0);

    /// Inside a switch member.
    /// Makes `break` valid.
    pub const IN_SWITCH: Self = Self(1 << 1);

    /// Inside a function body.
    pub const IN_FUNCTION: Self = Self(1 << 2);

    /// Create a new context with no flags set.
    #[inline]
    pub const fn new() -> Self {
        Self::NONE
    }

    /// Check if a flag is set.
    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    /// Add a flag to the context.
    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    /// Remove a flag from the context.
    #[inline]
    #[must_use]
    pub const fn without(self, flag: Self) -> Self {
        Self(self.0 & !flag.0)
    }

    /// Combine two contexts (union of flags).
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn in_loop(self) -> bool {
        self.has(Self::IN_LOOP)
    }

    #[inline]
    pub const fn in_switch(self) -> bool {
        self.has(Self::IN_SWITCH)
    }

    #[inline]
    pub const fn in_function(self) -> bool {
        self.has(Self::IN_FUNCTION)
    }

    /// Check whether an unlabeled `break` has a target.
    #[inline]
    pub const fn allows_break(self) -> bool {
        self.has(Self::IN_LOOP) || self.has(Self::IN_SWITCH)
    }
}
