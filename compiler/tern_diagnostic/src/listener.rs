//! Receivers for diagnostics.

use parking_lot::Mutex;

use crate::Diagnostic;

/// Receives diagnostics as they are reported.
///
/// Takes `&self` so one listener can be shared by a parser and the code
/// driving it.
pub trait ErrorListener {
    fn on_error(&self, diagnostic: Diagnostic);
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullListener;

impl ErrorListener for NullListener {
    fn on_error(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in report order.
#[derive(Debug, Default)]
pub struct CollectingListener {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics received so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }

    /// Drain everything received so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock())
    }

    /// Drain everything into another listener, in report order.
    pub fn forward_to(&self, listener: &dyn ErrorListener) {
        for diagnostic in self.take() {
            listener.on_error(diagnostic);
        }
    }
}

impl ErrorListener for CollectingListener {
    fn on_error(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}
