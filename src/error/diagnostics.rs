use super::Error;

/// Collects every error reported by the pipeline stages.
///
/// The flags survive [`Diagnostics::take`], so a driver can drain the
/// messages for display and still decide afterwards whether evaluation
/// should be suppressed or which exit status to use.
#[derive(Debug, Default)]
pub struct Diagnostics {
    reported:          Vec<Error>,
    had_error:         bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error and raises the matching flag.
    pub fn report(&mut self, error: impl Into<Error>) {
        let error = error.into();
        tracing::debug!(line = error.line(), "{error}");

        if error.is_runtime() {
            self.had_runtime_error = true;
        } else {
            self.had_error = true;
        }
        self.reported.push(error);
    }

    /// Whether a lexical, syntax or resolution error was reported.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }

    /// Whether a runtime error was reported.
    #[must_use]
    pub const fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// The errors reported since the last [`Diagnostics::take`].
    #[must_use]
    pub fn reported(&self) -> &[Error] {
        &self.reported
    }

    /// Removes and returns the reported errors. Flags are kept.
    pub fn take(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.reported)
    }

    /// Forgets every error and lowers both flags.
    pub fn clear(&mut self) {
        self.reported.clear();
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexError, RuntimeError};

    #[test]
    fn flags_track_error_kinds_separately() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(LexError::UnterminatedString { line: 2 });
        assert!(diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());

        diagnostics.report(RuntimeError::NotCallable { line: 3 });
        assert!(diagnostics.had_runtime_error());

        let drained = diagnostics.take();
        assert_eq!(drained.len(), 2);
        assert!(diagnostics.reported().is_empty());
        assert!(diagnostics.had_error());

        diagnostics.clear();
        assert!(!diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());
    }
}
