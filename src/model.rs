/// The shape of values a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Zero values; presence alone sets the parameter to `true`.
    Flag,
    /// Precisely one value.
    Scalar,
    /// Any number of values, bounded below by the configured minimum count.
    Sequence,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The lifecycle of a parameter across a single parse.
///
/// The status only ever moves forward within a parse; every parse begins by restoring the
/// registration-time status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Never mentioned on the command line.
    NotFound,
    /// Mentioned on the command line, but no value has been converted yet.
    Found,
    /// At least one value (possibly the registered default) has landed in the store.
    Initialized,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
