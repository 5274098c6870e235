/// How a raw command line argument classifies after splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// `--name` syntax; the text excludes the specifier.
    LongOption,
    /// `-n` syntax, one character per token; clusters `-abc` explode in place.
    ShortOption,
    /// Anything else, including negative numbers and the right half of an `=` split.
    Value,
}

/// A classified token, tracked back to its position on the command line.
///
/// The `offset` counts the bytes of raw argument text preceding this token, not counting
/// separators; error rendering re-inserts the gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token<'t> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'t str,
    pub(crate) offset: usize,
    /// Index of the claiming option token, assigned during ownership resolution.
    pub(crate) owner: Option<usize>,
}

impl<'t> Token<'t> {
    pub(crate) fn new(kind: TokenKind, text: &'t str, offset: usize) -> Self {
        Self {
            kind,
            text,
            offset,
            owner: None,
        }
    }
}
