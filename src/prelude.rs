//! Traits which, typically, may be imported without concern: `use clargs::prelude::*`.

/// Behaviour to convert a single command line token into a concrete type.
///
/// Implementations are provided for the integer and float primitives, `String`, and `bool`.
/// The `bool` implementation additionally accepts the wire forms `1` and `0`, which is how
/// flag presence is recorded internally.
// Needs to be imported in order to implement a conversion for a custom type.
pub trait FromToken: Sized {
    /// Parse the token text into this type.
    ///
    /// Return `Err(())` when the text does not describe a valid value.
    /// The parser attaches the token and target type to its error message; implementations
    /// needn't produce their own.
    fn from_token(text: &str) -> Result<Self, ()>;
}
