mod core;
mod spec;

pub use self::core::{ConfigError, ParseError, Registry};
pub use spec::Specification;

pub(crate) use spec::Registration;
