mod core;

pub use self::core::{CommandLineParser, ProgramParser};
