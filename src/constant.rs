pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";

// The literal recorded for a matched flag, converted like any other token.
pub(crate) const FLAG_TOKEN: &str = "1";
