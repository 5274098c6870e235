use std::env;

use crate::constant::{HELP_MESSAGE, HELP_NAME, HELP_SHORT};
use crate::help::{ErrorContext, Printer};
use crate::model::Status;
use crate::prelude::FromToken;
use crate::registry::{ConfigError, Registry, Specification};
use crate::ui::{ConsoleInterface, UserInterface};

/// The base command line parser.
///
/// ### Example
/// ```
/// use clargs::{CommandLineParser, Specification};
///
/// let mut parser = CommandLineParser::new("organize")
///     .add(Specification::flag("verbose").short('v'))
///     .add(Specification::scalar("limit").default(10u32))
///     .add(Specification::<String>::sequence("files").positional())
///     .build();
///
/// parser.parse_tokens(&["-v", "a.txt", "b.txt"]).unwrap();
///
/// assert!(parser.get_value::<bool>("verbose"));
/// assert_eq!(parser.get_value::<u32>("limit"), 10);
/// assert_eq!(
///     parser.get_sequence::<String>("files"),
///     vec!["a.txt".to_string(), "b.txt".to_string()],
/// );
/// ```
pub struct CommandLineParser<'a> {
    program: String,
    about: Option<String>,
    registry: Registry<'a>,
    deferred_error: Option<ConfigError>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser.
    ///
    /// The help flag (`-h`, `--help`) is registered automatically.
    ///
    /// ### Example
    /// ```
    /// use clargs::CommandLineParser;
    ///
    /// let mut parser = CommandLineParser::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(empty::slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        let mut registry = Registry::default();
        registry
            .register(
                Specification::flag(HELP_NAME)
                    .short(HELP_SHORT)
                    .help(HELP_MESSAGE),
            )
            .expect("internal error - must be able to register the help flag");

        Self {
            program: program.into(),
            about: None,
            registry,
            deferred_error: None,
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final about message will apply.
    ///
    /// An about message documents the command line parser in full sentence/paragraph format.
    /// We recommend allowing `clargs` to format this field (ex: it is not recommended to use line breaks `'\n'`).
    ///
    /// ### Example
    /// ```
    /// use clargs::CommandLineParser;
    ///
    /// let mut parser = CommandLineParser::new("program")
    ///     .about("--this will get discarded--")
    ///     .about("Sorts files into dated folders.")
    ///     .build();
    ///
    /// parser.parse_tokens(empty::slice()).unwrap();
    /// ```
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add a parameter to the command line parser.
    ///
    /// The order of positional parameters corresponds to their match order during parsing.
    /// The order of option parameters does not affect the parser semantics.
    ///
    /// A configuration mistake (ex: a repeated parameter name) does not fail here;
    /// it is deferred and surfaces via [`CommandLineParser::build_parser`].
    ///
    /// ### Example
    /// ```
    /// use clargs::{CommandLineParser, Specification};
    ///
    /// let mut a: u32 = 0;
    /// let mut b: u32 = 0;
    /// let mut parser = CommandLineParser::new("program")
    ///     .add(Specification::scalar("a").positional().bind(&mut a))
    ///     .add(Specification::scalar("b").positional().bind(&mut b))
    ///     .build();
    ///
    /// parser.parse_tokens(&["1", "2"]).unwrap();
    /// drop(parser);
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, 2);
    /// ```
    pub fn add<T>(mut self, specification: Specification<'a, T>) -> Self
    where
        T: FromToken + Clone + 'static,
    {
        if let Err(error) = self.registry.register(specification) {
            if self.deferred_error.is_none() {
                self.deferred_error.replace(error);
            }
        }

        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<ProgramParser<'a>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        // The help flag is rendered by the printer itself.
        let summaries = self
            .registry
            .summaries()
            .into_iter()
            .filter(|summary| summary.name != HELP_NAME)
            .collect();
        Ok(ProgramParser {
            program: self.program,
            registry: self.registry,
            printer: Printer::terminal(summaries, self.about),
            user_interface,
        })
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and surfaces the first error deferred by
    /// [`CommandLineParser::add`] (ex: a repeated parameter name).
    ///
    /// ### Example
    /// ```
    /// use clargs::{CommandLineParser, Specification};
    ///
    /// let result = CommandLineParser::new("program")
    ///     .add(Specification::scalar("limit").short('l').default(0u32))
    ///     .add(Specification::scalar("limit").short('m').default(0u32))
    ///     .build_parser();
    ///
    /// let error = result.unwrap_err();
    /// assert_eq!(error.to_string(), "Cannot duplicate the option 'limit'.");
    /// ```
    pub fn build_parser(self) -> Result<ProgramParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated parameter name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> ProgramParser<'a> {
        match self.build_parser() {
            Ok(parser) => parser,
            Err(error) => {
                eprintln!("{error}");
                std::process::exit(1);
            }
        }
    }
}

/// The configured command line parser.
/// Built via [`CommandLineParser::build`] or [`CommandLineParser::build_parser`].
pub struct ProgramParser<'a> {
    program: String,
    registry: Registry<'a>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> std::fmt::Debug for ProgramParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The registry, printer, and user interface are not formattable.
        f.debug_struct("ProgramParser")
            .field("program", &self.program)
            .finish_non_exhaustive()
    }
}

impl<'a> ProgramParser<'a> {
    /// Run the command line parser against the input tokens.
    ///
    /// The parser will process the input tokens based off the `CommandLineParser` configuration.
    /// Parsing happens in three stages:
    /// 1. Tokenization splits each input into option and value tokens, tracking offsets.
    /// 2. Resolution assigns each value token to the option that claims it.
    /// 3. Conversion parses the claimed tokens by their respective types `T`.
    ///
    /// If the parser encounters an error (ex: an unknown option, an un-convertible token, a
    /// missing required parameter), it prints the error and returns with `Err(1)`.
    ///
    /// If the help flag (`-h` or `--help`) is matched, the parser displays the help message and
    /// returns with `Err(0)`.
    /// The help flag takes precedence over any error produced by a later input token.
    ///
    /// ### Example
    /// ```
    /// use clargs::{CommandLineParser, Specification};
    ///
    /// let mut parser = CommandLineParser::new("program")
    ///     .add(Specification::scalar("count").default(0u32))
    ///     .build();
    ///
    /// assert_eq!(parser.parse_tokens(&["--count", "3"]), Ok(()));
    /// assert_eq!(parser.get_value::<u32>("count"), 3);
    /// ```
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<(), i32> {
        let result = self.registry.parse(tokens);

        if self.registry.get_value::<bool>(HELP_NAME) {
            self.printer
                .print_help(self.program.as_str(), &*self.user_interface);
            return Err(0);
        }

        match result {
            Ok(()) => Ok(()),
            Err(error) => {
                let offset = error.offset();
                self.user_interface.print_error(error);

                if let Some(offset) = offset {
                    self.user_interface
                        .print_error_context(ErrorContext::new(offset, tokens));
                }

                Err(1)
            }
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Behaves as [`ProgramParser::parse_tokens`], except that any `Err` result terminates the
    /// process with the corresponding error code (via [`std::process::exit`]).
    pub fn parse(&mut self) {
        let command_input: Vec<String> = env::args().skip(1).collect();

        if let Err(exit_code) = self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            std::process::exit(exit_code);
        }
    }

    /// Read a flag's or scalar's converted value.
    /// See [`Registry::get_value`].
    pub fn get_value<T>(&self, name: &str) -> T
    where
        T: Clone + Default + 'static,
    {
        self.registry.get_value(name)
    }

    /// Read a sequence's converted values, in match order.
    /// See [`Registry::get_sequence`].
    pub fn get_sequence<T>(&self, name: &str) -> Vec<T>
    where
        T: Clone + 'static,
    {
        self.registry.get_sequence(name)
    }

    /// Where the parameter `name` sits in its lifecycle, or `None` for an unknown name.
    /// See [`Registry::status`].
    pub fn status(&self, name: &str) -> Option<Status> {
        self.registry.status(name)
    }
}
