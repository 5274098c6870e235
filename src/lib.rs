//! `clargs` is a staged command line parser for Rust.
//!
//! Although other crates provide command line parser functionality, we have found they prioritize different concerns than those we are interested in.
//! It is very possible those crates can be configured to make *our desired* command line parser.
//! We built `clargs` to create our desired style of command line parser "out of the box".
//! Specifically, `clargs` attempts to prioritize the following design concerns:
//! * *Type safe argument parsing*:
//! The user should not call any `&str -> T` conversion functions directly.
//! All conversion in `clargs` is controlled by the [`FromToken`](./prelude/trait.FromToken.html) trait.
//! * *Offset-precise diagnostics*:
//! Every token records its byte offset within the raw input, so a parse error points at the
//! offending character of the command line, not merely at the offending parameter.
//! * *Staged parsing*:
//! Parsing happens in three explicit stages: tokenization, ownership resolution, and conversion.
//! Each stage completes before the next begins, which keeps the matching rules independent from
//! the value types.
//! * *Forgiving positional matching*:
//! A value that does not convert for a positional parameter is left for the next one (or dropped),
//! rather than aborting the parse.
//! Shortfalls surface through the required/minimum-count validation instead.
//! * *Detailed yet basic UX*:
//! The help and error output of the Cli should be very detailed, leaving no ambiguity in how to use the program.
//! However, we do not aim to support rich display configurations, such as colour output, shell completions, etc.
//! * *Reasonable performance*:
//! The command line parser should be *fast enough*.
//! To be clear, we are of the opinion that the cost of argument parsing is insignificant with respect to any non-trivial program.
//! That said, `clargs` will still aim to minimize its memory & CPU footprint, within reason.
//!
//! # Usage
//! Configure `clargs` by starting with a [`CommandLineParser`] and `add`ing [`Specification`]s.
//!
//! ```no_run
//! use clargs::{CommandLineParser, Specification};
//!
//! fn main() {
//!     let mut parser = CommandLineParser::new("summer")
//!         .about("Sum the provided items.")
//!         .add(
//!             Specification::<u32>::sequence("items")
//!                 .positional()
//!                 .min_count(1)
//!                 .help("The items to sum."),
//!         )
//!         .build();
//!
//!     parser.parse();
//!
//!     let sum: u32 = parser.get_sequence::<u32>("items").into_iter().sum();
//!     println!("Sum: {sum}");
//! }
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ summer -h
//! usage: summer [-h] ITEMS [...]
//!
//! Sum the provided items.
//!
//! positional arguments:
//!  ITEMS [...]   The items to sum.
//!
//! options:
//!  -h, --help    Show this help message and exit.
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer
//! Missing required parameters: items.
//! ```
//!
//! Errors against an option point back into the input:
//! ```console
//! $ fetch --retries=blah
//! Cannot convert 'blah' to u8 for parameter 'retries'.
//! --retries=blah
//!           ^
//! ```
//!
//! # Parameters
//! A [`Specification`] describes one parameter.
//! There are three kinds:
//! * [`Specification::flag`]: a no-value option; its presence converts to `true`.
//! * [`Specification::scalar`]: a single-value parameter.
//! Scalars are required unless configured with a [`Specification::default`].
//! When repeated on the Cli, the last occurrence wins.
//! * [`Specification::sequence`]: a multi-value parameter, captured greedily.
//! Sequences accept any number of values unless bounded below via [`Specification::min_count`].
//!
//! Any kind except a flag may be declared [`Specification::positional`], in which case it is
//! filled from the unclaimed values in registration order.
//! Mentioning a positional parameter by `--NAME` is accepted, but the mention itself claims no
//! tokens; the values still arrive through the unclaimed queue.
//!
//! ```console
//! Specification             | Cardinality | Syntax                  | Description
//! ---------------------------------------------------------------------------------------------
//! flag                      | [0]         | [--NAME]                | precisely 0
//! scalar                    | [1]         | [--NAME VALUE]          | precisely 1
//! sequence                  | [0, ∞)      | [--NAME [VALUE ...]]    | any amount; captured greedily
//! sequence + min_count(n)   | [n, ∞)      | [--NAME VALUE [...]]    | at least n; captured greedily
//! ```
//!
//! All type `T` parsing in `clargs` is controlled by [`FromToken`](./prelude/trait.FromToken.html).
//! `clargs` will parse any parameter type `T`, as long as it implements `FromToken`.
//!
//! # Reading Results
//! After a parse, read converted values straight off the parser:
//!
//! ```
//! use clargs::{CommandLineParser, Specification, Status};
//!
//! let mut parser = CommandLineParser::new("program")
//!     .add(Specification::flag("verbose").short('v'))
//!     .add(Specification::scalar("retries").default(3u8))
//!     .add(Specification::<String>::sequence("tags"))
//!     .build();
//!
//! parser.parse_tokens(&["-v"]).unwrap();
//!
//! assert!(parser.get_value::<bool>("verbose"));
//! assert_eq!(parser.get_value::<u8>("retries"), 3);
//! assert_eq!(parser.get_sequence::<String>("tags"), Vec::<String>::new());
//! assert_eq!(parser.status("verbose"), Some(Status::Initialized));
//! assert_eq!(parser.status("tags"), Some(Status::NotFound));
//! ```
//!
//! The [`Status`] distinguishes a parameter that was never mentioned (`NotFound`) from one that
//! was mentioned but received no value (`Found`) from one holding a converted value
//! (`Initialized`).
//! A registered default starts its parameter at `Initialized`.
//!
//! Alternatively, bind the parameter to a program variable.
//! The variable receives each converted value as it lands; drop the parser to release the borrow.
//!
//! ```
//! use clargs::{CommandLineParser, Specification};
//!
//! let mut verbose = false;
//! let mut items: Vec<u32> = Vec::default();
//!
//! let mut parser = CommandLineParser::new("program")
//!     .add(Specification::flag("verbose").short('v').bind(&mut verbose))
//!     .add(
//!         Specification::sequence("items")
//!             .positional()
//!             .bind_collection(&mut items),
//!     )
//!     .build();
//!
//! parser.parse_tokens(&["-v", "1", "2"]).unwrap();
//! drop(parser);
//!
//! assert!(verbose);
//! assert_eq!(items, vec![1, 2]);
//! ```
//!
//! # Cli Semantics
//! `clargs` parses the Cli tokens according to the following set of rules.
//! By and large this syntax should be familiar to many Cli developers, with a few subtle nuances for various edge cases.
//!
//! * Options are matched via the `--NAME` (or short name `-N`) specifier.
//! A flag consumes no further tokens.
//! A scalar claims exactly the next value token.
//! A sequence claims value tokens greedily, until the next option specifier.
//! For example, `--items 1 2 --key value 3` will match `1 2` into the sequence `items`, `value`
//! into the scalar `key`, and leave `3` for the positional parameters.
//! * The key-value pair of an option may be separated with the `=` character.
//! Only the first `=` character is used as a separator.
//! For example, `--key=123=456` is equivalent to `--key 123=456` (see footnotes #1 for guidance).
//! The separated value belongs to that option alone; a sequence continues matching the subsequent
//! tokens greedily.
//! * Multiple short named options may be combined into a single cluster.
//! For example, `-abc` is equivalent to `--apple --banana --carrot`.
//! The `=` separator applies *only* to the final option in this syntax.
//! For example, `-abc=123` is equivalent to `--apple --banana --carrot=123`.
//! * A leading `-` followed by a digit reads as a value, not an option cluster.
//! For example, `-5` and `-5.2` pass through to whichever parameter claims them.
//! * Positional parameters are matched from the unclaimed values, in registration order.
//! A scalar takes one value; a sequence takes values greedily (see footnotes #2 for guidance).
//! Mentioning a positional parameter via its specifier is accepted; the mention claims nothing,
//! so the surrounding values remain unclaimed and are matched positionally.
//! A value that fails conversion is not consumed: a scalar leaves it for the next positional
//! parameter, while a sequence stops matching.
//! Unclaimed leftovers are logged and dropped.
//! * The help flag (`-h`, `--help`) takes precedence over any error raised by a later token, and
//! over all conversion and validation errors.
//! An unknown option *before* the help flag still wins, since resolution halts there.
//!
//! # Footnotes
//! 1. Using the equals sign inside a parameter can be a useful way to parse complex structs.
//! In other words, you can write a custom `FromToken` deserializer.
//! For example, `a=123,b=456` could be deserialized into `struct MyStruct { a: u32, b: u32 }`.
//! Note that this only composes through the `--key=a=123,b=456` form; a standalone value token is
//! split at its first `=` as well, so prefer the separated syntax for such values.
//! 2. Clis that use more than one greedy parameter are complicated, and put a significant burden
//! on the user to understand how the matching breaks.
//! `clargs` does not recommend a Cli design that requires this tactic.
#![deny(missing_docs)]
mod api;
mod constant;
mod help;
mod model;
mod registry;
mod resolver;
mod store;
mod tokens;
mod ui;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use registry::{ConfigError, ParseError, Registry, Specification};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
