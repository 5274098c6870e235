use std::collections::{HashMap, VecDeque};

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{Status, ValueKind};
use crate::prelude::FromToken;
use crate::registry::spec::{Registration, Specification};
use crate::resolver::resolve;
use crate::store::{ScalarStore, SequenceStore};
use crate::tokens::{tokenize, Token, TokenKind};

/// An error while declaring the parameters, before any parsing takes place.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The long name is already registered with a different shape.
    #[error("Cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    /// The short name is already registered to a different parameter.
    #[error("Cannot duplicate the short option '{0}'.")]
    DuplicateShortOption(char),

    /// The specification combines modifiers its kind does not support.
    #[error("Invalid specification for '{name}': {reason}.")]
    InvalidSpecification {
        /// The parameter's long name.
        name: String,
        /// What about the specification is malformed.
        reason: String,
    },
}

/// An error while parsing the command line arguments.
///
/// On `Err`, no store contents may be trusted; the diagnostics carried here
/// (and the caret context derived from `offset`) are the only output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An option token names no registered parameter.
    #[error("Option '{name}' does not exist.")]
    UnregisteredOption {
        /// The option as the user wrote it, dashes included.
        name: String,
        /// Character offset into the space-joined argument line.
        offset: usize,
    },

    /// An owned value token's text does not parse into the element type.
    #[error("Cannot convert '{token}' to {type_name} for parameter '{name}'.")]
    ConversionFailure {
        /// The parameter's long name.
        name: String,
        /// The offending token text.
        token: String,
        /// The element type the token was supposed to become.
        type_name: &'static str,
        /// Character offset into the space-joined argument line.
        offset: usize,
    },

    /// Required parameters never seen on the command line; carries every one.
    #[error("Missing required parameters: {}.", .names.join(", "))]
    MissingRequired {
        /// The long names, in registration order.
        names: Vec<String>,
    },

    /// A sequence ended under its declared minimum.
    #[error("Too few values provided for '{name}' (actual={actual}, minimum={minimum}).")]
    BelowMinimumCount {
        /// The parameter's long name.
        name: String,
        /// The declared `min_count`.
        minimum: usize,
        /// How many values actually arrived.
        actual: usize,
    },
}

impl ParseError {
    /// The character offset this error points at, when it has one.
    pub(crate) fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnregisteredOption { offset, .. }
            | ParseError::ConversionFailure { offset, .. } => Some(*offset),
            ParseError::MissingRequired { .. } | ParseError::BelowMinimumCount { .. } => None,
        }
    }
}

/// The parameter registry and three-stage parse pipeline.
///
/// [`register`](Registry::register) declares parameters;
/// [`parse`](Registry::parse) tokenizes the arguments, resolves which option
/// consumes which value, converts the raw text by type, and validates
/// multiplicity.  The typed results are read back through
/// [`get_value`](Registry::get_value) and
/// [`get_sequence`](Registry::get_sequence).
///
/// Parsing resets every parameter to its registration-time state first, so a
/// `Registry` may be re-used: register, parse, inspect, register more, parse
/// again.
///
/// ### Example
/// ```
/// use clargs::{Registry, Specification};
///
/// let mut registry = Registry::default();
/// registry
///     .register(Specification::flag("verbose").short('v'))
///     .unwrap();
/// registry
///     .register(Specification::<u32>::scalar("limit"))
///     .unwrap();
///
/// registry.parse(&["-v", "--limit", "5"]).unwrap();
///
/// assert!(registry.get_value::<bool>("verbose"));
/// assert_eq!(registry.get_value::<u32>("limit"), 5);
/// ```
#[derive(Default)]
pub struct Registry<'a> {
    entries: Vec<Registration<'a>>,
    by_name: HashMap<String, usize>,
    by_short: HashMap<char, usize>,
}

impl<'a> Registry<'a> {
    /// Declare a parameter.
    ///
    /// Registration is additive and idempotent: re-registering the same
    /// `(name, short)` pair is a no-op, while a collision on either half of
    /// the pair alone is a [`ConfigError`].
    pub fn register<T>(&mut self, specification: Specification<'a, T>) -> Result<(), ConfigError>
    where
        T: FromToken + Clone + 'static,
    {
        let registration = specification.erase()?;

        if let Some(&index) = self.by_name.get(registration.name()) {
            if self.entries[index].short() == registration.short() {
                debug!("ignoring repeated registration of '{}'", registration.name());
                return Ok(());
            }

            return Err(ConfigError::DuplicateOption(registration.name().to_string()));
        }

        if let Some(short) = registration.short() {
            if self.by_short.contains_key(&short) {
                return Err(ConfigError::DuplicateShortOption(short));
            }

            self.by_short.insert(short, self.entries.len());
        }

        self.by_name
            .insert(registration.name().to_string(), self.entries.len());
        self.entries.push(registration);
        Ok(())
    }

    /// Run the pipeline against `arguments` (program name already stripped).
    ///
    /// Every parameter is first reset to its registration-time state, so
    /// parsing the same arguments twice yields identical stores.
    pub fn parse(&mut self, arguments: &[&str]) -> Result<(), ParseError> {
        for entry in self.entries.iter_mut() {
            entry.reset();
        }

        let tokens = tokenize(arguments);
        let tokens = resolve(tokens, &mut self.entries, &self.by_name, &self.by_short)?;
        self.convert_owned(&tokens)?;
        self.assign_positionals(&tokens);
        self.validate()
    }

    /// Convert the owned value tokens, in token order.  Any failure is fatal.
    fn convert_owned(&mut self, tokens: &[Token]) -> Result<(), ParseError> {
        for token in tokens {
            if let Some(owner) = token.owner {
                let index = self.entry_of(&tokens[owner]);
                self.entries[index].convert(token.text, token.offset)?;
            }
        }

        Ok(())
    }

    fn entry_of(&self, option: &Token) -> usize {
        let index = match option.kind {
            TokenKind::LongOption => self.by_name.get(option.text).copied(),
            TokenKind::ShortOption => {
                let short = option
                    .text
                    .chars()
                    .next()
                    .expect("internal error - short option token must hold a character");
                self.by_short.get(&short).copied()
            }
            TokenKind::Value => None,
        };
        index.expect("internal error - owner token must resolve to a registration")
    }

    /// Serve the unclaimed values to the positional parameters, in
    /// registration order.  Conversion failures here are never fatal: the
    /// candidate is left for the next positional parameter, and shortfalls
    /// surface through validation.
    fn assign_positionals(&mut self, tokens: &[Token]) {
        let mut candidates: VecDeque<(&str, usize)> = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Value && token.owner.is_none())
            .map(|token| (token.text, token.offset))
            .collect();

        for index in 0..self.entries.len() {
            if !self.entries[index].positional() {
                continue;
            }

            match self.entries[index].kind() {
                ValueKind::Scalar => {
                    if let Some(&(text, offset)) = candidates.front() {
                        match self.entries[index].convert(text, offset) {
                            Ok(()) => {
                                candidates.pop_front();
                            }
                            Err(error) => {
                                warn!("leaving candidate for the next positional parameter: {error}");
                            }
                        }
                    }
                }
                ValueKind::Sequence => {
                    while let Some(&(text, offset)) = candidates.front() {
                        match self.entries[index].convert(text, offset) {
                            Ok(()) => {
                                candidates.pop_front();
                            }
                            Err(error) => {
                                warn!("stopping positional parameter: {error}");
                                break;
                            }
                        }
                    }
                }
                ValueKind::Flag => {
                    unreachable!("internal error - flags cannot be positional")
                }
            }
        }

        for (text, offset) in candidates {
            warn!("ignoring unclaimed value '{text}' at offset {offset}");
        }
    }

    fn validate(&self) -> Result<(), ParseError> {
        let mut missing = Vec::default();

        for entry in &self.entries {
            match entry.status() {
                Status::NotFound => {
                    if entry.required() {
                        missing.push(entry.name().to_string());
                    }
                }
                Status::Found => {
                    warn!("parameter '{}' was found but received no value", entry.name());
                }
                Status::Initialized => {}
            }

            if entry.kind() == ValueKind::Sequence
                && entry.status() != Status::NotFound
                && entry.count() < entry.min_count()
            {
                return Err(ParseError::BelowMinimumCount {
                    name: entry.name().to_string(),
                    minimum: entry.min_count(),
                    actual: entry.count(),
                });
            }
        }

        if !missing.is_empty() {
            return Err(ParseError::MissingRequired { names: missing });
        }

        Ok(())
    }

    /// Read a flag's or scalar's converted value.
    ///
    /// Never panics: an unknown name, an uninitialized store, or a `T` other
    /// than the registered element type all come back as `T::default()` (with
    /// a `tracing` diagnostic).
    pub fn get_value<T>(&self, name: &str) -> T
    where
        T: Clone + Default + 'static,
    {
        let Some(&index) = self.by_name.get(name) else {
            debug!("get_value('{name}'): no such parameter");
            return T::default();
        };

        match self.entries[index].store_any().downcast_ref::<ScalarStore<T>>() {
            Some(store) => store.value().cloned().unwrap_or_default(),
            None => {
                debug!("get_value('{name}'): element type mismatch");
                T::default()
            }
        }
    }

    /// Read a sequence's converted values, in match order.
    ///
    /// Never panics: an unknown name, an empty store, or a `T` other than the
    /// registered element type all come back as an empty vector (with a
    /// `tracing` diagnostic).
    pub fn get_sequence<T>(&self, name: &str) -> Vec<T>
    where
        T: Clone + 'static,
    {
        let Some(&index) = self.by_name.get(name) else {
            debug!("get_sequence('{name}'): no such parameter");
            return Vec::default();
        };

        match self.entries[index]
            .store_any()
            .downcast_ref::<SequenceStore<T>>()
        {
            Some(store) => store.values().to_vec(),
            None => {
                debug!("get_sequence('{name}'): element type mismatch");
                Vec::default()
            }
        }
    }

    /// Where `name` sits in its lifecycle, or `None` for an unknown name.
    pub fn status(&self, name: &str) -> Option<Status> {
        self.by_name
            .get(name)
            .map(|&index| self.entries[index].status())
    }

    pub(crate) fn summaries(&self) -> Vec<crate::help::ParameterSummary> {
        self.entries.iter().map(Registration::summary).collect()
    }
}
