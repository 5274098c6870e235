use crate::help::ParameterSummary;
use crate::model::{Status, ValueKind};
use crate::prelude::FromToken;
use crate::registry::core::{ConfigError, ParseError};
use crate::store::{
    AnonymousBinding, AnonymousStore, ScalarBinding, ScalarStore, SequenceBinding, SequenceStore,
};

/// The declaration of a single command line parameter: its names, arity, and
/// backing store element type `T`.
///
/// Build one with [`Specification::flag`], [`Specification::scalar`], or
/// [`Specification::sequence`], chain the modifiers, and hand it to
/// [`Registry::register`](crate::Registry::register).
/// Shape misuse (ex: a positional flag) is rejected at registration with
/// [`ConfigError::InvalidSpecification`].
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
///     .register(Specification::<u32>::scalar("limit").default(10))
///     .unwrap();
/// ```
pub struct Specification<'a, T> {
    name: String,
    short: Option<char>,
    kind: ValueKind,
    positional: bool,
    min_count: usize,
    default: Option<T>,
    help: Option<String>,
    binding: Option<Box<dyn AnonymousBinding + 'a>>,
    defect: Option<String>,
}

impl<'a> Specification<'a, bool> {
    /// Create a flag: a boolean parameter which consumes no value tokens.
    ///
    /// Flags implicitly default to `false`, so they are never required.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            kind: ValueKind::Flag,
            positional: false,
            min_count: 0,
            default: Some(false),
            help: None,
            binding: None,
            defect: None,
        }
    }
}

impl<'a, T: FromToken + Clone + 'static> Specification<'a, T> {
    /// Create a scalar: a parameter which consumes exactly one value token.
    ///
    /// Without a [`default`](Specification::default), a scalar must appear in
    /// the parsed arguments.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            kind: ValueKind::Scalar,
            positional: false,
            min_count: 0,
            default: None,
            help: None,
            binding: None,
            defect: None,
        }
    }

    /// Create a sequence: a parameter which consumes any number of value tokens.
    ///
    /// Sequences accept zero values unless a [`min_count`](Specification::min_count)
    /// says otherwise.
    pub fn sequence(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            kind: ValueKind::Sequence,
            positional: false,
            min_count: 0,
            default: None,
            help: None,
            binding: None,
            defect: None,
        }
    }

    /// Set the single-character short name (ex: `-v` for `verbose`).
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Fill this parameter from the unclaimed value tokens, in declaration
    /// order.  Mentioning a positional parameter by name is accepted but
    /// claims no tokens; its values always travel the candidate queue.
    pub fn positional(mut self) -> Self {
        if self.kind == ValueKind::Flag {
            self.note_defect("a flag cannot be positional");
        }
        self.positional = true;
        self
    }

    /// Require at least `minimum` values.  Sequences only.
    pub fn min_count(mut self, minimum: usize) -> Self {
        if self.kind != ValueKind::Sequence {
            self.note_defect("min_count applies only to sequences");
        }
        self.min_count = minimum;
        self
    }

    /// Seed the store with `value`, making this parameter optional.
    /// Flags and scalars only.
    pub fn default(mut self, value: T) -> Self {
        if self.kind == ValueKind::Sequence {
            self.note_defect("a sequence cannot take a default");
        }
        self.default.replace(value);
        self
    }

    /// Document this parameter in the generated help message.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Write every converted value through to `variable` (last one wins).
    /// Flags and scalars only.
    pub fn bind(mut self, variable: &'a mut T) -> Self {
        if self.kind == ValueKind::Sequence {
            self.note_defect("bind applies only to flags and scalars");
        }
        self.binding.replace(Box::new(ScalarBinding::new(variable)));
        self
    }

    /// Append every converted value to `variable`.  Sequences only.
    pub fn bind_collection(mut self, variable: &'a mut Vec<T>) -> Self {
        if self.kind != ValueKind::Sequence {
            self.note_defect("bind_collection applies only to sequences");
        }
        self.binding
            .replace(Box::new(SequenceBinding::new(variable)));
        self
    }

    fn note_defect(&mut self, reason: &str) {
        // Only the first defect is reported.
        if self.defect.is_none() {
            self.defect.replace(reason.to_string());
        }
    }

    pub(crate) fn erase(self) -> Result<Registration<'a>, ConfigError> {
        if let Some(reason) = self.defect {
            return Err(ConfigError::InvalidSpecification {
                name: self.name,
                reason,
            });
        }

        let store: Box<dyn AnonymousStore> = match self.kind {
            ValueKind::Sequence => Box::new(SequenceStore::<T>::new()),
            _ => Box::new(ScalarStore::new(self.default.clone())),
        };
        let initial_status = if self.default.is_some() {
            Status::Initialized
        } else {
            Status::NotFound
        };
        let mut binding = self.binding;

        if let (Some(binding), Some(default)) = (binding.as_mut(), self.default.as_ref()) {
            binding.assign(default);
        }

        Ok(Registration {
            name: self.name,
            short: self.short,
            kind: self.kind,
            positional: self.positional,
            min_count: self.min_count,
            help: self.help,
            store,
            binding,
            status: initial_status,
            initial_status,
        })
    }
}

/// A type-erased [`Specification`] inside a [`Registry`](crate::Registry),
/// carrying its store, optional binding, and lifecycle status.
pub(crate) struct Registration<'a> {
    name: String,
    short: Option<char>,
    kind: ValueKind,
    positional: bool,
    min_count: usize,
    help: Option<String>,
    store: Box<dyn AnonymousStore>,
    binding: Option<Box<dyn AnonymousBinding + 'a>>,
    status: Status,
    initial_status: Status,
}

impl<'a> std::fmt::Debug for Registration<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The store and binding are type-erased trait objects; they cannot be formatted.
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("kind", &self.kind)
            .field("positional", &self.positional)
            .field("min_count", &self.min_count)
            .field("help", &self.help)
            .field("status", &self.status)
            .field("initial_status", &self.initial_status)
            .finish_non_exhaustive()
    }
}

impl<'a> Registration<'a> {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn short(&self) -> Option<char> {
        self.short
    }

    pub(crate) fn kind(&self) -> ValueKind {
        self.kind
    }

    pub(crate) fn positional(&self) -> bool {
        self.positional
    }

    pub(crate) fn min_count(&self) -> usize {
        self.min_count
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn count(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn store_any(&self) -> &dyn std::any::Any {
        self.store.as_any()
    }

    /// Whether this parameter must appear at least once.
    pub(crate) fn required(&self) -> bool {
        match self.kind {
            ValueKind::Sequence => self.min_count > 0,
            _ => true,
        }
    }

    /// Advance `NotFound` to `Found`; never downgrade `Initialized`.
    pub(crate) fn mark_found(&mut self) {
        if self.status == Status::NotFound {
            self.status = Status::Found;
        }
    }

    /// Convert `token` into the store, write it through the binding, and
    /// advance the status to `Initialized`.
    pub(crate) fn convert(&mut self, token: &str, offset: usize) -> Result<(), ParseError> {
        self.store
            .push(token)
            .map_err(|error| ParseError::ConversionFailure {
                name: self.name.clone(),
                token: error.token,
                type_name: error.type_name,
                offset,
            })?;

        if let Some(binding) = self.binding.as_mut() {
            let value = self
                .store
                .last()
                .expect("internal error - converted value must be stored");
            binding.assign(value);
        }

        self.status = Status::Initialized;
        Ok(())
    }

    /// Restore the registration-time state: default value (or empty store),
    /// bound variable re-seeded, status rewound.
    pub(crate) fn reset(&mut self) {
        self.store.reset();

        if let Some(binding) = self.binding.as_mut() {
            binding.reset();

            if let Some(value) = self.store.last() {
                binding.assign(value);
            }
        }

        self.status = self.initial_status;
    }

    pub(crate) fn summary(&self) -> ParameterSummary {
        ParameterSummary {
            name: self.name.clone(),
            short: self.short,
            kind: self.kind,
            min_count: self.min_count,
            positional: self.positional,
            help: self.help.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_never_required() {
        // Setup
        let specification = Specification::flag("verbose").short('v');

        // Execute
        let registration = specification.erase().unwrap();

        // Verify
        assert_eq!(registration.name(), "verbose");
        assert_eq!(registration.short(), Some('v'));
        assert_eq!(registration.kind(), ValueKind::Flag);
        assert_eq!(registration.status(), Status::Initialized);
        assert!(registration.required());
    }

    #[test]
    fn scalar_without_default() {
        // Setup
        let specification = Specification::<u32>::scalar("limit");

        // Execute
        let registration = specification.erase().unwrap();

        // Verify
        assert_eq!(registration.status(), Status::NotFound);
        assert!(registration.required());
        assert_eq!(registration.count(), 0);
    }

    #[test]
    fn scalar_with_default() {
        // Setup
        let specification = Specification::<u32>::scalar("limit").default(10);

        // Execute
        let registration = specification.erase().unwrap();

        // Verify
        assert_eq!(registration.status(), Status::Initialized);
        assert_eq!(registration.count(), 1);
    }

    #[test]
    fn sequence_optional_by_default() {
        // Setup
        let specification = Specification::<u32>::sequence("items");

        // Execute
        let registration = specification.erase().unwrap();

        // Verify
        assert_eq!(registration.status(), Status::NotFound);
        assert!(!registration.required());
    }

    #[test]
    fn sequence_with_minimum() {
        // Setup
        let specification = Specification::<u32>::sequence("items").min_count(2);

        // Execute
        let registration = specification.erase().unwrap();

        // Verify
        assert_eq!(registration.min_count(), 2);
        assert!(registration.required());
    }

    #[test]
    fn erase_positional_flag() {
        let error = Specification::flag("verbose").positional().erase().unwrap_err();
        assert_matches!(error, ConfigError::InvalidSpecification { name, reason } => {
            assert_eq!(name, "verbose");
            assert_eq!(reason, "a flag cannot be positional");
        });
    }

    #[test]
    fn erase_min_count_on_scalar() {
        let error = Specification::<u32>::scalar("limit")
            .min_count(1)
            .erase()
            .unwrap_err();
        assert_matches!(error, ConfigError::InvalidSpecification { reason, .. } => {
            assert_eq!(reason, "min_count applies only to sequences");
        });
    }

    #[test]
    fn erase_default_on_sequence() {
        let error = Specification::<u32>::sequence("items")
            .default(5)
            .erase()
            .unwrap_err();
        assert_matches!(error, ConfigError::InvalidSpecification { reason, .. } => {
            assert_eq!(reason, "a sequence cannot take a default");
        });
    }

    #[test]
    fn erase_bind_on_sequence() {
        let mut variable: u32 = 0;
        let error = Specification::sequence("items")
            .bind(&mut variable)
            .erase()
            .unwrap_err();
        assert_matches!(error, ConfigError::InvalidSpecification { reason, .. } => {
            assert_eq!(reason, "bind applies only to flags and scalars");
        });
    }

    #[test]
    fn erase_bind_collection_on_scalar() {
        let mut variable: Vec<u32> = Vec::default();
        let error = Specification::scalar("limit")
            .bind_collection(&mut variable)
            .erase()
            .unwrap_err();
        assert_matches!(error, ConfigError::InvalidSpecification { reason, .. } => {
            assert_eq!(reason, "bind_collection applies only to sequences");
        });
    }

    #[test]
    fn positional_keeps_short() {
        // Setup
        let specification = Specification::<u32>::scalar("delta").positional().short('d');

        // Execute
        let registration = specification.erase().unwrap();

        // Verify
        assert!(registration.positional());
        assert_eq!(registration.short(), Some('d'));
    }

    #[test]
    fn erase_reports_first_defect() {
        let error = Specification::flag("verbose")
            .positional()
            .min_count(1)
            .erase()
            .unwrap_err();
        assert_matches!(error, ConfigError::InvalidSpecification { reason, .. } => {
            assert_eq!(reason, "a flag cannot be positional");
        });
    }

    #[test]
    fn convert_advances_status() {
        // Setup
        let mut registration = Specification::<u32>::scalar("limit").erase().unwrap();
        assert_eq!(registration.status(), Status::NotFound);

        // Execute
        registration.convert("5", 0).unwrap();

        // Verify
        assert_eq!(registration.status(), Status::Initialized);
        assert_eq!(registration.count(), 1);
    }

    #[test]
    fn convert_failure_keeps_state() {
        // Setup
        let mut registration = Specification::<u32>::scalar("limit").erase().unwrap();

        // Execute
        let error = registration.convert("moot", 8).unwrap_err();

        // Verify
        assert_matches!(error, ParseError::ConversionFailure { name, token, type_name, offset } => {
            assert_eq!(name, "limit");
            assert_eq!(token, "moot");
            assert_eq!(type_name, "u32");
            assert_eq!(offset, 8);
        });
        assert_eq!(registration.status(), Status::NotFound);
        assert_eq!(registration.count(), 0);
    }

    #[test]
    fn mark_found_monotonic() {
        // Setup
        let mut registration = Specification::<u32>::scalar("limit").default(10).erase().unwrap();
        assert_eq!(registration.status(), Status::Initialized);

        // Execute
        registration.mark_found();

        // Verify
        assert_eq!(registration.status(), Status::Initialized);
    }

    #[test]
    fn reset_restores_default() {
        // Setup
        let mut registration = Specification::<u32>::scalar("limit").default(10).erase().unwrap();
        registration.convert("5", 0).unwrap();
        assert_eq!(registration.status(), Status::Initialized);

        // Execute
        registration.reset();

        // Verify
        assert_eq!(registration.status(), Status::Initialized);
        assert_eq!(
            registration
                .store_any()
                .downcast_ref::<ScalarStore<u32>>()
                .unwrap()
                .value(),
            Some(&10)
        );
    }

    #[test]
    fn binding_receives_default_at_registration() {
        // Setup
        let mut variable: u32 = 0;

        // Execute
        let registration = Specification::scalar("limit")
            .default(10)
            .bind(&mut variable)
            .erase()
            .unwrap();

        // Verify
        drop(registration);
        assert_eq!(variable, 10);
    }

    #[test]
    fn binding_receives_converted_value() {
        // Setup
        let mut variable: u32 = 0;

        {
            let mut registration = Specification::scalar("limit")
                .bind(&mut variable)
                .erase()
                .unwrap();

            // Execute
            registration.convert("5", 0).unwrap();
        }

        // Verify
        assert_eq!(variable, 5);
    }

    #[test]
    fn reset_clears_bound_collection() {
        // Setup
        let mut variable: Vec<u32> = Vec::default();

        {
            let mut registration = Specification::sequence("items")
                .bind_collection(&mut variable)
                .erase()
                .unwrap();
            registration.convert("1", 0).unwrap();
            registration.convert("2", 1).unwrap();

            // Execute
            registration.reset();
            registration.convert("3", 0).unwrap();
        }

        // Verify
        assert_eq!(variable, vec![3]);
    }
}
