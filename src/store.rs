use std::any::Any;

use thiserror::Error;

use crate::prelude::FromToken;

/// A token that does not convert to the target type.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_name}.")]
pub(crate) struct InvalidConversion {
    pub(crate) token: String,
    pub(crate) type_name: &'static str,
}

macro_rules! from_token_via_parse {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromToken for $t {
                fn from_token(text: &str) -> Result<Self, ()> {
                    text.parse::<$t>().map_err(|_| ())
                }
            }
        )*
    };
}

from_token_via_parse!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, char,
);

impl FromToken for bool {
    fn from_token(text: &str) -> Result<Self, ()> {
        match text {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(()),
        }
    }
}

impl FromToken for String {
    fn from_token(text: &str) -> Result<Self, ()> {
        Ok(text.to_string())
    }
}

/// The type-erased face of a typed value store.
///
/// Tokens enter as `&str` and are converted on the way in; the typed values come
/// back out via `Any` downcasting.
pub(crate) trait AnonymousStore {
    /// Convert the token and record the result.
    fn push(&mut self, token: &str) -> Result<(), InvalidConversion>;

    /// The most recently recorded value, if any.
    fn last(&self) -> Option<&dyn Any>;

    /// Restore the store to its pre-parse state.
    fn reset(&mut self);

    /// The number of recorded values.
    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;
}

/// Holds at most one `T`, seeded from the default (when present).
pub(crate) struct ScalarStore<T> {
    value: Option<T>,
    default: Option<T>,
}

impl<T: Clone> ScalarStore<T> {
    pub(crate) fn new(default: Option<T>) -> Self {
        Self {
            value: default.clone(),
            default,
        }
    }

    pub(crate) fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T: FromToken + Clone + 'static> AnonymousStore for ScalarStore<T> {
    fn push(&mut self, token: &str) -> Result<(), InvalidConversion> {
        let value = T::from_token(token).map_err(|_| InvalidConversion {
            token: token.to_string(),
            type_name: std::any::type_name::<T>(),
        })?;
        self.value.replace(value);
        Ok(())
    }

    fn last(&self) -> Option<&dyn Any> {
        self.value.as_ref().map(|value| value as &dyn Any)
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
    }

    fn len(&self) -> usize {
        usize::from(self.value.is_some())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Holds any number of `T`s, in match order.
pub(crate) struct SequenceStore<T> {
    values: Vec<T>,
}

impl<T> SequenceStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            values: Vec::default(),
        }
    }

    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: FromToken + Clone + 'static> AnonymousStore for SequenceStore<T> {
    fn push(&mut self, token: &str) -> Result<(), InvalidConversion> {
        let value = T::from_token(token).map_err(|_| InvalidConversion {
            token: token.to_string(),
            type_name: std::any::type_name::<T>(),
        })?;
        self.values.push(value);
        Ok(())
    }

    fn last(&self) -> Option<&dyn Any> {
        self.values.last().map(|value| value as &dyn Any)
    }

    fn reset(&mut self) {
        self.values.clear();
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The type-erased face of a caller variable bound to a parameter.
///
/// Bindings borrow from the caller, so unlike the stores they cannot be `'static`;
/// values cross over as `Any` from the store side.
pub(crate) trait AnonymousBinding {
    /// Write the freshly converted value through to the caller variable.
    fn assign(&mut self, value: &dyn Any);

    /// Restore the caller variable to its pre-parse state.
    fn reset(&mut self);
}

pub(crate) struct ScalarBinding<'a, T> {
    variable: &'a mut T,
}

impl<'a, T> ScalarBinding<'a, T> {
    pub(crate) fn new(variable: &'a mut T) -> Self {
        Self { variable }
    }
}

impl<'a, T: Clone + 'static> AnonymousBinding for ScalarBinding<'a, T> {
    fn assign(&mut self, value: &dyn Any) {
        let value = value
            .downcast_ref::<T>()
            .expect("internal error - binding type must match store type");
        *self.variable = value.clone();
    }

    fn reset(&mut self) {
        // Scalars overwrite on assign; there is nothing to unwind.
    }
}

pub(crate) struct SequenceBinding<'a, T> {
    variable: &'a mut Vec<T>,
}

impl<'a, T> SequenceBinding<'a, T> {
    pub(crate) fn new(variable: &'a mut Vec<T>) -> Self {
        Self { variable }
    }
}

impl<'a, T: Clone + 'static> AnonymousBinding for SequenceBinding<'a, T> {
    fn assign(&mut self, value: &dyn Any) {
        let value = value
            .downcast_ref::<T>()
            .expect("internal error - binding type must match store type");
        self.variable.push(value.clone());
    }

    fn reset(&mut self) {
        self.variable.clear();
    }
}
