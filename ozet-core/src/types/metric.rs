use serde::{Deserialize, Serialize};

/// A value that a provider may or may not have supplied.
///
/// `Unknown` is never a numeric placeholder: `Known(0)` is a real reading and
/// takes part in merges like any other known value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric<T> {
    /// The provider supplied a value.
    Known(T),
    /// No source supplied a value.
    Unknown,
}

impl<T> Default for Metric<T> {
    fn default() -> Self {
        Self::Unknown
    }
}

impl<T> Metric<T> {
    /// True when a value is present.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// True when no value is present.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Converts into an `Option`.
    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }

    /// Borrows the inner value.
    pub const fn as_ref(&self) -> Metric<&T> {
        match self {
            Self::Known(v) => Metric::Known(v),
            Self::Unknown => Metric::Unknown,
        }
    }

    /// Maps a known value, leaving `Unknown` untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Metric<U> {
        match self {
            Self::Known(v) => Metric::Known(f(v)),
            Self::Unknown => Metric::Unknown,
        }
    }

    /// Chains a computation that may itself produce `Unknown`.
    pub fn and_then<U, F: FnOnce(T) -> Metric<U>>(self, f: F) -> Metric<U> {
        match self {
            Self::Known(v) => f(v),
            Self::Unknown => Metric::Unknown,
        }
    }

    /// Keeps a known value only when it satisfies `pred`.
    #[must_use]
    pub fn filter<P: FnOnce(&T) -> bool>(self, pred: P) -> Self {
        match self {
            Self::Known(v) if pred(&v) => Self::Known(v),
            _ => Self::Unknown,
        }
    }

    /// Field-level merge: keeps `self` when known, otherwise takes `fallback`.
    ///
    /// A known value on the left is never replaced.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        match self {
            Self::Known(_) => self,
            Self::Unknown => fallback,
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl<T> From<Metric<T>> for Option<T> {
    fn from(value: Metric<T>) -> Self {
        value.known()
    }
}
