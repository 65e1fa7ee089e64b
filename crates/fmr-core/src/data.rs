use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// The working value a chain operates on.
///
/// Only `Sequence` can be iterated by a stage. `Item` is what a reduce
/// leaves behind (or a scalar handed to a dynamic entry point), and `Absent`
/// is the result of reducing an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Data<T> {
    Sequence(Vec<T>),
    Item(T),
    Absent,
}

impl<T> Data<T> {
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_sequence(&self) -> Option<&[T]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_sequence(self) -> Option<Vec<T>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Number of elements for a sequence, `None` for any other shape.
    pub fn len(&self) -> Option<usize> {
        self.as_sequence().map(<[T]>::len)
    }

    /// Human-readable rendering used in error messages.
    pub fn describe(&self) -> String
    where
        T: Debug,
    {
        match self {
            Self::Sequence(items) => format!("{items:?}"),
            Self::Item(item) => format!("{item:?}"),
            Self::Absent => "absent value".to_string(),
        }
    }
}

impl<T> Default for Data<T> {
    fn default() -> Self {
        Self::Sequence(Vec::new())
    }
}

impl<T> From<Vec<T>> for Data<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items)
    }
}

impl<T: Clone> From<&[T]> for Data<T> {
    fn from(items: &[T]) -> Self {
        Self::Sequence(items.to_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for Data<T> {
    fn from(items: [T; N]) -> Self {
        Self::Sequence(items.into())
    }
}

impl<T> From<Option<T>> for Data<T> {
    fn from(item: Option<T>) -> Self {
        match item {
            Some(item) => Self::Item(item),
            None => Self::Absent,
        }
    }
}

impl<T> FromIterator<T> for Data<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

impl Data<Value> {
    /// Classify an untyped JSON value: arrays become sequences of their
    /// elements, `null` is absent, anything else is a single item.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items),
            Value::Null => Self::Absent,
            other => Self::Item(other),
        }
    }

    /// Inverse of [`Data::from_json`].
    pub fn into_json(self) -> Value {
        match self {
            Self::Sequence(items) => Value::Array(items),
            Self::Item(item) => item,
            Self::Absent => Value::Null,
        }
    }
}

impl<T: DeserializeOwned> Data<T> {
    /// Classify a JSON value like [`Data::from_json`], then deserialize the
    /// element(s) into `T`.
    pub fn from_json_typed(value: Value) -> Result<Self> {
        Ok(match value {
            Value::Array(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<std::result::Result<_, _>>()?,
            ),
            Value::Null => Self::Absent,
            other => Self::Item(serde_json::from_value(other)?),
        })
    }
}

impl<T: Serialize> Data<T> {
    /// Serialize into JSON; `Absent` becomes `null`.
    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            Self::Sequence(items) => serde_json::to_value(items)?,
            Self::Item(item) => serde_json::to_value(item)?,
            Self::Absent => Value::Null,
        })
    }
}
