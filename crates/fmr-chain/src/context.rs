use std::fmt::Debug;

use fmr_core::data::Data;
use fmr_core::error::{ChainError, Result};

use crate::stage::Stage;

/// Per-run state: the current working value and the first error raised.
///
/// A context is created for every evaluation and discarded once it has
/// produced a result. After an error is recorded no further stage runs and
/// the current value is left as it was.
#[derive(Debug)]
pub struct EvalContext<T> {
    current: Data<T>,
    error: Option<ChainError>,
}

impl<T: Debug> EvalContext<T> {
    pub fn new(input: Data<T>) -> Self {
        Self {
            current: input,
            error: None,
        }
    }

    pub fn current(&self) -> &Data<T> {
        &self.current
    }

    pub fn error(&self) -> Option<&ChainError> {
        self.error.as_ref()
    }

    /// Apply one stage to the current value.
    ///
    /// Returns `false` once the context holds an error.
    pub fn apply(&mut self, stage: &Stage<T>) -> bool {
        if self.error.is_some() {
            return false;
        }

        let kind = stage.kind();
        match std::mem::take(&mut self.current) {
            Data::Sequence(items) => {
                let input_len = items.len();
                self.current = match stage {
                    Stage::Filter(predicate) => Data::Sequence(filterer(items, &**predicate)),
                    Stage::Map(transform) => Data::Sequence(mapper(items, &**transform)),
                    Stage::Reduce(combiner) => reducer(items, &**combiner),
                };
                tracing::trace!(
                    stage = %kind,
                    input_len,
                    output_len = ?self.current.len(),
                    "stage applied"
                );
                true
            }
            other => {
                let err = ChainError::not_a_sequence(kind.as_str(), other.describe());
                tracing::debug!(stage = %kind, error = %err, "stage rejected its input");
                self.current = other;
                self.error = Some(err);
                false
            }
        }
    }

    /// Apply `stages` in order, stopping at the first error.
    pub fn run<'a, I>(mut self, stages: I) -> Result<Data<T>>
    where
        I: IntoIterator<Item = &'a Stage<T>>,
        T: 'a,
    {
        for stage in stages {
            if !self.apply(stage) {
                break;
            }
        }
        self.finish()
    }

    /// Consume the context, yielding the final value or the recorded error.
    pub fn finish(self) -> Result<Data<T>> {
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok(self.current),
        }
    }
}

fn filterer<T>(items: Vec<T>, predicate: &(dyn Fn(&T) -> bool + Send + Sync)) -> Vec<T> {
    items.into_iter().filter(|item| predicate(item)).collect()
}

fn mapper<T>(items: Vec<T>, transform: &(dyn Fn(T) -> T + Send + Sync)) -> Vec<T> {
    items.into_iter().map(transform).collect()
}

fn reducer<T>(items: Vec<T>, combiner: &(dyn Fn(T, T) -> T + Send + Sync)) -> Data<T> {
    let mut iter = items.into_iter();
    match iter.next() {
        Some(first) => Data::Item(iter.fold(first, combiner)),
        None => Data::Absent,
    }
}
