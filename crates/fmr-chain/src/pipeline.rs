use std::fmt::Debug;

use async_trait::async_trait;

use fmr_core::config::EvalConfig;
use fmr_core::data::Data;
use fmr_core::error::Result;
use fmr_core::runnable::Runnable;

use crate::context::EvalContext;
use crate::stage::{Stage, StageKind};

/// An ordered list of stages, detached from any input.
///
/// A pipeline can be run against many inputs and composes with other
/// runnables through `.pipe()`.
pub struct Pipeline<T> {
    stages: Vec<Stage<T>>,
}

impl<T> Pipeline<T> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push(&mut self, stage: Stage<T>) {
        self.stages.push(stage);
    }

    pub fn then(mut self, stage: Stage<T>) -> Self {
        self.push(stage);
        self
    }

    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.then(Stage::filter(predicate))
    }

    pub fn map<F>(self, transform: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.then(Stage::map(transform))
    }

    pub fn reduce<F>(self, combiner: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        self.then(Stage::reduce(combiner))
    }

    pub fn stages(&self) -> &[Stage<T>] {
        &self.stages
    }

    pub fn kinds(&self) -> Vec<StageKind> {
        self.stages.iter().map(Stage::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage against `input` in a fresh context.
    pub fn run(&self, input: Data<T>) -> Result<Data<T>>
    where
        T: Debug,
    {
        EvalContext::new(input).run(&self.stages)
    }
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
        }
    }
}

impl<T> Debug for Pipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.stages).finish()
    }
}

impl<T> Extend<Stage<T>> for Pipeline<T> {
    fn extend<I: IntoIterator<Item = Stage<T>>>(&mut self, iter: I) {
        self.stages.extend(iter);
    }
}

impl<T> FromIterator<Stage<T>> for Pipeline<T> {
    fn from_iter<I: IntoIterator<Item = Stage<T>>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl<T> Runnable for Pipeline<T>
where
    T: Debug + Send + 'static,
{
    type Input = Data<T>;
    type Output = Data<T>;

    async fn invoke(&self, input: Self::Input, config: &EvalConfig) -> Result<Self::Output> {
        let span = tracing::debug_span!(
            "fmr.pipeline",
            run_id = %config.run_id,
            name = config.name.as_deref().unwrap_or(""),
            tags = ?config.tags,
            stages = self.stages.len(),
        );
        span.in_scope(|| self.run(input))
    }
}
