use std::fmt::Debug;

use serde_json::Value;

use fmr_core::config::EvalConfig;
use fmr_core::data::Data;
use fmr_core::error::Result;

use crate::pipeline::Pipeline;
use crate::receiver::ChainReceiver;
use crate::stage::Stage;

/// A deferred filter/map/reduce chain over an input value.
///
/// Stages are only recorded when registered; nothing runs until
/// [`evaluate`](Self::evaluate) or [`evaluate_async`](Self::evaluate_async)
/// is called. Evaluation never touches the stored input, so a chain can be
/// evaluated any number of times.
///
/// ```
/// use fmr_chain::prelude::*;
///
/// let sum = FunctionChain::new(vec![1, 2, 3, 4, 5, 6])
///     .filter(|n| n % 2 == 0)
///     .map(|n| n * 2)
///     .reduce(|acc, n| acc + n)
///     .evaluate()
///     .unwrap();
/// assert_eq!(sum, Data::Item(24));
/// ```
#[derive(Clone)]
pub struct FunctionChain<T> {
    input: Data<T>,
    pipeline: Pipeline<T>,
}

impl<T> FunctionChain<T> {
    /// Wrap `input` as-is with an empty stage list.
    pub fn new(input: impl Into<Data<T>>) -> Self {
        Self {
            input: input.into(),
            pipeline: Pipeline::new(),
        }
    }

    /// Start from a single non-sequence value. Any stage run against it
    /// fails with `NotASequence`.
    pub fn from_item(item: T) -> Self {
        Self::new(Data::Item(item))
    }

    /// Register a filter stage keeping elements for which `predicate` is true.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.pipeline.push(Stage::filter(predicate));
        self
    }

    /// Register a map stage replacing every element with `transform(element)`.
    pub fn map<F>(mut self, transform: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.pipeline.push(Stage::map(transform));
        self
    }

    /// Register a reduce stage folding the sequence left-to-right, seeded with
    /// its first element. An empty sequence reduces to `Data::Absent`.
    pub fn reduce<F>(mut self, combiner: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        self.pipeline.push(Stage::reduce(combiner));
        self
    }

    /// Append a pre-built stage.
    pub fn then(mut self, stage: Stage<T>) -> Self {
        self.pipeline.push(stage);
        self
    }

    /// Append every stage of `pipeline`, in order.
    pub fn with_pipeline(mut self, pipeline: &Pipeline<T>) -> Self {
        self.pipeline.extend(pipeline.stages().iter().cloned());
        self
    }

    /// The value every evaluation starts from.
    pub fn input(&self) -> &Data<T> {
        &self.input
    }

    /// The registered stages, in execution order.
    pub fn pipeline(&self) -> &Pipeline<T> {
        &self.pipeline
    }

    pub fn len(&self) -> usize {
        self.pipeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipeline.is_empty()
    }
}

impl FunctionChain<Value> {
    /// Untyped entry point: JSON arrays are sequences, `null` is absent, and
    /// every other value is a single item.
    pub fn from_json(value: Value) -> Self {
        Self::new(Data::from_json(value))
    }
}

impl<T: Clone + Debug> FunctionChain<T> {
    /// Run the chain on the calling thread.
    pub fn evaluate(&self) -> Result<Data<T>> {
        self.evaluate_with_config(&EvalConfig::default())
    }

    pub fn evaluate_with_config(&self, config: &EvalConfig) -> Result<Data<T>> {
        let span = tracing::debug_span!(
            "fmr.evaluate",
            run_id = %config.run_id,
            name = config.name.as_deref().unwrap_or(""),
            tags = ?config.tags,
            stages = self.pipeline.len(),
        );
        span.in_scope(|| self.pipeline.run(self.input.clone()))
    }
}

impl<T: Clone + Debug + Send + 'static> FunctionChain<T> {
    /// Run the chain off the calling thread.
    ///
    /// Inside a tokio runtime the work goes to the blocking pool via
    /// `spawn_blocking`; outside one it gets a dedicated `fmr-eval` thread.
    ///
    /// Returns immediately. The receiver yields exactly one message, after
    /// which the channel is closed. The channel holds that message, so the
    /// worker finishes whether or not anyone reads it. If the worker dies
    /// before sending (a stage function panicked, or no thread could be
    /// spawned) the receiver reports `Disconnected`.
    pub fn evaluate_async(&self) -> ChainReceiver<T> {
        self.evaluate_async_with_config(&EvalConfig::default())
    }

    pub fn evaluate_async_with_config(&self, config: &EvalConfig) -> ChainReceiver<T> {
        let (tx, rx) = flume::bounded(1);
        let input = self.input.clone();
        let pipeline = self.pipeline.clone();
        let span = tracing::debug_span!(
            "fmr.evaluate_async",
            run_id = %config.run_id,
            name = config.name.as_deref().unwrap_or(""),
            tags = ?config.tags,
            stages = pipeline.len(),
        );

        let work = move || {
            let _entered = span.entered();
            let result = pipeline.run(input);
            tracing::debug!(ok = result.is_ok(), "evaluation finished");
            if tx.send(result).is_err() {
                tracing::trace!("receiver dropped before delivery");
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(work);
            }
            Err(_) => {
                let spawned = std::thread::Builder::new()
                    .name("fmr-eval".into())
                    .spawn(work);
                if let Err(err) = spawned {
                    tracing::warn!(error = %err, "failed to spawn evaluation worker");
                }
            }
        }

        ChainReceiver::new(rx)
    }
}

impl<T: Debug> Debug for FunctionChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionChain")
            .field("input", &self.input)
            .field("stages", &self.pipeline)
            .finish()
    }
}
