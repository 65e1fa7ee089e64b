use async_trait::async_trait;

use crate::config::EvalConfig;
use crate::error::Result;

/// An async step that turns one input into one output.
///
/// Stage pipelines implement this with `Data<T>` on both sides, so a whole
/// filter/map/reduce list can sit next to any other step and be joined with
/// [`RunnableExt::pipe`].
#[async_trait]
pub trait Runnable: Send + Sync {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn invoke(&self, input: Self::Input, config: &EvalConfig) -> Result<Self::Output>;

    /// Invoke once per input, in order. The first failure aborts the batch.
    async fn batch(&self, inputs: Vec<Self::Input>, config: &EvalConfig) -> Result<Vec<Self::Output>> {
        let mut outputs = Vec::with_capacity(inputs.len());
        for input in inputs {
            outputs.push(self.invoke(input, config).await?);
        }
        Ok(outputs)
    }
}

pub trait RunnableExt: Runnable + Sized {
    /// Feed the output of `self` into `next`. Both sides see the same config.
    fn pipe<R>(self, next: R) -> RunnableSequence<Self, R>
    where
        R: Runnable<Input = Self::Output>,
    {
        RunnableSequence {
            first: self,
            second: next,
        }
    }
}

impl<T: Runnable + Sized> RunnableExt for T {}

/// Two runnables run back to back; an error from the first skips the second.
pub struct RunnableSequence<A, B> {
    pub(crate) first: A,
    pub(crate) second: B,
}

#[async_trait]
impl<A, B> Runnable for RunnableSequence<A, B>
where
    A: Runnable,
    B: Runnable<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    async fn invoke(&self, input: Self::Input, config: &EvalConfig) -> Result<Self::Output> {
        let mid = self.first.invoke(input, config).await?;
        self.second.invoke(mid, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Data;
    use crate::error::{ChainError, FmrError};

    /// Keeps the even elements of a sequence.
    struct Evens;

    #[async_trait]
    impl Runnable for Evens {
        type Input = Data<i32>;
        type Output = Data<i32>;

        async fn invoke(&self, input: Data<i32>, _config: &EvalConfig) -> Result<Data<i32>> {
            match input {
                Data::Sequence(items) => Ok(items.into_iter().filter(|n| n % 2 == 0).collect()),
                other => Err(ChainError::not_a_sequence("filter", other.describe()).into()),
            }
        }
    }

    /// Folds a sequence into its sum; an empty sequence becomes absent.
    struct Total;

    #[async_trait]
    impl Runnable for Total {
        type Input = Data<i32>;
        type Output = Data<i32>;

        async fn invoke(&self, input: Data<i32>, _config: &EvalConfig) -> Result<Data<i32>> {
            match input {
                Data::Sequence(items) => Ok(items.into_iter().reduce(|a, b| a + b).into()),
                other => Err(ChainError::not_a_sequence("reduce", other.describe()).into()),
            }
        }
    }

    /// Records the run id it was invoked with.
    struct RunIdOf;

    #[async_trait]
    impl Runnable for RunIdOf {
        type Input = Data<i32>;
        type Output = uuid::Uuid;

        async fn invoke(&self, _input: Data<i32>, config: &EvalConfig) -> Result<uuid::Uuid> {
            Ok(config.run_id)
        }
    }

    #[tokio::test]
    async fn pipe_filter_into_total() {
        let config = EvalConfig::default();
        let result = Evens
            .pipe(Total)
            .invoke(Data::Sequence(vec![1, 2, 3, 4]), &config)
            .await
            .unwrap();
        assert_eq!(result, Data::Item(6));
    }

    #[tokio::test]
    async fn pipe_stops_at_first_error() {
        let config = EvalConfig::default();
        // Total yields an item, which Evens then refuses.
        let err = Total
            .pipe(Evens)
            .pipe(Total)
            .invoke(Data::Sequence(vec![1, 2]), &config)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FmrError::Chain(ChainError::NotASequence { operation: "filter", .. })
        ));
        assert!(err.to_string().ends_with("found 3"));
    }

    #[tokio::test]
    async fn pipe_shares_config() {
        let config = EvalConfig::default();
        let seen = Evens
            .pipe(RunIdOf)
            .invoke(Data::Sequence(vec![]), &config)
            .await
            .unwrap();
        assert_eq!(seen, config.run_id);
    }

    #[tokio::test]
    async fn batch_keeps_input_order() {
        let config = EvalConfig::default();
        let inputs = vec![
            Data::Sequence(vec![1, 2, 3]),
            Data::Sequence(vec![]),
            Data::Sequence(vec![10]),
        ];
        let results = Total.batch(inputs, &config).await.unwrap();
        assert_eq!(results, vec![Data::Item(6), Data::Absent, Data::Item(10)]);
    }

    #[tokio::test]
    async fn batch_aborts_on_scalar() {
        let config = EvalConfig::default();
        let inputs = vec![Data::Sequence(vec![1]), Data::Item(2), Data::Sequence(vec![3])];
        assert!(matches!(
            Total.batch(inputs, &config).await,
            Err(FmrError::Chain(ChainError::NotASequence { operation: "reduce", .. }))
        ));
    }
}
