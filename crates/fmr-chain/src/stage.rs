use std::fmt;
use std::sync::Arc;

pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
pub type Transform<T> = Arc<dyn Fn(T) -> T + Send + Sync>;
pub type Combiner<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

/// Which operation a stage performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Filter,
    Map,
    Reduce,
}

impl StageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Map => "map",
            Self::Reduce => "reduce",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered filter, map, or reduce operation.
///
/// The functions are shared, so cloning a stage is cheap and a clone can be
/// handed to a worker thread.
pub enum Stage<T> {
    /// Keep elements for which the predicate returns true.
    Filter(Predicate<T>),
    /// Replace every element with the transform's output.
    Map(Transform<T>),
    /// Left-fold the sequence into a single item, seeded with the first element.
    Reduce(Combiner<T>),
}

impl<T> Stage<T> {
    pub fn filter<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Filter(Arc::new(predicate))
    }

    pub fn map<F>(transform: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self::Map(Arc::new(transform))
    }

    pub fn reduce<F>(combiner: F) -> Self
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        Self::Reduce(Arc::new(combiner))
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Self::Filter(_) => StageKind::Filter,
            Self::Map(_) => StageKind::Map,
            Self::Reduce(_) => StageKind::Reduce,
        }
    }
}

// Manual impl: `T` itself need not be Clone.
impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Filter(f) => Self::Filter(Arc::clone(f)),
            Self::Map(f) => Self::Map(Arc::clone(f)),
            Self::Reduce(f) => Self::Reduce(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(_) => write!(f, "Filter(...)"),
            Self::Map(_) => write!(f, "Map(...)"),
            Self::Reduce(_) => write!(f, "Reduce(...)"),
        }
    }
}
