pub mod config;
pub mod data;
pub mod error;
pub mod runnable;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::EvalConfig;
    pub use crate::data::Data;
    pub use crate::error::{ChainError, FmrError, Result};
    pub use crate::runnable::{Runnable, RunnableExt, RunnableSequence};
}
