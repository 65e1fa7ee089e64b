pub mod chain;
pub mod context;
pub mod pipeline;
pub mod receiver;
pub mod stage;

pub mod prelude {
    pub use fmr_core::data::Data;
    pub use fmr_core::error::{ChainError, FmrError};

    pub use crate::chain::FunctionChain;
    pub use crate::context::EvalContext;
    pub use crate::pipeline::Pipeline;
    pub use crate::receiver::ChainReceiver;
    pub use crate::stage::{Stage, StageKind};
}
