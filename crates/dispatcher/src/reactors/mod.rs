//! Reactor implementations
//!
//! Contains LogReactor and DispatchEngine.

mod engine;
mod log;

pub use self::engine::{
    create_channel, create_engine, DispatchEngine, DispatchEngineBuilder, DispatchEngineConfig,
};
pub use self::log::LogReactor;
