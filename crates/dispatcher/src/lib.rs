//! # Dispatcher
//!
//! 通知分发模块。
//!
//! 负责：
//! - 持有当前通知内容 (`DispatchHub`)
//! - 按注册顺序同步通知所有 reactor
//! - Fan-out 到多个投递渠道，隔离失败的渠道，不中断其他投递

pub mod channels;
pub mod error;
pub mod handle;
pub mod hub;
mod isolate;
pub mod metrics;
pub mod reactors;

pub use channels::{EmailChannel, OutboxChannel, OutboxRecord, PopupChannel, SmsChannel};
pub use contracts::{Content, DeliveryChannel, Reactor};
pub use error::DispatcherError;
pub use handle::ChannelHandle;
pub use hub::DispatchHub;
pub use metrics::{ChannelMetrics, MetricsSnapshot};
pub use reactors::{
    create_channel, create_engine, DispatchEngine, DispatchEngineBuilder, DispatchEngineConfig,
    LogReactor,
};
