//! # Notification Service
//!
//! 通知服务门面。
//!
//! 负责：
//! - 唯一的提交入口 (`submit` / `send`)
//! - 只追加的提交历史，对外只提供快照
//! - 拥有唯一的 `DispatchHub`，并根据 `ServiceBlueprint` 组装 reactor

mod history;
mod service;

pub use history::HistoryEntry;
pub use service::{NotificationService, SubmitReport};
