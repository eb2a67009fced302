//! Worker implementations.

pub mod notify;

pub use notify::{NotifyContext, notify_worker};
