//! Job definitions.

pub mod notify;

pub use notify::{NotifyJob, NotifyKind};
