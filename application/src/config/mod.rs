//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`DeliveryOptions`]: bulk delivery control (concurrency, batching, timeouts)
//! - [`RetryPolicy`]: per-recipient attempts and backoff
//! - [`NotificationPolicy`]: acceptance bar for a finished delivery run

pub mod delivery_options;
pub mod notification_policy;
pub mod retry_policy;

pub use delivery_options::DeliveryOptions;
pub use notification_policy::NotificationPolicy;
pub use retry_policy::RetryPolicy;
