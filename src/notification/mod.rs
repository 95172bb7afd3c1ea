//! Publishers for the alert notification channel.
//!
//! The dispatcher only sees the `Publisher` trait; which implementation backs
//! it is decided once at startup.
pub mod logging_publisher;
pub mod sns;

pub use logging_publisher::LoggingPublisher;
pub use sns::SnsPublisher;
