//! Application layer - Toast service and port interfaces
//!
//! Contains the service facade, the template materializer, event
//! dispatch, and the trait definitions for the notification platform.

pub mod dispatch;
pub mod materializer;
pub mod ports;
pub mod service;

// Re-export the public surface
pub use dispatch::ToastHandler;
pub use service::ToastService;
