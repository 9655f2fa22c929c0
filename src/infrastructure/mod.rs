//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the WinRT
//! notification platform, the in-memory platform, the system clock and
//! the config file store.

pub mod clock;
pub mod config;
pub mod memory;
#[cfg(windows)]
pub mod winrt;

use std::sync::Arc;

// Re-export adapters
pub use clock::SystemClock;
pub use config::TomlFileStore;
pub use memory::{MemoryDocument, MemoryPlatform};
#[cfg(windows)]
pub use winrt::WinRtPlatform;

use crate::application::ToastService;

/// The notification platform of the current OS
#[cfg(windows)]
pub type NativePlatform = WinRtPlatform;

/// The notification platform of the current OS
#[cfg(not(windows))]
pub type NativePlatform = MemoryPlatform;

/// Create the platform adapter for the current OS.
///
/// Outside Windows this is an in-memory platform that reports itself as
/// unsupported.
pub fn native_platform() -> NativePlatform {
    #[cfg(windows)]
    {
        WinRtPlatform::new()
    }
    #[cfg(not(windows))]
    {
        MemoryPlatform::unsupported()
    }
}

/// Create an uninitialized service on the native platform
pub fn create_service(app_id: impl Into<String>) -> ToastService<NativePlatform> {
    ToastService::new(native_platform(), app_id, Arc::new(SystemClock::new()))
}

/// Create a service on a full-featured in-memory platform
pub fn create_preview_service(app_id: impl Into<String>) -> ToastService<MemoryPlatform> {
    ToastService::new(MemoryPlatform::new(), app_id, Arc::new(SystemClock::new()))
}
