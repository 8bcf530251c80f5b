//! Typed client for the campus complaint service: session persistence, a single HTTP
//! request primitive with uniform 401/error handling, resource clients, client-side
//! validation and a DOM-free view layer.

pub mod error;
pub mod config;
pub mod models;
pub mod session;
pub mod params;
pub mod http;
pub mod validation;
pub mod pagination;
pub mod debounce;
pub mod api;
pub mod view;
pub mod cli;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::{ApiClient, LogNavigator, Navigator, RecordingNavigator, RequestOptions};
pub use params::QueryParams;
pub use session::SessionStore;

// Test-only printing helper: expands to eprintln! in test and debug builds.
#[cfg(any(test, debug_assertions))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ( eprintln!($($arg)*) );
}

// In release builds tprintln! keeps its format checks but prints nothing.
#[cfg(not(any(test, debug_assertions)))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ({
        if false { let _ = format!($($arg)*); }
    });
}
