//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span)
//!     → handlers.rs (page or form submission)
//!     → forms.rs (form fields → typed call arguments)
//!     → contract registry (transaction or call)
//!     → response.rs (result or error → text)
//! ```

pub mod forms;
pub mod handlers;
pub mod pages;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
