//! Formguard Validation Core
//!
//! Pure validation functions for sign-up form fields. Every validator takes
//! plain strings and returns a plain verdict, so the same logic serves the
//! server and the WASM bindings used by the browser.

pub mod email;
pub mod password;
pub mod postal;
pub mod result;

// Re-export all validators
pub use email::*;
pub use password::*;
pub use postal::*;
pub use result::*;
