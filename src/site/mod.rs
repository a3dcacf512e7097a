//! The studio site's own state: routes, navigation, the contact form and the error fallback.

/// Top-level render error fallback.
pub mod boundary;
/// Simulated contact submission.
pub mod contact;
/// Navigation overlay state.
pub mod nav;
/// Route table and path resolution.
pub mod routes;
