//! Host capabilities: what the environment can render, the element tree, durable storage.

/// Injected capability check.
pub mod capability;
/// Element tree and inline styles.
pub mod document;
/// Key/value persistence.
pub mod storage;
