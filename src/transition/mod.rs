/// Overlay wipe between routed pages.
pub mod page;
