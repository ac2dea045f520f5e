//! Spatial (arrow-key) focus navigation for pages built for pointers.

pub mod core;
pub mod page;
pub mod tui;

#[cfg(test)]
pub mod test_support;
