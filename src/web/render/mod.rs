//! HTML Rendering
//!
//! Stateless functions from view-model state to complete HTML documents.

pub mod dashboard;
pub mod detail;
pub mod events;
pub mod layout;

pub use layout::html_escape;
