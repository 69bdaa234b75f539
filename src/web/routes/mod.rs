//! Page Routes
//!
//! Route handlers organized by page.

pub mod dashboard;
pub mod events;
pub mod health;
