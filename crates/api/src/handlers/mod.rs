//! Request handlers, one module per resource.

pub mod ai;
pub mod auth;
pub mod posts;
pub mod scripts;
pub mod settings;
pub mod tutorials;
pub mod unlock;
