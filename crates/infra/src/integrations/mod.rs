//! External service integrations

pub mod messes_info;
