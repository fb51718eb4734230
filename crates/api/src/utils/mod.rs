//! Utilities shared by the routes and the binary

pub mod logging;
