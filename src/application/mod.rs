pub mod api;
pub mod controllers;
pub mod error;
pub mod signal;
