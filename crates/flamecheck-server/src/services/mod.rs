//! Filesystem-backed services used by the route handlers.

pub mod pages;
pub mod uploads;
