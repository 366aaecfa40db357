//! Web front end for the Glowskill prospectus dashboard.

pub mod app;
pub mod pages;

pub use app::{AppState, router};
