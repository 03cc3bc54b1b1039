//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application: the lifecycle callbacks of [`App`] and the ordering in
//! which the host invokes the resource stages ([`Lifecycle`]).

mod app;
mod lifecycle;

pub use app::App;
pub use lifecycle::{Lifecycle, Stage};
