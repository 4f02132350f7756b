//! `cx-domain` — types shared by every cx-inspector crate: the error
//! type, the TOML configuration model and structured trace events.

pub mod config;
pub mod error;
pub mod trace;
