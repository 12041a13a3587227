// File: crates/stripchart-demo/src/lib.rs
// Summary: Demo support code: data sources, settings and the scripted session.

pub mod random_walk;
pub mod settings;
pub mod source;
pub mod session;
