#[macro_use]
extern crate tracing;

pub mod cli;
pub mod entity;
pub mod layout;
pub mod workspace;
