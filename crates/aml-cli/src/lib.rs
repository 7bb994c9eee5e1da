//! CLI library components for the AAS mapping tool.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
