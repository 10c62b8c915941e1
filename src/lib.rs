//! Atelier RM
//!
//! A terminal toolkit for running guided EBIOS RM risk-assessment
//! workshops: five sequential ateliers, an in-memory session, and a
//! summary report at the end.

pub mod cli;
pub mod core;
pub mod entities;
pub mod report;
