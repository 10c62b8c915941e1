//! CLI command implementations

pub mod forms;

pub mod demo;
pub mod report;
pub mod run;
pub mod scales;
pub mod workshops;

pub mod workshop1;
pub mod workshop2;
pub mod workshop3;
pub mod workshop4;
pub mod workshop5;
