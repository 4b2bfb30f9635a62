//! Core types shared by the exporter and importer.

pub mod errors;
pub mod model;
