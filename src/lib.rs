//! Garden plant monitoring: classifies sensor readings against per-plant
//! growing requirements and watches a garden backend for readings that
//! need attention.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod dev_mode;
pub mod evaluate;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod plants;
pub mod verify;
