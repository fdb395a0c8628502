/// Per-plant analysis of sensor readings.
///
/// This module turns a reading into per-plant statuses and keeps a short
/// history of them. Long-term storage of readings is the backend's job.
///
/// Submodules:
/// - `status`: evaluates a whole reading for one plant.
/// - `history`: bounded in-memory history of evaluated readings.

pub mod history;
pub mod status;
