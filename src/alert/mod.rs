pub mod stalenesses;
pub mod thresholds;
