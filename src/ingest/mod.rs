/// Data ingestion from the garden backend.
///
/// Submodules:
/// - `backend`: blocking REST client plus pure parsers for every payload.

pub mod backend;
