//! Driver backend implementations

pub mod mongodb;
