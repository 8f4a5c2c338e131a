//! Application layer - use cases driving the domain ports

pub mod usecases;
