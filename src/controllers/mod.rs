//! Controllers - adapters from external requests to the use cases

pub mod portal;
