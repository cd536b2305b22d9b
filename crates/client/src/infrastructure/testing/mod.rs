//! Test support shared by the service tests.

pub mod fixtures;
