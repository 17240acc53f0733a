//! Infrastructure layer - configuration store implementations

pub mod storage;
