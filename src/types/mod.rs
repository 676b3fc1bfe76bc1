// Shared type definitions: persisted rows, settings, proxy descriptors, errors.

pub mod config;
pub mod errors;
pub mod history;
pub mod proxy;
