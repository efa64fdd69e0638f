// Adapters layer: concrete implementations for the statistics service and output storage.

pub mod http;
pub mod storage;
