pub mod asset;
pub mod config;
pub mod error;
pub mod phase;
pub mod position;
pub mod storage;
