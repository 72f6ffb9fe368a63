pub mod config;
pub mod schema;
pub mod sequence;
pub mod storage;
