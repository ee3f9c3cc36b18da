pub mod config;
pub mod error;
pub mod model;
mod paths;
pub mod storage;
pub mod workload;
pub mod workload_api;
