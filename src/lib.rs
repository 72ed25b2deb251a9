pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod ingest;
pub mod models;
pub mod report;
pub mod seed;
pub mod table;
pub mod words;
