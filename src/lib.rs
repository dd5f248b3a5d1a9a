pub mod cli;
pub mod config;
pub mod controller;
pub mod db;
pub mod dom;
pub mod error;
pub mod export;
pub mod fetch;
pub mod freshness;
pub mod job;
pub mod jsonld;
pub mod metadata;
pub mod normalize;
pub mod sections;
pub mod sites;
pub mod validate;

pub use error::{JobError, Result};
