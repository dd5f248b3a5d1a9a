//! Command implementations for jobscrape CLI

mod extract;
mod jobs;

pub use extract::*;
pub use jobs::*;
