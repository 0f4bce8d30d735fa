pub mod cli;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod report;
