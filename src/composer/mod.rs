pub mod engine;
pub mod error;
pub mod report;
pub mod selection;
