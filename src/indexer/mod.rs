pub mod coordinate;
pub mod labels;
