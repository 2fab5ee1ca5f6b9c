pub mod axis;
pub mod interval;
pub mod validators;
