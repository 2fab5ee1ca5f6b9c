pub mod period;
pub mod types;
pub mod utils;
