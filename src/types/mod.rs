pub mod data_source;
pub mod epoch;
pub mod statistic;
pub mod time_label;
pub mod traits;
