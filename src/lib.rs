mod composer;
mod error;
mod grid;
mod indexer;
mod job;
mod measure;
mod source;
mod types;

#[cfg(test)]
mod test_utils;

pub use error::ClimGridError;

pub use grid::axis::*;
pub use grid::interval::Interval;
pub use grid::validators;
pub use grid::validators::{is_valid_range, Boundary, RangeKind};

pub use indexer::coordinate::{
    axis_vector_len, coordinate_to_index, date_to_index, range_to_axis_vector,
};
pub use indexer::labels;
pub use indexer::labels::month_span;

pub use types::data_source::{ClimateVariable, UnknownVariable, VariableDescriptor};
pub use types::epoch::*;
pub use types::statistic::Statistic;
pub use types::time_label::{Granularity, TimeLabel};
pub use types::traits::period::date_period::{
    year_month_to_date_range, year_quarter_to_date_range, year_to_date_range, DatePeriod,
};
pub use types::traits::types::{Month, Quarter, StartEndDate, Year};

pub use source::error::FetchError;
pub use source::opendap::*;
pub use source::{Block, GridHandle, GridSource, Hyperslab, IndexWindow};

pub use measure::Measure;

pub use composer::engine::Composer;
pub use composer::error::ReportError;
pub use composer::report::{Report, ReportColumn};
pub use composer::selection::{Extent, Selection};

pub use job::{run_job, JobOutput, JobRequest, ProcessId, OUTPUT_MEDIA_TYPE};
