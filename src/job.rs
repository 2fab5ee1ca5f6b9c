//! Remote job interface: a JSON request naming one report operation, executed
//! on a blocking worker and answered with a single CSV file.

use crate::composer::engine::Composer;
use crate::composer::selection::Selection;
use crate::error::ClimGridError;
use crate::grid::interval::Interval;
use crate::source::GridSource;
use crate::types::statistic::Statistic;
use crate::types::traits::types::Month;
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task;

/// Media type of every job output.
pub const OUTPUT_MEDIA_TYPE: &str = "text/csv";

/// The report operations a job can run.
///
/// The older `mean_`-prefixed identifiers are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessId {
    #[serde(alias = "mean_one_year_one_month")]
    OneYearOneMonth,
    #[serde(alias = "mean_one_year_all_months")]
    OneYearAllMonths,
    #[serde(alias = "mean_years_all_months")]
    YearsAllMonths,
    #[serde(alias = "mean_years_one_month")]
    YearsOneMonth,
    #[serde(alias = "mean_one_year_month_range")]
    OneYearMonthRange,
    #[serde(alias = "fromto_year_month_range")]
    Fromto,
    #[serde(alias = "mean_one_year_one_quarter")]
    OneYearOneQuarter,
    #[serde(alias = "mean_one_year_all_quarters")]
    OneYearAllQuarters,
    #[serde(alias = "mean_years_all_quarters")]
    YearsAllQuarters,
    #[serde(alias = "mean_years_one_quarter")]
    YearsOneQuarter,
    #[serde(alias = "mean_one_year")]
    OneYear,
    #[serde(alias = "mean_years")]
    Years,
    Days,
}

impl ProcessId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessId::OneYearOneMonth => "one_year_one_month",
            ProcessId::OneYearAllMonths => "one_year_all_months",
            ProcessId::YearsAllMonths => "years_all_months",
            ProcessId::YearsOneMonth => "years_one_month",
            ProcessId::OneYearMonthRange => "one_year_month_range",
            ProcessId::Fromto => "fromto",
            ProcessId::OneYearOneQuarter => "one_year_one_quarter",
            ProcessId::OneYearAllQuarters => "one_year_all_quarters",
            ProcessId::YearsAllQuarters => "years_all_quarters",
            ProcessId::YearsOneQuarter => "years_one_quarter",
            ProcessId::OneYear => "one_year",
            ProcessId::Years => "years",
            ProcessId::Days => "days",
        }
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One report request as received from a job queue.
///
/// Which of the optional calendar fields are required depends on `process`:
///
/// | process                  | fields                                        |
/// |--------------------------|-----------------------------------------------|
/// | `one_year_one_month`     | `year`, `month`                               |
/// | `one_year_all_months`    | `year`                                        |
/// | `years_all_months`       | `year_min`, `year_max`                        |
/// | `years_one_month`        | `year_min`, `year_max`, `month`               |
/// | `one_year_month_range`   | `year`, `month_min`, `month_max`              |
/// | `fromto`                 | `year_min`, `month_min`, `year_max`, `month_max` |
/// | `one_year_one_quarter`   | `year`, `quarter`                             |
/// | `one_year_all_quarters`  | `year`                                        |
/// | `years_all_quarters`     | `year_min`, `year_max`                        |
/// | `years_one_quarter`      | `year_min`, `year_max`, `quarter`             |
/// | `one_year`               | `year`                                        |
/// | `years`                  | `year_min`, `year_max`                        |
/// | `days`                   | `date_min`, `date_max`                        |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub process: ProcessId,
    pub variables: Vec<String>,
    pub year: Option<i32>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub month: Option<u32>,
    pub month_min: Option<u32>,
    pub month_max: Option<u32>,
    pub quarter: Option<u32>,
    pub date_min: Option<NaiveDate>,
    pub date_max: Option<NaiveDate>,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    #[serde(default)]
    pub statistic: Statistic,
}

/// Reference to the file a finished job produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutput {
    pub path: PathBuf,
    pub media_type: &'static str,
    pub rows: usize,
}

impl JobRequest {
    pub fn from_json(json: &str) -> Result<Self, ClimGridError> {
        serde_json::from_str(json).map_err(ClimGridError::MalformedRequest)
    }

    pub fn latitudes(&self) -> Interval<f64> {
        Interval::new(self.lat_min, self.lat_max)
    }

    pub fn longitudes(&self) -> Interval<f64> {
        Interval::new(self.lon_min, self.lon_max)
    }

    /// Maps the calendar fields onto the selection for `process`.
    ///
    /// # Errors
    ///
    /// [`ClimGridError::InvalidParameters`] when a field the process needs is
    /// missing. Range checks happen later, in the composer.
    pub fn selection(&self) -> Result<Selection, ClimGridError> {
        let operation = format!("process_{}", self.process);
        let need = |value: Option<i32>| {
            value.ok_or_else(|| ClimGridError::invalid_parameters(operation.as_str()))
        };
        let need_unit = |value: Option<u32>| {
            value.ok_or_else(|| ClimGridError::invalid_parameters(operation.as_str()))
        };
        let years = || -> Result<Interval<i32>, ClimGridError> {
            Ok(Interval::new(need(self.year_min)?, need(self.year_max)?))
        };

        Ok(match self.process {
            ProcessId::OneYearOneMonth => {
                Selection::one_year_one_month(need(self.year)?, need_unit(self.month)?)
            }
            ProcessId::OneYearAllMonths => Selection::one_year_all_months(need(self.year)?),
            ProcessId::YearsAllMonths => Selection::years_all_months(years()?),
            ProcessId::YearsOneMonth => Selection::years_one_month(years()?, need_unit(self.month)?),
            ProcessId::OneYearMonthRange => Selection::one_year_month_range(
                need(self.year)?,
                Interval::new(need_unit(self.month_min)?, need_unit(self.month_max)?),
            ),
            ProcessId::Fromto => Selection::fromto(
                Month(need(self.year_min)?, need_unit(self.month_min)?),
                Month(need(self.year_max)?, need_unit(self.month_max)?),
            ),
            ProcessId::OneYearOneQuarter => {
                Selection::one_year_one_quarter(need(self.year)?, need_unit(self.quarter)?)
            }
            ProcessId::OneYearAllQuarters => Selection::one_year_all_quarters(need(self.year)?),
            ProcessId::YearsAllQuarters => Selection::years_all_quarters(years()?),
            ProcessId::YearsOneQuarter => {
                Selection::years_one_quarter(years()?, need_unit(self.quarter)?)
            }
            ProcessId::OneYear => Selection::one_year(need(self.year)?),
            ProcessId::Years => Selection::years(years()?),
            ProcessId::Days => match (self.date_min, self.date_max) {
                (Some(first), Some(last)) => Selection::days(Interval::new(first, last)),
                _ => return Err(ClimGridError::invalid_parameters(operation.as_str())),
            },
        })
    }
}

/// Runs one job to completion on a blocking worker and writes its CSV to `output`.
///
/// Variables are checked first, then the calendar fields, then the composer
/// validates ranges before anything is fetched. Any failure fails the job and
/// leaves no file at `output`.
///
/// # Example
///
/// ```no_run
/// use climgrid::{run_job, JobRequest, OpendapSource};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), climgrid::ClimGridError> {
/// let request = JobRequest::from_json(
///     r#"{"process": "years_one_quarter", "variables": ["rainfall"],
///         "year_min": 1990, "year_max": 1999, "quarter": 1,
///         "lat_min": -27.6, "lat_max": -27.4, "lon_min": 152.9, "lon_max": 153.1}"#,
/// )?;
/// let output = run_job(request, Arc::new(OpendapSource::default()), "q1_rain.csv".into()).await?;
/// println!("{} rows written to {:?}", output.rows, output.path);
/// # Ok(())
/// # }
/// ```
pub async fn run_job<S>(
    request: JobRequest,
    source: Arc<S>,
    output: PathBuf,
) -> Result<JobOutput, ClimGridError>
where
    S: GridSource + Send + Sync + 'static,
{
    let process = request.process;
    info!("Starting {} job for {:?}", process, request.variables);

    let result = task::spawn_blocking(move || {
        let composer = Composer::with_shared_source(&request.variables, source)?;
        let selection = request.selection()?;
        let report = composer
            .report(&selection)
            .latitudes(request.latitudes())
            .longitudes(request.longitudes())
            .statistic(request.statistic)
            .call()?;
        report.write_csv(&output)?;
        Ok::<JobOutput, ClimGridError>(JobOutput {
            path: output,
            media_type: OUTPUT_MEDIA_TYPE,
            rows: report.num_rows(),
        })
    })
    .await?;

    match &result {
        Ok(done) => info!("{} job wrote {} rows to {:?}", process, done.rows, done.path),
        Err(e) => warn!("{} job failed: {}", process, e),
    }
    result
}
