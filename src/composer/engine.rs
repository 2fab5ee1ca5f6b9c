//! Provides the [`Composer`], which fans a report request out over one
//! [`Measure`] per requested variable and assembles the resulting table.

use crate::composer::error::ReportError;
use crate::composer::report::{Report, ReportColumn};
use crate::composer::selection::Selection;
use crate::error::ClimGridError;
use crate::grid::axis::{LATITUDE, LONGITUDE};
use crate::grid::interval::Interval;
use crate::grid::validators::validate_area;
use crate::indexer::coordinate::range_to_axis_vector;
use crate::measure::Measure;
use crate::source::GridSource;
use crate::types::data_source::ClimateVariable;
use crate::types::statistic::Statistic;
use bon::bon;
use log::info;
use std::iter;
use std::sync::Arc;

/// Builds tabular reports for a fixed, validated list of climate variables.
///
/// A `Composer` owns one [`Measure`] per distinct requested variable, in
/// request order, all sharing the same [`GridSource`].
pub struct Composer<S: GridSource> {
    measures: Vec<Measure<S>>,
}

#[bon]
impl<S: GridSource> Composer<S> {
    /// Creates a composer for the given variable identifiers.
    ///
    /// # Arguments
    ///
    /// * `variables` - Identifiers such as `"temp_max"` or `"rainfall"`. Repeated
    ///   identifiers are collapsed; the first occurrence keeps its position.
    /// * `source` - The grid source every measure reads from.
    ///
    /// # Errors
    ///
    /// Returns [`ClimGridError::InvalidConfiguration`] if any identifier is not a
    /// known [`ClimateVariable`]. No measure is created and nothing is fetched.
    ///
    /// # Example
    ///
    /// ```
    /// use climgrid::{ClimGridError, Composer, OpendapSource};
    ///
    /// let composer = Composer::new(["temp_max", "rainfall"], OpendapSource::default())?;
    /// assert_eq!(composer.variables().len(), 2);
    ///
    /// let err = Composer::new(["wind_speed"], OpendapSource::default()).err();
    /// assert!(matches!(err, Some(ClimGridError::InvalidConfiguration(_))));
    /// # Ok::<(), ClimGridError>(())
    /// ```
    pub fn new<I>(variables: I, source: S) -> Result<Self, ClimGridError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::with_shared_source(variables, Arc::new(source))
    }

    /// Same as [`Composer::new`], for a source already shared elsewhere.
    pub fn with_shared_source<I>(variables: I, source: Arc<S>) -> Result<Self, ClimGridError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let parsed = variables
            .into_iter()
            .map(|id| id.as_ref().parse::<ClimateVariable>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(ClimGridError::InvalidConfiguration)?;

        let mut distinct: Vec<ClimateVariable> = Vec::with_capacity(parsed.len());
        for variable in parsed {
            if !distinct.contains(&variable) {
                distinct.push(variable);
            }
        }

        let measures = distinct
            .into_iter()
            .map(|variable| Measure::new(variable, Arc::clone(&source)))
            .collect();
        Ok(Self { measures })
    }

    /// The variables this composer reports, in column order.
    pub fn variables(&self) -> Vec<ClimateVariable> {
        self.measures.iter().map(Measure::variable).collect()
    }

    /// Builds the report for one temporal selection over a bounding box.
    ///
    /// This method starts a builder. Provide:
    /// *   `.latitudes(Interval<f64>)`: **Required.** Signed southern latitudes, `lo < hi`.
    /// *   `.longitudes(Interval<f64>)`: **Required.** Eastern longitudes, `lo < hi`.
    /// *   `.statistic(Statistic)`: Optional. Reduction along time, defaults to [`Statistic::Mean`].
    ///
    /// then `.call()`.
    ///
    /// # Returns
    ///
    /// A [`Report`] with an optional label column (see [`Selection::label_field`]),
    /// `lat` and `lon` columns and one column per variable. Rows run label
    /// slowest, then latitude (equator first), then longitude.
    ///
    /// # Errors
    ///
    /// *   [`ClimGridError::InvalidParameters`] if the selection or either range is
    ///     invalid, or no variable was requested. Raised before any fetch.
    /// *   [`ClimGridError::DataFetch`] if any remote read fails.
    /// *   [`ClimGridError::Report`] if a reduced column does not line up with the
    ///     label x lat x lon skeleton.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use climgrid::{Composer, Interval, OpendapSource, Selection, Statistic};
    ///
    /// let composer = Composer::new(["temp_max", "temp_min"], OpendapSource::default())?;
    /// let report = composer
    ///     .report(&Selection::years_one_month(Interval::new(2000, 2004), 1))
    ///     .latitudes(Interval::new(-27.6, -27.4))
    ///     .longitudes(Interval::new(152.9, 153.1))
    ///     .statistic(Statistic::Max)
    ///     .call()?;
    /// report.write_csv(std::path::Path::new("january_highs.csv"))?;
    /// # Ok::<(), climgrid::ClimGridError>(())
    /// ```
    #[builder(start_fn = report)]
    #[doc(hidden)]
    pub fn build_report(
        &self,
        #[builder(start_fn)] selection: &Selection,
        latitudes: Interval<f64>,
        longitudes: Interval<f64>,
        statistic: Option<Statistic>,
    ) -> Result<Report, ClimGridError> {
        let operation = format!("process_{}", selection.operation_name());
        if self.measures.is_empty()
            || !selection.is_valid()
            || validate_area(&latitudes, &longitudes).is_err()
        {
            return Err(ClimGridError::invalid_parameters(operation));
        }
        let statistic = statistic.unwrap_or_default();

        let labels = selection.labels();
        let lat_values = range_to_axis_vector(&latitudes, &LATITUDE);
        let lon_values = range_to_axis_vector(&longitudes, &LONGITUDE);
        let cells = lat_values.len() * lon_values.len();
        let rows = labels.len() * cells;
        info!(
            "{}: {} labels x {} lat x {} lon for {:?} ({})",
            operation,
            labels.len(),
            lat_values.len(),
            lon_values.len(),
            self.variables(),
            statistic
        );

        let mut report = Report::new();
        if let Some(field) = selection.label_field() {
            let label_column = labels
                .iter()
                .flat_map(|label| iter::repeat_n(label.to_string(), cells))
                .collect();
            report.push_column(field, ReportColumn::Text(label_column))?;
        }
        let lat_column = iter::repeat_n(&lat_values, labels.len())
            .flat_map(|lats| lats.iter().flat_map(|lat| iter::repeat_n(*lat, lon_values.len())))
            .collect();
        report.push_column("lat", ReportColumn::Numeric(lat_column))?;
        let lon_column = iter::repeat_n(&lon_values, labels.len() * lat_values.len())
            .flat_map(|lons| lons.iter().copied())
            .collect();
        report.push_column("lon", ReportColumn::Numeric(lon_column))?;

        for measure in &self.measures {
            let values = measure.reduce_labels(&labels, &latitudes, &longitudes, statistic)?;
            if values.len() != rows {
                return Err(ReportError::ColumnLength {
                    column: measure.column_name().to_string(),
                    expected: rows,
                    found: values.len(),
                }
                .into());
            }
            report.push_column(measure.column_name(), ReportColumn::Numeric(values))?;
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::coordinate::date_to_index;
    use crate::test_utils::{date, FixtureSource};
    use crate::types::traits::types::Month;
    use std::error::Error;

    fn area() -> (Interval<f64>, Interval<f64>) {
        (Interval::new(-27.02, -27.0), Interval::new(153.0, 153.01))
    }

    fn composer(variables: &[&str]) -> Result<(Composer<FixtureSource>, Arc<FixtureSource>), ClimGridError> {
        let source = Arc::new(FixtureSource::default());
        Ok((Composer::with_shared_source(variables, Arc::clone(&source))?, source))
    }

    #[test]
    fn test_unknown_variable_fails_before_any_measure() {
        let source = Arc::new(FixtureSource::default());
        let result = Composer::with_shared_source(["temp_max", "wind_speed"], Arc::clone(&source));
        let err = result.err().unwrap();
        assert!(matches!(err, ClimGridError::InvalidConfiguration(_)));
        assert!(err.is_input_error());
        assert_eq!(source.opened(), 0);
    }

    #[test]
    fn test_duplicate_variables_are_collapsed() -> Result<(), ClimGridError> {
        let (composer, _) = composer(&["rainfall", "temp_max", "rainfall"])?;
        assert_eq!(
            composer.variables(),
            vec![ClimateVariable::Rainfall, ClimateVariable::TempMax]
        );
        Ok(())
    }

    #[test]
    fn test_years_all_months_shape() -> Result<(), Box<dyn Error>> {
        let (composer, source) = composer(&["temp_max", "temp_min"])?;
        let (lat, lon) = area();
        let report = composer
            .report(&Selection::years_all_months(Interval::new(1990, 1991)))
            .latitudes(lat)
            .longitudes(lon)
            .call()?;

        // 2 years x 12 months, 4 latitudes (+2 padding), 2 longitudes.
        let rows = 2 * 12 * 4 * 2;
        assert_eq!(
            report.field_names(),
            ["year-month", "lat", "lon", "TempMax", "TempMin"]
        );
        assert_eq!(report.num_rows(), rows);
        assert!(report.columns().iter().all(|c| c.len() == rows));
        assert_eq!(source.opened(), 2);
        assert_eq!(source.requests().len(), 2 * 24);

        // Fixture cells hold their day offset, so January's mean is its 16th day.
        let mid_january = date_to_index(date(1990, 1, 16)).ok_or("no index")? as f64;
        assert_eq!(
            report.row(0),
            Some(vec![
                "1990-01".to_string(),
                "-27".into(),
                "153".into(),
                mid_january.to_string(),
                mid_january.to_string(),
            ])
        );
        assert_eq!(report.row(rows - 1).map(|r| r[0].clone()).as_deref(), Some("1991-12"));
        Ok(())
    }

    #[test]
    fn test_row_order_is_label_then_lat_then_lon() -> Result<(), Box<dyn Error>> {
        let (composer, _) = composer(&["solar_radiation"])?;
        let (lat, lon) = area();
        let report = composer
            .report(&Selection::one_year_all_quarters(1995))
            .latitudes(lat)
            .longitudes(lon)
            .call()?;

        let cells = 4 * 2;
        assert_eq!(report.num_rows(), 4 * cells);
        let Some(ReportColumn::Text(labels)) = report.column("year-quarter") else {
            return Err("missing label column".into());
        };
        let Some(ReportColumn::Numeric(lats)) = report.column("lat") else {
            return Err("missing lat column".into());
        };
        let Some(ReportColumn::Numeric(lons)) = report.column("lon") else {
            return Err("missing lon column".into());
        };

        assert!(labels[..cells].iter().all(|l| l == "1995-q1"));
        assert!(labels[cells..2 * cells].iter().all(|l| l == "1995-q2"));
        assert_eq!(labels.last().map(String::as_str), Some("1995-q4"));

        assert_eq!(&lats[..4], &[-27.0, -27.0, lats[2], lats[2]]);
        assert!(lats[2] < -27.0);
        assert_eq!(lats[cells..cells + 2], lats[..2]);
        assert_eq!(&lons[..4], &[153.0, 153.01, 153.0, 153.01]);
        Ok(())
    }

    #[test]
    fn test_single_month_has_no_label_column() -> Result<(), Box<dyn Error>> {
        let (composer, _) = composer(&["vapour_pressure"])?;
        let (lat, lon) = area();
        let report = composer
            .report(&Selection::one_year_one_month(2000, 2))
            .latitudes(lat)
            .longitudes(lon)
            .statistic(Statistic::Max)
            .call()?;
        assert_eq!(report.field_names(), ["lat", "lon", "VapourPressure"]);

        let last_day = date_to_index(date(2000, 2, 29)).ok_or("no index")? as f64;
        assert_eq!(
            report.column("VapourPressure"),
            Some(&ReportColumn::Numeric(vec![last_day; 8]))
        );
        Ok(())
    }

    #[test]
    fn test_fromto_and_days_labels() -> Result<(), Box<dyn Error>> {
        let (composer, _) = composer(&["rainfall"])?;
        let (lat, lon) = area();
        let report = composer
            .report(&Selection::fromto(Month(1990, 11), Month(1991, 2)))
            .latitudes(lat)
            .longitudes(lon)
            .call()?;
        assert_eq!(report.num_rows(), 4 * 8);
        assert_eq!(report.row(8).map(|r| r[0].clone()).as_deref(), Some("1990-12"));

        let report = composer
            .report(&Selection::days(Interval::new(date(1990, 1, 30), date(1990, 2, 2))))
            .latitudes(lat)
            .longitudes(lon)
            .call()?;
        assert_eq!(report.field_names()[0], "date");
        assert_eq!(report.num_rows(), 4 * 8);
        assert_eq!(report.row(31).map(|r| r[0].clone()).as_deref(), Some("1990-02-02"));
        Ok(())
    }

    #[test]
    fn test_invalid_parameters_fail_before_fetching() -> Result<(), ClimGridError> {
        let (composer, source) = composer(&["temp_max"])?;
        let (lat, lon) = area();

        let err = composer
            .report(&Selection::years_one_month(Interval::new(2010, 2005), 1))
            .latitudes(lat)
            .longitudes(lon)
            .call()
            .unwrap_err();
        assert_eq!(err.to_string(), "process_years_one_month: Invalid parameters");

        let err = composer
            .report(&Selection::one_year(1990))
            .latitudes(Interval::new(-9.0, -43.0))
            .longitudes(lon)
            .call()
            .unwrap_err();
        assert!(matches!(err, ClimGridError::InvalidParameters { .. }));

        let (empty, _) = self::composer(&[])?;
        assert!(empty
            .report(&Selection::one_year(1990))
            .latitudes(lat)
            .longitudes(lon)
            .call()
            .is_err());

        assert_eq!(source.opened(), 0);
        assert!(source.requests().is_empty());
        Ok(())
    }

    #[test]
    fn test_report_at_southern_grid_edge() -> Result<(), Box<dyn Error>> {
        let (composer, _) = composer(&["temp_max"])?;
        let lat = Interval::new(-43.735, -43.70);
        let lon = Interval::new(150.0, 150.02);
        let report = composer
            .report(&Selection::one_year_one_month(1990, 1))
            .latitudes(lat)
            .longitudes(lon)
            .call()?;

        let lat_len = range_to_axis_vector(&lat, &LATITUDE).len();
        let lon_len = range_to_axis_vector(&lon, &LONGITUDE).len();
        assert_eq!(report.num_rows(), lat_len * lon_len);
        let Some(ReportColumn::Numeric(values)) = report.column("TempMax") else {
            return Err("missing value column".into());
        };
        assert_eq!(values.len(), report.num_rows());
        assert!(values[..lon_len].iter().all(|v| v.is_finite()));
        assert!(values[values.len() - lon_len..].iter().all(|v| v.is_nan()));
        Ok(())
    }

    #[test]
    fn test_report_at_eastern_grid_edge() -> Result<(), Box<dyn Error>> {
        let (composer, _) = composer(&["rainfall"])?;
        let lat = Interval::new(-27.02, -27.0);
        let lon = Interval::new(153.9, 153.995);
        let report = composer
            .report(&Selection::one_year(1990))
            .latitudes(lat)
            .longitudes(lon)
            .call()?;
        assert_eq!(
            report.num_rows(),
            range_to_axis_vector(&lat, &LATITUDE).len() * range_to_axis_vector(&lon, &LONGITUDE).len()
        );
        assert!(report.columns().iter().all(|c| c.len() == report.num_rows()));
        Ok(())
    }

    #[test]
    fn test_fetch_failure_aborts_the_report() -> Result<(), ClimGridError> {
        let composer = Composer::new(["temp_max"], FixtureSource::failing())?;
        let (lat, lon) = area();
        let err = composer
            .report(&Selection::one_year(1990))
            .latitudes(lat)
            .longitudes(lon)
            .call()
            .unwrap_err();
        assert!(matches!(err, ClimGridError::DataFetch(_)));
        Ok(())
    }

    #[test]
    fn test_misaligned_block_is_rejected() -> Result<(), ClimGridError> {
        let composer = Composer::new(["temp_max"], FixtureSource::short_latitude(1))?;
        let (lat, lon) = area();
        let err = composer
            .report(&Selection::one_year(1990))
            .latitudes(lat)
            .longitudes(lon)
            .call()
            .unwrap_err();
        assert!(matches!(
            err,
            ClimGridError::Report(ReportError::ColumnLength { expected: 8, found: 6, .. })
        ));
        Ok(())
    }
}
