//! OPeNDAP access to THREDDS-hosted grids through netCDF-C.

use crate::source::error::FetchError;
use crate::source::{Block, GridHandle, GridSource, Hyperslab, IndexWindow};
use crate::types::data_source::VariableDescriptor;
use bon::bon;
use log::{debug, info, warn};
use ndarray::Array3;
use netcdf::Variable;
use std::ops::Range;

/// Attributes that may declare a variable's missing-data marker, in order of preference.
const FILL_VALUE_ATTRIBUTES: [&str; 2] = ["_FillValue", "missing_value"];

/// A [`GridSource`] that opens datasets with netCDF-C, which speaks DAP2 to
/// THREDDS servers and reads local netCDF files alike.
///
/// By default every variable is opened at its catalog URL. A `catalog_root`
/// redirects all datasets to a mirror or a directory holding local copies;
/// the dataset file name is appended to it.
///
/// Reads block the calling thread. The HTTP read timeout is netCDF-C's
/// `HTTP.TIMEOUT` setting, taken from the service's `.ncrc`.
///
/// # Example
///
/// ```no_run
/// use climgrid::{Composer, OpendapSource};
///
/// let source = OpendapSource::builder()
///     .catalog_root("/data/anuclimate")
///     .build();
/// let composer = Composer::new(&["temp_max"], source)?;
/// # Ok::<(), climgrid::ClimGridError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpendapSource {
    catalog_root: Option<String>,
}

#[bon]
impl OpendapSource {
    #[builder(finish_fn = build)]
    pub fn new(#[builder(into)] catalog_root: Option<String>) -> Self {
        Self { catalog_root }
    }

    /// Where the dataset of `descriptor` is opened from.
    pub fn location(&self, descriptor: &VariableDescriptor) -> String {
        match &self.catalog_root {
            Some(root) => format!("{}/{}", root.trim_end_matches('/'), descriptor.dataset),
            None => descriptor.remote_url.clone(),
        }
    }
}

impl GridSource for OpendapSource {
    type Handle = OpendapHandle;

    /// Opens the dataset once and reads the variable's fill value.
    fn open(&self, descriptor: &VariableDescriptor) -> Result<OpendapHandle, FetchError> {
        let url = self.location(descriptor);
        let file = netcdf::open(&url).map_err(|source| FetchError::Open {
            url: url.clone(),
            source,
        })?;

        let fill_value = {
            let variable = grid_variable(&file, &url, descriptor.remote_variable)?;
            let dimensions = variable.dimensions().len();
            if dimensions != 3 {
                return Err(FetchError::Dimensions {
                    url,
                    variable: descriptor.remote_variable.to_string(),
                    found: dimensions,
                });
            }
            fill_value(&variable)
        };
        if fill_value.is_none() {
            warn!(
                "No fill value declared for {} in {}",
                descriptor.remote_variable, url
            );
        }
        info!(
            "Opened {} at {} (fill value {:?})",
            descriptor.remote_variable, url, fill_value
        );
        Ok(OpendapHandle {
            file,
            url,
            variable: descriptor.remote_variable.to_string(),
            fill_value,
        })
    }
}

/// One opened remote variable.
pub struct OpendapHandle {
    file: netcdf::File,
    url: String,
    variable: String,
    fill_value: Option<f64>,
}

impl OpendapHandle {
    pub fn fill_value(&self) -> Option<f64> {
        self.fill_value
    }
}

impl GridHandle for OpendapHandle {
    fn read(&self, slab: &Hyperslab) -> Result<Block, FetchError> {
        if slab.is_empty() {
            return Err(FetchError::EmptySlice(slab.to_string()));
        }
        let variable = grid_variable(&self.file, &self.url, &self.variable)?;
        debug!("Reading {}{} from {}", self.variable, slab, self.url);

        let extents = [extent(slab.time), extent(slab.lat), extent(slab.lon)];
        let values = variable
            .get_values::<f64, _>(extents)
            .map_err(|source| FetchError::Read {
                url: self.url.clone(),
                variable: self.variable.clone(),
                window: slab.to_string(),
                source,
            })?;
        let found = values.len();
        let values = Array3::from_shape_vec(slab.shape(), values).map_err(|source| {
            FetchError::Shape {
                url: self.url.clone(),
                window: slab.to_string(),
                found,
                source,
            }
        })?;
        info!("Fetched {} cells of {} for {}", found, self.variable, slab);
        Ok(Block {
            values,
            fill_value: self.fill_value,
        })
    }
}

fn grid_variable<'f>(
    file: &'f netcdf::File,
    url: &str,
    name: &str,
) -> Result<Variable<'f>, FetchError> {
    file.variable(name).ok_or_else(|| FetchError::MissingVariable {
        url: url.to_string(),
        variable: name.to_string(),
    })
}

fn fill_value(variable: &Variable<'_>) -> Option<f64> {
    FILL_VALUE_ATTRIBUTES.iter().find_map(|name| {
        let value = variable.attribute_value(name)?.ok()?;
        f64::try_from(value).ok()
    })
}

// Inclusive window to netCDF's half-open extent.
fn extent(window: IndexWindow) -> Range<usize> {
    window.start..window.stop + 1
}
