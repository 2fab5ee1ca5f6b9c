//! Defines the closed catalog of climate variables served by the ANUClimate
//! THREDDS server and the descriptor used to open each one remotely.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ANUCLIMATE_BASE_URL: &str =
    "http://dapds00.nci.org.au/thredds/dodsC/rr9/eMAST_data/ANUClimate";

/// A daily gridded climate variable of the ANUClimate 0.01 degree dataset (1970-2014).
///
/// Each variant is backed by one remote dataset. Use [`ClimateVariable::descriptor`]
/// to get the dataset URL, the variable name inside that dataset and the column
/// header it gets in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateVariable {
    /// Daily maximum air temperature, degrees Celsius.
    TempMax,
    /// Daily minimum air temperature, degrees Celsius.
    TempMin,
    /// Daily precipitation, millimetres.
    Rainfall,
    /// Daily vapour pressure, hectopascals.
    VapourPressure,
    /// Daily incoming solar radiation, MJ per square metre.
    SolarRadiation,
}

/// Where and under which name a [`ClimateVariable`] lives remotely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableDescriptor {
    /// File name of the dataset under the catalog root.
    pub dataset: &'static str,
    /// OPeNDAP dataset URL on the default server.
    pub remote_url: String,
    /// Name of the gridded variable inside the dataset.
    pub remote_variable: &'static str,
    /// Header of this variable's column in a report.
    pub column_name: &'static str,
}

/// Returned when a variable identifier is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown climate variable '{0}'")]
pub struct UnknownVariable(pub String);

impl ClimateVariable {
    /// Every catalog entry, in catalog order.
    pub const ALL: [ClimateVariable; 5] = [
        ClimateVariable::TempMax,
        ClimateVariable::TempMin,
        ClimateVariable::Rainfall,
        ClimateVariable::VapourPressure,
        ClimateVariable::SolarRadiation,
    ];

    /// The identifier accepted in requests, e.g. `"temp_max"`.
    pub fn identifier(&self) -> &'static str {
        match self {
            ClimateVariable::TempMax => "temp_max",
            ClimateVariable::TempMin => "temp_min",
            ClimateVariable::Rainfall => "rainfall",
            ClimateVariable::VapourPressure => "vapour_pressure",
            ClimateVariable::SolarRadiation => "solar_radiation",
        }
    }

    fn dataset_name(&self) -> &'static str {
        match self {
            ClimateVariable::TempMax => "ANUClimate_v1-1_temperature-max_daily_0-01deg_1970-2014",
            ClimateVariable::TempMin => "ANUClimate_v1-1_temperature-min_daily_0-01deg_1970-2014",
            ClimateVariable::Rainfall => "ANUClimate_v1-0_rainfall_daily_0-01deg_1970-2014",
            ClimateVariable::VapourPressure => {
                "ANUClimate_v1-1_vapour-pressure_daily_0-01deg_1970-2014"
            }
            ClimateVariable::SolarRadiation => {
                "ANUClimate_v1-1_solar-radiation_daily_0-01deg_1970-2014"
            }
        }
    }

    /// The fixed remote descriptor of this variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use climgrid::ClimateVariable;
    ///
    /// let descriptor = ClimateVariable::Rainfall.descriptor();
    /// assert_eq!(descriptor.remote_variable, "lwe_thickness_of_precipitation_amount");
    /// assert_eq!(descriptor.column_name, "Rainfall");
    /// ```
    pub fn descriptor(&self) -> VariableDescriptor {
        let (remote_variable, column_name) = match self {
            ClimateVariable::TempMax => ("air_temperature", "TempMax"),
            ClimateVariable::TempMin => ("air_temperature", "TempMin"),
            ClimateVariable::Rainfall => ("lwe_thickness_of_precipitation_amount", "Rainfall"),
            ClimateVariable::VapourPressure => ("vapour_pressure", "VapourPressure"),
            ClimateVariable::SolarRadiation => ("solar_radiation", "SolarRadiation"),
        };
        VariableDescriptor {
            dataset: self.dataset_name(),
            remote_url: format!("{}/{}", ANUCLIMATE_BASE_URL, self.dataset_name()),
            remote_variable,
            column_name,
        }
    }
}

impl FromStr for ClimateVariable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClimateVariable::ALL
            .into_iter()
            .find(|variable| variable.identifier() == s)
            .ok_or_else(|| UnknownVariable(s.to_string()))
    }
}

/// Formats a variable as its request identifier.
///
/// # Examples
///
/// ```
/// use climgrid::ClimateVariable;
///
/// assert_eq!(ClimateVariable::VapourPressure.to_string(), "vapour_pressure");
/// ```
impl fmt::Display for ClimateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
