use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reduction applied along the time axis of a fetched block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    #[default]
    Mean,
    Min,
    Max,
}

impl Statistic {
    /// Reduces a `time x lat x lon` block to a `lat x lon` grid.
    ///
    /// `Mean` averages every sample, fill values included. `Min` and `Max` skip
    /// samples equal to `fill_value` and non-finite samples; a cell without any
    /// valid sample reduces to NaN. An empty time axis reduces to NaN everywhere.
    pub fn reduce(&self, values: &Array3<f64>, fill_value: Option<f64>) -> Array2<f64> {
        let (_, rows, cols) = values.dim();
        match self {
            Statistic::Mean => values
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array2::from_elem((rows, cols), f64::NAN)),
            Statistic::Min => masked_fold(values, fill_value, f64::min),
            Statistic::Max => masked_fold(values, fill_value, f64::max),
        }
    }
}

fn masked_fold(
    values: &Array3<f64>,
    fill_value: Option<f64>,
    pick: fn(f64, f64) -> f64,
) -> Array2<f64> {
    values.fold_axis(Axis(0), f64::NAN, |&acc, &x| {
        let masked = !x.is_finite() || fill_value.is_some_and(|fill| x == fill);
        if masked {
            acc
        } else if acc.is_nan() {
            x
        } else {
            pick(acc, x)
        }
    })
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Statistic::Mean => "mean",
            Statistic::Min => "min",
            Statistic::Max => "max",
        };
        write!(f, "{}", name)
    }
}
