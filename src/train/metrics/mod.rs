//! Evaluation metrics

mod classification;
mod regression;
mod trait_def;

pub use classification::{Accuracy, ArgmaxAccuracy};
pub use regression::{R2Score, RMSE};
pub use trait_def::Metric;
