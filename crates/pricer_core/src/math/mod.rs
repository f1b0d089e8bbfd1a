//! Numerical primitives.
//!
//! - `distributions`: standard normal CDF generic over `Float`
//! - `statistics`: mean and standard deviation of sample series

pub mod distributions;
pub mod statistics;

pub use distributions::norm_cdf;
pub use statistics::{mean, std_dev, DegreesOfFreedom};
