//! Statistical helpers for Kohs session analytics.
//!
//! - [`descriptive`]: Descriptive statistics (min, max, mean, median) of a dataset
//!
//! # Examples
//!
//! ```
//! use kohs_stats::descriptive::DescriptiveStats;
//!
//! let times = [42.0, 18.5, 30.0];
//! let stats = DescriptiveStats::new(times).unwrap();
//! assert_eq!(stats.min, 18.5);
//! assert_eq!(stats.median, 30.0);
//! ```

pub mod descriptive;
