//! Measure how long pull requests wait before someone other than their
//! author engages with them.
//!
//! The pipeline is linear: select repositories by topic, list their pull
//! requests, keep those created inside the window, resolve each one's first
//! engagement, then rank the results and report the median.

pub mod commands;
pub mod config;
pub mod engagement;
pub mod error;
pub mod github;
pub mod models;
pub mod report;
pub mod selection;
pub mod window;
