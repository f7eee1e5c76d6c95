// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod bills;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod goals;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod reports;
pub mod store;
pub mod utils;

pub use engine::{aggregate_filtered, aggregate_unfiltered, query, query_raw, window};
pub use error::Error;
