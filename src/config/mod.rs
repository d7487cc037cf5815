// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for cklint.
//!
//! This module handles loading, parsing, and merging configuration from
//! the user and project configuration files. Rules only ever read it.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{
    find_config_file, find_config_file_from, load_config, merge_configs, parse_config,
};
pub use schema::*;
