// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit value object.

mod message;

pub use message::{clean_message_file, Commit};
