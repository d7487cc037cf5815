// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! Loads commits for validation and backs the repository and signature
//! verification ports.

mod repo;
mod verify;

pub use repo::Repository;
pub use verify::GitSignatureVerifier;
