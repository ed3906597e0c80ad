// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod athlete;
pub mod user;

pub use athlete::{AthleteProfile, ParentContact};
pub use user::{Role, User};
