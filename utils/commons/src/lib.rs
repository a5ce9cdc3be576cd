//! Structs and types shared between the land auction and land registry
//! contracts.
#![cfg_attr(not(feature = "std"), no_std)]

pub use crate::{constants::*, errors::*, registry::*, roles::*, types::*};

#[cfg(feature = "std")]
pub mod test;

mod constants;
mod errors;
mod registry;
mod roles;
mod types;
