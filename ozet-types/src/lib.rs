//! Shared error, configuration and capability primitives for the ozet workspace.
#![warn(missing_docs)]

mod capability;
mod config;
mod error;

pub use capability::Capability;
pub use config::OzetConfig;
pub use error::OzetError;
