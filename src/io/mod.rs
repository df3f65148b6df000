//! Input/Output operations for CCD calculations
//!
//! This module handles logging setup and turning configuration into a
//! validated [`CcdSystem`](crate::system::CcdSystem).

mod output;
mod system_loader;

pub use output::{setup_output, write_summary};
pub use system_loader::{build_system, explicit_tbme};
