// Main library file for CCD calculations

pub mod antisym;
pub mod app;
pub mod ccd_impl;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod system;
pub mod tensor;

pub use ccd_impl::{CcdOutcome, ConvergenceStatus, CCD};
pub use error::{CcdError, Result};
pub use system::CcdSystem;
pub use tensor::Tensor4;
