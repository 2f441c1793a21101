//! Data model for in-memory datasets

mod cell;
mod dataset;

pub use cell::CellValue;
pub use dataset::{Column, Dataset, Row};
