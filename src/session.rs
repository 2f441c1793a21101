//! Caller-owned comparison session
//!
//! A `Session` must be initialized once before it hands out comparators.
//! Initialization registers the in-memory datasource the comparators read
//! from; calling it again is harmless.

use indexmap::IndexSet;

use crate::check::Comparator;
use crate::error::{Error, Result};
use crate::model::Dataset;

/// Name of the datasource registered by [`Session::initialize`]
pub const DEFAULT_DATASOURCE: &str = "in_memory_default";

#[derive(Debug, Default)]
pub struct Session {
    datasources: IndexSet<String>,
    initialized: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the default datasource, once per session
    pub fn initialize(&mut self) {
        self.initialize_with(DEFAULT_DATASOURCE);
    }

    /// Register `datasource` and mark the session initialized.
    ///
    /// Only the first call on a session has any effect.
    pub fn initialize_with(&mut self, datasource: &str) {
        if self.initialized {
            log::info!("datasource '{}' already initialized", datasource);
            return;
        }

        if self.register_datasource(datasource) {
            log::info!("datasource '{}' has been added", datasource);
        } else {
            log::info!("datasource '{}' already registered", datasource);
        }
        self.initialized = true;
    }

    /// Add a datasource name; returns false if it was already registered
    pub fn register_datasource(&mut self, name: &str) -> bool {
        self.datasources.insert(name.to_string())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn datasources(&self) -> impl Iterator<Item = &str> {
        self.datasources.iter().map(String::as_str)
    }

    /// Pair two datasets for comparison
    pub fn comparator<'a>(
        &self,
        source: &'a Dataset,
        target: &'a Dataset,
    ) -> Result<Comparator<'a>> {
        if !self.initialized {
            return Err(Error::SessionNotInitialized);
        }
        Ok(Comparator::new(source, target))
    }
}
