//! Test Module
//!
//! Comprehensive test suite for the CharmForge design brain.
//!
//! ## Test Categories
//! - `catalog_tests`: olog loading and every validation failure mode
//! - `design_tests`: classifier, mapper, coherence and assembler behavior
//! - `integration_tests`: end-to-end scenarios over the tool surface

pub mod catalog_tests;

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::catalog::DesignCatalog;

/// Directory of the bundled olog documents.
pub fn ologs_fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data/ologs")
}

/// The bundled catalog, loaded once and shared across tests.
pub fn test_catalog() -> Arc<DesignCatalog> {
    static CATALOG: OnceLock<Arc<DesignCatalog>> = OnceLock::new();
    CATALOG
        .get_or_init(|| {
            Arc::new(
                DesignCatalog::load(&ologs_fixture_dir()).expect("bundled ologs must load"),
            )
        })
        .clone()
}
