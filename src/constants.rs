//! Shared constants for things
//!

/// Version reported on the API documentation page.
pub const API_VERSION: &str = "1.0.0";

/// Default catalog file, relative to the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "database.json";

/// How many sample images the home page shows.
pub const SAMPLE_IMAGE_COUNT: usize = 9;
