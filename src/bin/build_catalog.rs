//! Regenerate database.json from the Ghibli works gallery pages.

use anyhow::Result;
use ghibliscape::scrape::{collect_all_images, write_catalog};
use std::path::PathBuf;

fn main() -> Result<()> {
    let _ = ghibliscape::config::setup_logging(false);

    let records = collect_all_images();
    if records.is_empty() {
        anyhow::bail!("No images found. The works page layout may have changed.");
    }

    let output_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("database.json");
    let record_count = records.len();
    write_catalog(&output_path, &records)?;

    println!("Wrote {} ({} images).", output_path.display(), record_count);
    Ok(())
}
