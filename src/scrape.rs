//! Building the image catalog from the Ghibli works gallery pages.
//!
//! Each film has a works page whose still thumbnails carry an alt text of
//! `<film_code><number>`; the full-size image lives under the gallery path
//! with the same name. The server never calls into this module; it only
//! consumes the `database.json` the builder writes.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use crate::catalog::ImageRecord;
use crate::selector;

/// Base page listing each film's stills.
const WORKS_BASE_URL: &str = "https://www.ghibli.jp/works/";

/// Where the full-size gallery images live.
const GALLERY_BASE_URL: &str = "https://www.ghibli.jp/gallery/";

/// Film codes used by the Ghibli works site.
pub const FILM_CODES: [&str; 27] = [
    "kimitachi",
    "aya",
    "red",
    "marnie",
    "kaguyahime",
    "kazetachinu",
    "kokurikozaka",
    "karigurashi",
    "ponyo",
    "ged",
    "howl",
    "baron",
    "ghiblies",
    "chihiro",
    "yamada",
    "mononoke",
    "mimi",
    "onmark",
    "tanuki",
    "umi",
    "porco",
    "omoide",
    "majo",
    "totoro",
    "hotaru",
    "laputa",
    "nausicaa",
];

/// Stable id for an image URL: the leading 16 hex chars of its digest.
pub fn image_id(url: &str) -> String {
    let digest = selector::query_digest(url);
    digest[..16].to_string()
}

/// Fetches the works page for one film.
pub fn fetch_film_page(film_code: &str) -> Result<String> {
    let url = format!("{}{}/", WORKS_BASE_URL, film_code);
    let body = ureq::get(url.as_str())
        .call()
        .with_context(|| format!("fetching {}", url))?
        .body_mut()
        .read_to_string()
        .with_context(|| format!("reading {}", url))?;
    Ok(body)
}

/// Extracts gallery image records for a film from its works page markup.
pub fn parse_gallery_images(film_code: &str, html: &str) -> Result<Vec<ImageRecord>> {
    let pattern = Regex::new(&format!(r#"alt="{}(\d+)""#, regex::escape(film_code)))?;

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for capture in pattern.captures_iter(html) {
        let Some(number) = capture.get(1) else {
            continue;
        };
        let number = number.as_str();
        if !seen.insert(number.to_string()) {
            continue;
        }
        let url = format!("{}{}{}.jpg", GALLERY_BASE_URL, film_code, number);
        records.push(ImageRecord {
            id: image_id(&url),
            url,
            film_code: film_code.to_string(),
            film_name: film_code.to_string(),
            image_number: number.to_string(),
        });
    }
    Ok(records)
}

/// Scrapes every known film and assembles the full record list.
///
/// Films that fail to fetch or parse are skipped with a warning.
pub fn collect_all_images() -> Vec<ImageRecord> {
    let mut records = Vec::new();
    for film_code in FILM_CODES {
        let html = match fetch_film_page(film_code) {
            Ok(html) => html,
            Err(err) => {
                warn!("Skipping film {}: {}", film_code, err);
                continue;
            }
        };
        match parse_gallery_images(film_code, &html) {
            Ok(mut film_records) => {
                info!("Found {} images for {}", film_records.len(), film_code);
                records.append(&mut film_records);
            }
            Err(err) => warn!("Skipping film {}: {}", film_code, err),
        }
        // be nice to the server
        std::thread::sleep(Duration::from_secs(1));
    }
    records
}

/// Writes the catalog JSON file the server loads at startup.
pub fn write_catalog(path: &Path, records: &[ImageRecord]) -> Result<()> {
    let payload = serde_json::json!({
        "images": records,
        "film_codes": FILM_CODES,
    });
    let raw = serde_json::to_string_pretty(&payload)?;
    std::fs::write(path, raw).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
