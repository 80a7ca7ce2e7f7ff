//! The image catalog and the lookup operations served from it.

use std::collections::HashMap;
use std::path::Path;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::error::GhibliscapeError;
use crate::selector;

/// A single landscape still in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Stable opaque identifier, unique within the catalog.
    pub id: String,
    /// Source URL of the full-size image.
    pub url: String,
    /// Code of the film the still belongs to.
    pub film_code: String,
    /// Display name of the film.
    pub film_name: String,
    /// Sequence of the still within its film.
    #[serde(deserialize_with = "string_or_number")]
    pub image_number: String,
}

/// On-disk catalog shape: the scraped stills plus the authoritative film list.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    images: Vec<ImageRecord>,
    film_codes: Vec<String>,
}

/// Immutable, ordered image catalog.
///
/// Record order is part of the deterministic-selection contract: the index a
/// query maps to is only meaningful against the ordering the catalog was
/// loaded with. Nothing mutates a catalog after construction, so a shared
/// reference is safe to hand to any number of concurrent readers.
#[derive(Clone, Debug)]
pub struct Catalog {
    images: Vec<ImageRecord>,
    film_codes: Vec<String>,
    id_index: HashMap<String, usize>,
}

impl Catalog {
    /// Loads and validates a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GhibliscapeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            GhibliscapeError::LoadFailure(format!("Failed to read {}: {}", path.display(), err))
        })?;
        let parsed: CatalogFile = serde_json::from_str(&raw).map_err(|err| {
            GhibliscapeError::LoadFailure(format!("Failed to parse {}: {}", path.display(), err))
        })?;
        Self::from_parts(parsed.images, parsed.film_codes)
    }

    /// Builds a catalog from already-deserialized parts.
    ///
    /// Validates each record and builds the id index; record order is kept
    /// exactly as given.
    pub fn from_parts(
        images: Vec<ImageRecord>,
        film_codes: Vec<String>,
    ) -> Result<Self, GhibliscapeError> {
        let mut id_index = HashMap::with_capacity(images.len());
        for (position, image) in images.iter().enumerate() {
            if Url::parse(&image.url).is_err() {
                return Err(GhibliscapeError::LoadFailure(format!(
                    "Image '{}' has an unparseable URL: {}",
                    image.id, image.url
                )));
            }
            if id_index.insert(image.id.clone(), position).is_some() {
                return Err(GhibliscapeError::LoadFailure(format!(
                    "Duplicate image id '{}'",
                    image.id
                )));
            }
        }
        Ok(Self {
            images,
            film_codes,
            id_index,
        })
    }

    /// Number of images in the catalog.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when the catalog holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// The authoritative film code list, in file order.
    ///
    /// May be a superset of the codes actually present in records.
    pub fn film_codes(&self) -> &[String] {
        &self.film_codes
    }

    /// All images, in catalog order.
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Picks one image uniformly at random.
    pub fn random_pick(&self) -> Result<&ImageRecord, GhibliscapeError> {
        self.images
            .choose(&mut rand::rng())
            .ok_or(GhibliscapeError::EmptyCatalog)
    }

    /// Picks up to `count` distinct images at random, for page sampling.
    pub fn random_sample(&self, count: usize) -> Vec<&ImageRecord> {
        self.images.sample(&mut rand::rng(), count).collect()
    }

    /// Looks up an image by its identifier.
    pub fn get_by_id(&self, id: &str) -> Result<&ImageRecord, GhibliscapeError> {
        self.id_index
            .get(id)
            .and_then(|position| self.images.get(*position))
            .ok_or_else(|| GhibliscapeError::NotFound(id.to_string()))
    }

    /// Resolves a query string to its image deterministically.
    ///
    /// Returns the record together with the digest hex the selection used, so
    /// callers can echo it back for transparency.
    pub fn get_by_query(&self, query: &str) -> Result<(&ImageRecord, String), GhibliscapeError> {
        if self.images.is_empty() {
            return Err(GhibliscapeError::EmptyCatalog);
        }
        let digest = selector::query_digest(query);
        let index = selector::select(query, self.images.len());
        let image = self.images.get(index).ok_or_else(|| {
            GhibliscapeError::InternalServerError(format!("Selected index {} out of range", index))
        })?;
        Ok((image, digest))
    }

    /// Picks a random image from a single film.
    ///
    /// The film code does not have to appear in the known film list; any code
    /// with at least one matching record is servable.
    pub fn get_by_film(&self, film_code: &str) -> Result<&ImageRecord, GhibliscapeError> {
        let members: Vec<&ImageRecord> = self
            .images
            .iter()
            .filter(|image| image.film_code == film_code)
            .collect();
        members
            .choose(&mut rand::rng())
            .copied()
            .ok_or_else(|| GhibliscapeError::FilmEmpty(film_code.to_string()))
    }
}

/// External data may carry the image number as either a JSON string or an
/// integer; normalize both to a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numberish {
        Text(String),
        Number(u64),
    }

    Ok(match Numberish::deserialize(deserializer)? {
        Numberish::Text(text) => text,
        Numberish::Number(number) => number.to_string(),
    })
}
