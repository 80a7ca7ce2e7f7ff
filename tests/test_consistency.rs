//! Consistency and variety checks over the public lookup API, covering the
//! same scenarios the site's smoke tests exercise over HTTP.

use std::collections::HashSet;

use ghibliscape::catalog::{Catalog, ImageRecord};
use ghibliscape::error::GhibliscapeError;
use ghibliscape::selector;

const TEST_QUERIES: [&str; 10] = [
    "totoro",
    "spirited away",
    "castle in the sky",
    "howl's moving castle",
    "princess mononoke",
    "nausicaa",
    "kiki's delivery service",
    "my neighbor totoro",
    "ponyo",
    "ghibli landscapes",
];

fn record(film_code: &str, number: usize) -> ImageRecord {
    ImageRecord {
        id: format!("{}-{:03}", film_code, number),
        url: format!(
            "https://www.ghibli.jp/gallery/{}{:03}.jpg",
            film_code, number
        ),
        film_code: film_code.to_string(),
        film_name: film_code.to_string(),
        image_number: format!("{:03}", number),
    }
}

fn fixture_catalog() -> Catalog {
    let mut images = Vec::new();
    for film_code in ["totoro", "ponyo", "laputa", "mononoke"] {
        for number in 1..=10 {
            images.push(record(film_code, number));
        }
    }
    let film_codes = ["totoro", "ponyo", "laputa", "mononoke"]
        .iter()
        .map(|code| code.to_string())
        .collect();
    Catalog::from_parts(images, film_codes).expect("build fixture catalog")
}

#[test]
fn every_query_resolves_identically_across_rounds() {
    let catalog = fixture_catalog();

    let first_round: Vec<String> = TEST_QUERIES
        .iter()
        .map(|query| {
            let (image, _) = catalog.get_by_query(query).expect("query");
            image.id.clone()
        })
        .collect();

    for round in 0..3 {
        for (query, expected) in TEST_QUERIES.iter().zip(&first_round) {
            let (image, _) = catalog.get_by_query(query).expect("query");
            assert_eq!(
                &image.id, expected,
                "query '{}' diverged on round {}",
                query, round
            );
        }
    }
}

#[test]
fn digests_are_echoed_independent_of_catalog_size() {
    let catalog = fixture_catalog();
    let tiny = Catalog::from_parts(
        vec![record("totoro", 1)],
        vec!["totoro".to_string()],
    )
    .expect("build catalog");

    for query in TEST_QUERIES {
        let expected = selector::query_digest(query);
        let (_, digest) = catalog.get_by_query(query).expect("query");
        let (_, tiny_digest) = tiny.get_by_query(query).expect("query");
        assert_eq!(digest, expected);
        assert_eq!(tiny_digest, expected);
    }
}

#[test]
fn random_picks_show_variety() {
    let catalog = fixture_catalog();
    let mut ids = HashSet::new();
    for _ in 0..10 {
        ids.insert(catalog.random_pick().expect("random pick").id.clone());
    }
    assert!(ids.len() > 1, "10 random picks all returned the same image");
}

#[test]
fn every_known_film_serves_an_image_of_its_own() {
    let catalog = fixture_catalog();
    for film_code in catalog.film_codes().to_vec() {
        let image = catalog.get_by_film(&film_code).expect("film pick");
        assert_eq!(image.film_code, film_code);
    }
}

#[test]
fn lookup_failures_are_typed() {
    let catalog = fixture_catalog();
    assert!(matches!(
        catalog.get_by_id("nonexistent"),
        Err(GhibliscapeError::NotFound(_))
    ));
    assert!(matches!(
        catalog.get_by_film("nonexistent"),
        Err(GhibliscapeError::FilmEmpty(_))
    ));

    let empty = Catalog::from_parts(Vec::new(), Vec::new()).expect("build empty catalog");
    assert!(matches!(
        empty.random_pick(),
        Err(GhibliscapeError::EmptyCatalog)
    ));
    assert!(matches!(
        empty.get_by_query("totoro"),
        Err(GhibliscapeError::EmptyCatalog)
    ));
}
