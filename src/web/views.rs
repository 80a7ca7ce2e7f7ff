use askama::Template;
use askama_web::WebTemplate;

use crate::catalog::ImageRecord;

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) image_count: usize,
    pub(crate) film_count: usize,
    pub(crate) film_codes: Vec<String>,
    pub(crate) random_image: Option<ImageRecord>,
    pub(crate) sample_images: Vec<ImageRecord>,
}

#[derive(Template, WebTemplate)]
#[template(path = "api.html")]
pub(crate) struct ApiDocsTemplate {
    pub(crate) api_version: &'static str,
    pub(crate) image_count: usize,
    pub(crate) film_count: usize,
}
