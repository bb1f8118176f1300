use std::io::Read;
use std::time::Duration;

use serde::Deserialize;

use super::descriptor::{Attribution, ImageDescriptor, ImageFormat};
use super::{FetchError, PAIR_COUNT, PhotoSearch};

const USER_AGENT: &str = concat!("photo-pairs/", env!("CARGO_PKG_VERSION"));
const MAX_THUMBNAIL_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    width: u32,
    height: u32,
    urls: PhotoUrls,
    #[serde(default)]
    user: Option<Photographer>,
}

#[derive(Deserialize)]
struct PhotoUrls {
    small: String,
}

#[derive(Deserialize)]
struct Photographer {
    name: Option<String>,
    links: Option<PhotographerLinks>,
}

#[derive(Deserialize)]
struct PhotographerLinks {
    html: Option<String>,
}

impl SearchResult {
    fn into_descriptor(self) -> ImageDescriptor {
        let attribution = self.user.and_then(|user| {
            let link = user.links.and_then(|links| links.html)?;
            Some(Attribution {
                name: user.name?,
                link,
            })
        });
        ImageDescriptor {
            url: self.urls.small,
            format: ImageFormat::from_dimensions(self.width, self.height),
            attribution,
        }
    }
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => FetchError::Status(code),
            ureq::Error::Transport(transport) => FetchError::Transport(transport.to_string()),
        }
    }
}

pub fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Decodes a search response body into descriptors, keeping the api order.
pub fn parse_search_body(body: &str) -> Result<Vec<ImageDescriptor>, FetchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|err| FetchError::Malformed(err.to_string()))?;
    Ok(response.results.into_iter().map(SearchResult::into_descriptor).collect())
}

pub struct UnsplashSearch {
    agent: ureq::Agent,
    endpoint: String,
    access_key: String,
}

impl UnsplashSearch {
    pub fn new(endpoint: &str, access_key: &str, timeout: Duration) -> Self {
        UnsplashSearch {
            agent: http_agent(timeout),
            endpoint: endpoint.to_string(),
            access_key: access_key.to_string(),
        }
    }
}

impl PhotoSearch for UnsplashSearch {
    fn search(&self, theme: &str) -> Result<Vec<ImageDescriptor>, FetchError> {
        log::debug!("searching {} for \"{}\"", self.endpoint, theme);
        let response = self
            .agent
            .get(&self.endpoint)
            .query("page", "1")
            .query("per_page", &PAIR_COUNT.to_string())
            .query("query", theme)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Client-ID {}", self.access_key))
            .call()?;
        let body = response
            .into_string()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        parse_search_body(&body)
    }
}

/// Downloads one thumbnail; called from a worker thread.
pub fn fetch_thumbnail(agent: &ureq::Agent, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = agent.get(url).call()?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_THUMBNAIL_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|err| FetchError::Transport(err.to_string()))?;
    Ok(bytes)
}
