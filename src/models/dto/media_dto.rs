//! Wire shapes of the MediaWiki `action=query` API, trimmed to the fields we read.

use std::collections::HashMap;

use serde::Deserialize;

/// Reply to `list=search`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<SearchQuery>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

impl SearchResponse {
    /// Title of the best match, if the search found anything.
    pub fn first_title(&self) -> Option<&str> {
        self.query
            .as_ref()
            .and_then(|q| q.search.first())
            .map(|hit| hit.title.as_str())
    }
}

/// Reply to `prop=imageinfo`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImageInfoResponse {
    #[serde(default)]
    pub query: Option<ImageInfoQuery>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImageInfoQuery {
    #[serde(default)]
    pub pages: HashMap<String, ImagePage>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImagePage {
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImageInfo {
    pub thumburl: Option<String>,
    pub url: Option<String>,
}

impl ImageInfoResponse {
    /// First usable URL across the returned pages, preferring the scaled thumbnail.
    pub fn best_url(&self) -> Option<&str> {
        let pages = &self.query.as_ref()?.pages;
        pages.values().find_map(|page| {
            let info = page.imageinfo.first()?;
            info.thumburl
                .as_deref()
                .filter(|u| !u.is_empty())
                .or_else(|| info.url.as_deref().filter(|u| !u.is_empty()))
        })
    }
}
