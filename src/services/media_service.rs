use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::{
    fs::File,
    io::{AsyncWriteExt, BufWriter},
};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::dto::media_dto::{ImageInfoResponse, SearchResponse},
};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_CHUNK_SIZE: usize = 8192;
const FILE_NAMESPACE: &str = "6";

/// Lookup and retrieval against a media index.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaSearch: Send + Sync {
    /// Title of the single best file match for `term`, or `None` if nothing matched.
    async fn search_file(&self, term: &str) -> AppResult<Option<String>>;

    /// Download URL for a file title, thumbnail first.
    async fn resolve_image_url(&self, file_title: &str) -> AppResult<Option<String>>;

    /// Streams `url` into `destination` and returns the number of bytes written.
    async fn download(&self, url: &str, destination: &Path) -> AppResult<u64>;
}

/// Wikimedia Commons over the MediaWiki query API.
pub struct WikimediaClient {
    client: reqwest::Client,
    api_url: String,
    thumbnail_width: u32,
}

impl WikimediaClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.media_user_agent())
            .build()?;

        Ok(Self {
            client,
            api_url: config.media_api_url.clone(),
            thumbnail_width: config.thumbnail_width,
        })
    }

    async fn query<T: serde::de::DeserializeOwned>(&self, params: &[(&str, &str)]) -> AppResult<T> {
        let response = self
            .client
            .get(&self.api_url)
            .query(params)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        response.json::<T>().await.map_err(|e| {
            AppError::MalformedResponse(format!("Unexpected media API reply: {}", e))
        })
    }
}

#[async_trait]
impl MediaSearch for WikimediaClient {
    async fn search_file(&self, term: &str) -> AppResult<Option<String>> {
        let reply: SearchResponse = self
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", term),
                ("srnamespace", FILE_NAMESPACE),
                ("srlimit", "1"),
            ])
            .await?;

        Ok(reply.first_title().map(str::to_string))
    }

    async fn resolve_image_url(&self, file_title: &str) -> AppResult<Option<String>> {
        let width = self.thumbnail_width.to_string();
        let reply: ImageInfoResponse = self
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("titles", file_title),
                ("prop", "imageinfo"),
                ("iiprop", "url|size"),
                ("iiurlwidth", width.as_str()),
            ])
            .await?;

        Ok(reply.best_url().map(str::to_string))
    }

    async fn download(&self, url: &str, destination: &Path) -> AppResult<u64> {
        let response = self
            .client
            .get(url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let file = File::create(destination).await?;
        let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);

        match stream_to_file(response, &mut writer).await {
            Ok(written) => Ok(written),
            Err(err) => {
                drop(writer);
                // A truncated file would look like a finished download on the next run.
                if let Err(e) = tokio::fs::remove_file(destination).await {
                    log::warn!(
                        "Failed to remove partial download {}: {}",
                        destination.display(),
                        e
                    );
                }
                Err(err)
            }
        }
    }
}

async fn stream_to_file(response: reqwest::Response, writer: &mut BufWriter<File>) -> AppResult<u64> {
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;
    writer.get_mut().sync_all().await?;
    Ok(written)
}
