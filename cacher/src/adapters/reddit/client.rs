//! Reddit listing client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::entities::Post;
use crate::domain::ports::FeedSource;
use crate::error::FeedError;

/// Fetches a listing such as `/r/politics/rising.json`
pub struct RedditFeedClient {
    http: Client,
    feed_url: String,
}

impl RedditFeedClient {
    pub fn new(
        feed_url: String,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, FeedError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            feed_url,
        })
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, FeedError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FeedError::Deserialization(e.to_string()))
        } else if status.as_u16() == 429 {
            Err(FeedError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FeedError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Response types from the listing API
#[derive(Deserialize)]
struct ListingResponse {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: Post,
}

#[async_trait]
impl FeedSource for RedditFeedClient {
    async fn fetch(&self) -> Result<Vec<Post>, FeedError> {
        let response = self.http.get(&self.feed_url).send().await?;
        let listing: ListingResponse = self.handle_response(response).await?;

        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .collect();
        tracing::debug!(count = posts.len(), "Fetched feed listing");

        Ok(posts)
    }
}
