//! HTTP client for the small talk backend.
//!
//! [`AdminApi`] is the seam the coordinator talks to; [`HttpClient`] is the
//! `reqwest` implementation. Every operation maps to exactly one request,
//! except [`AdminApi::list_small_talks`] which joins the page and count
//! requests.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{
    ACCEPT, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    Answer, AnswerUpdate, BotStatus, Confirmation, CountBody, NewAnswer, NewSmallTalk, SmallTalk,
    SmallTalkPatch, TalkListBody, TalkPage,
};

#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Fetches one filtered page and the total under the same filter.
    /// Fails as a whole if either request fails.
    async fn list_small_talks(
        &self,
        tag: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> Result<TalkPage, ApiError>;

    async fn list_answers(&self, talk_id: i64) -> Result<Vec<Answer>, ApiError>;

    async fn create_small_talk(&self, talk: &NewSmallTalk) -> Result<SmallTalk, ApiError>;

    async fn update_small_talk(
        &self,
        talk_id: i64,
        patch: &SmallTalkPatch,
    ) -> Result<SmallTalk, ApiError>;

    async fn delete_small_talk(&self, talk_id: i64) -> Result<Confirmation, ApiError>;

    async fn create_answer(&self, answer: &NewAnswer) -> Result<Answer, ApiError>;

    async fn update_answer(
        &self,
        answer_id: i64,
        answer: &AnswerUpdate,
    ) -> Result<Answer, ApiError>;

    async fn delete_answer(&self, answer_id: i64) -> Result<Confirmation, ApiError>;

    async fn bot_status(&self) -> Result<BotStatus, ApiError>;

    /// `POST /bot/start` when `running`, `POST /bot/stop` otherwise.
    async fn set_bot_running(&self, running: bool) -> Result<BotStatus, ApiError>;

    async fn send_now(&self) -> Result<Confirmation, ApiError>;
}

/// `reqwest`-backed [`AdminApi`].
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder().default_headers(default_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}{}", method, self.base_url, path);
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        read_json(response).await
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(method, path).json(body).send().await?;
        read_json(response).await
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<Response, ApiError> {
        Ok(self.request(method, path).send().await?)
    }
}

/// JSON content negotiation plus the permissive CORS set the backend expects.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, PATCH, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Origin, X-Requested-With, Content-Type, Accept"),
    );
    headers
}

/// Reads the body once; non-2xx becomes `ApiError::Http` carrying the body text.
async fn read_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("{} returned HTTP {}: {}", url, status.as_u16(), body);
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = read_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Acknowledgement bodies vary (`{"message": ...}`, `{}`, nothing at all).
async fn read_confirmation(response: Response) -> Result<Confirmation, ApiError> {
    let body = read_body(response).await?;
    if body.trim().is_empty() {
        return Ok(Confirmation::default());
    }
    let value: serde_json::Value = serde_json::from_str(&body)?;
    Ok(Confirmation {
        message: value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
    })
}

/// Blank tags mean "no filter".
fn normalize_tag(tag: Option<&str>) -> Option<&str> {
    tag.map(str::trim).filter(|t| !t.is_empty())
}

#[async_trait]
impl AdminApi for HttpClient {
    async fn list_small_talks(
        &self,
        tag: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> Result<TalkPage, ApiError> {
        let tag = normalize_tag(tag);

        let mut page_query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        let mut count_query = Vec::new();
        if let Some(tag) = tag {
            page_query.push(("tag", tag.to_string()));
            count_query.push(("tag", tag.to_string()));
        }

        let joined = futures::future::try_join(
            self.get_json::<TalkListBody>("/small-talk", &page_query),
            self.get_json::<CountBody>("/small-talk/count", &count_query),
        )
        .await;

        match joined {
            Ok((body, count)) => {
                let items = body.into_items();
                debug!(
                    "Small talk page: tag={:?} offset={} items={} total={}",
                    tag,
                    offset,
                    items.len(),
                    count.total
                );
                Ok(TalkPage {
                    items,
                    total: count.total,
                })
            }
            Err(e) => {
                warn!("Small talk page fetch failed (tag={:?}, offset={}): {}", tag, offset, e);
                Err(e)
            }
        }
    }

    async fn list_answers(&self, talk_id: i64) -> Result<Vec<Answer>, ApiError> {
        self.get_json(&format!("/answers/{talk_id}"), &[]).await
    }

    async fn create_small_talk(&self, talk: &NewSmallTalk) -> Result<SmallTalk, ApiError> {
        self.send_json(Method::POST, "/small-talk", talk).await
    }

    async fn update_small_talk(
        &self,
        talk_id: i64,
        patch: &SmallTalkPatch,
    ) -> Result<SmallTalk, ApiError> {
        self.send_json(Method::PATCH, &format!("/small-talk/{talk_id}"), patch)
            .await
    }

    async fn delete_small_talk(&self, talk_id: i64) -> Result<Confirmation, ApiError> {
        let response = self
            .send_empty(Method::DELETE, &format!("/small-talk/{talk_id}"))
            .await?;
        read_confirmation(response).await
    }

    async fn create_answer(&self, answer: &NewAnswer) -> Result<Answer, ApiError> {
        self.send_json(Method::POST, "/answers", answer).await
    }

    async fn update_answer(
        &self,
        answer_id: i64,
        answer: &AnswerUpdate,
    ) -> Result<Answer, ApiError> {
        self.send_json(Method::PUT, &format!("/answers/{answer_id}"), answer)
            .await
    }

    async fn delete_answer(&self, answer_id: i64) -> Result<Confirmation, ApiError> {
        let response = self
            .send_empty(Method::DELETE, &format!("/answers/{answer_id}"))
            .await?;
        read_confirmation(response).await
    }

    async fn bot_status(&self) -> Result<BotStatus, ApiError> {
        self.get_json("/bot/status", &[]).await
    }

    async fn set_bot_running(&self, running: bool) -> Result<BotStatus, ApiError> {
        let path = if running { "/bot/start" } else { "/bot/stop" };
        info!("Requesting bot {}", if running { "start" } else { "stop" });
        let response = self.send_empty(Method::POST, path).await?;
        read_json(response).await
    }

    async fn send_now(&self) -> Result<Confirmation, ApiError> {
        info!("Requesting immediate bot send");
        let response = self.send_empty(Method::POST, "/bot/send-now").await?;
        read_confirmation(response).await
    }
}
