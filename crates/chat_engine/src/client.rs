use std::sync::Arc;

use chat_logging::{chat_debug, chat_info};
use futures_util::StreamExt;
use reqwest::cookie::{CookieStore, Jar};
use url::Url;

use crate::cookies::get_cookie;
use crate::history::extract_inbox;
use crate::protocol::{parse_message, parse_updates};
use crate::{ChatMessage, ClientError, ClientSettings, FailureKind, UpdatesReply};

pub const UPDATES_PATH: &str = "/a/message/updates";
pub const NEW_MESSAGE_PATH: &str = "/a/message/new";
pub const LOGIN_PATH: &str = "/auth/login";
pub const INDEX_PATH: &str = "/";

/// Cookie and form field carrying the anti-forgery token.
pub const XSRF_FIELD: &str = "_xsrf";
const USER_COOKIE: &str = "user";

#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    /// Long-polls for messages after `cursor`.
    async fn fetch_updates(&self, cursor: Option<&str>) -> Result<UpdatesReply, ClientError>;

    /// Posts the composer form and returns the stored message.
    async fn post_message(&self, fields: &[(String, String)]) -> Result<ChatMessage, ClientError>;

    async fn login(&self, nick: &str, email: &str) -> Result<(), ClientError>;

    /// Reads the messages the server already rendered into the chat page.
    async fn load_history(&self) -> Result<Vec<ChatMessage>, ClientError>;

    fn xsrf_token(&self) -> Option<String>;
}

pub struct ReqwestChatClient {
    settings: ClientSettings,
    base_url: Url,
    jar: Arc<Jar>,
    client: reqwest::Client,
}

impl ReqwestChatClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .cookie_provider(jar.clone())
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base_url,
            jar,
            client,
        })
    }

    /// Seeds the cookie jar, e.g. with a saved session cookie.
    pub fn add_cookie(&self, cookie: &str) {
        self.jar.add_cookie_str(cookie, &self.base_url);
    }

    fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        get_cookie(header, name)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// Attaches the current anti-forgery token, replacing any stale copy.
    fn with_xsrf(&self, mut form: Vec<(String, String)>) -> Vec<(String, String)> {
        form.retain(|(name, _)| name != XSRF_FIELD);
        if let Some(token) = self.xsrf_token() {
            form.push((XSRF_FIELD.to_string(), token));
        }
        form
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(path)?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        self.read_body(response).await
    }

    async fn post_form(&self, path: &str, form: Vec<(String, String)>) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(path)?;
        let form = self.with_xsrf(form);
        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_body(response).await
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ChatClient for ReqwestChatClient {
    async fn fetch_updates(&self, cursor: Option<&str>) -> Result<UpdatesReply, ClientError> {
        let mut form = Vec::with_capacity(2);
        if let Some(cursor) = cursor {
            form.push(("cursor".to_string(), cursor.to_string()));
        }
        let body = self.post_form(UPDATES_PATH, form).await?;
        parse_updates(&body)
    }

    async fn post_message(&self, fields: &[(String, String)]) -> Result<ChatMessage, ClientError> {
        let body = self.post_form(NEW_MESSAGE_PATH, fields.to_vec()).await?;
        parse_message(&body)
    }

    async fn login(&self, nick: &str, email: &str) -> Result<(), ClientError> {
        // The login page hands out the anti-forgery cookie.
        self.get(LOGIN_PATH).await?;
        chat_debug!("login page fetched, xsrf present: {}", self.xsrf_token().is_some());

        let form = vec![
            ("nick".to_string(), nick.to_string()),
            ("email".to_string(), email.to_string()),
        ];
        self.post_form(LOGIN_PATH, form).await?;

        if self.cookie(USER_COOKIE).is_none() {
            return Err(ClientError::new(
                FailureKind::LoginRejected,
                format!("server did not accept nick {nick:?}"),
            ));
        }
        chat_info!("logged in as {}", nick);
        Ok(())
    }

    async fn load_history(&self) -> Result<Vec<ChatMessage>, ClientError> {
        let body = self.get(INDEX_PATH).await?;
        let page = String::from_utf8_lossy(&body);
        Ok(extract_inbox(&page))
    }

    fn xsrf_token(&self) -> Option<String> {
        self.cookie(XSRF_FIELD)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
