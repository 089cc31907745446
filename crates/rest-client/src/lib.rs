//! An agent client for REST webhook channels (`POST /webhooks/rest/webhook`).

#[macro_use]
extern crate tracing;

mod config;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use agent_chat_model::{
    AgentClient, AgentClientError, AgentRequest, ErrorKind, ReplyList,
    parse_reply_list,
};
use mime::Mime;
use reqwest::{Client, Response, header};

pub use config::{RestConfig, RestConfigBuilder};

/// Error type for [`RestClient`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn transport(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Transport)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl AgentClientError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Agent client that talks to a REST webhook endpoint.
#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    config: Arc<RestConfig>,
}

impl RestClient {
    /// Creates a new `RestClient` with the given configuration.
    #[inline]
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this client.
    #[inline]
    pub fn config(&self) -> &RestConfig {
        &self.config
    }
}

impl AgentClient for RestClient {
    type Error = Error;

    fn send(
        &self,
        req: &AgentRequest,
    ) -> impl Future<Output = Result<ReplyList, Self::Error>> + Send + 'static
    {
        let mut req_builder = self
            .client
            .post(self.config.endpoint())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(req);
        if let Some(timeout) = self.config.timeout {
            req_builder = req_builder.timeout(timeout);
        }
        let resp_fut = req_builder.send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    let message = if err.is_timeout() {
                        format!("request timed out: {err}")
                    } else {
                        format!("{err}")
                    };
                    return Err(Error::transport(message));
                }
            };

            let status = resp.status();
            if !status.is_success() {
                return Err(Error::new(
                    format!(
                        "unexpected status: {} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or_default()
                    ),
                    ErrorKind::HttpStatus(status.as_u16()),
                ));
            }

            warn_on_content_type(&resp);

            let body = resp
                .bytes()
                .await
                .map_err(|err| Error::transport(format!("{err}")))?;
            let replies = parse_reply_list(&body).map_err(|err| {
                Error::transport(format!("malformed response body: {err}"))
            })?;
            trace!("received {} replies", replies.len());
            Ok(replies)
        }
    }
}

/// Logs responses that announce a non-JSON body. The body parser has the
/// final say, so a wrong or missing content type is not an error by itself.
fn warn_on_content_type(resp: &Response) {
    let Some(content_type) = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return;
    };
    let is_json = content_type
        .parse()
        .map(|m: Mime| {
            m.type_() == mime::APPLICATION
                && (m.subtype() == mime::JSON
                    || m.suffix() == Some(mime::JSON))
        })
        .unwrap_or(false);
    if !is_json {
        warn!("unexpected content type: {}", content_type);
    }
}
