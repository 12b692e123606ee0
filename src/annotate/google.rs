//! Cloud Natural Language `documents:analyzeEntities` client.
//!
//! Sends the text as an English plain-text document with UTF-8 offsets and
//! turns the response into [`Entity`] records. Any transport problem, HTTP
//! error status or unreadable body is an [`Error::AnnotationFailed`]; a
//! request that exceeds its timeout is an [`Error::AnnotationTimedOut`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Annotator;
use crate::entity::{Entity, EntityType, Mention, MentionType};
use crate::{Error, Result};

/// Service root used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://language.googleapis.com";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Language code sent with every document.
pub const LANGUAGE_CODE: &str = "en";

const ANALYZE_ENTITIES_PATH: &str = "/v2/documents:analyzeEntities";

/// How requests authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key, sent in the `x-goog-api-key` header
    ApiKey(String),
    /// OAuth access token, sent as a bearer token
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeEntitiesRequest<'a> {
    document: Document<'a>,
    encoding_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    #[serde(rename = "type")]
    doc_type: &'static str,
    content: &'a str,
    language_code: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeEntitiesResponse {
    #[serde(default)]
    entities: Vec<WireEntity>,
    #[serde(default)]
    language_code: Option<String>,
    #[serde(default)]
    language_supported: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct WireEntity {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    entity_type: Option<String>,
    #[serde(default)]
    mentions: Vec<WireMention>,
}

#[derive(Debug, Deserialize)]
struct WireMention {
    #[serde(default)]
    text: Option<TextSpan>,
    #[serde(rename = "type", default)]
    mention_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextSpan {
    #[serde(default)]
    content: Option<String>,
    // Zero offsets are omitted from the JSON encoding.
    #[serde(default)]
    begin_offset: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl WireEntity {
    fn into_entity(self, index: usize) -> Result<Entity> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| Error::invalid_entity(format!("entity #{index} has no name")))?;
        let entity_type = self
            .entity_type
            .map(|t| EntityType::from_label(&t))
            .ok_or_else(|| Error::invalid_entity(format!("entity '{name}' has no type")))?;

        let mut entity = Entity::new(name, entity_type);
        for mention in self.mentions {
            let span = mention.text.ok_or_else(|| {
                Error::invalid_entity(format!("entity '{}' has a mention without text", entity.name))
            })?;
            let content = span.content.unwrap_or_default();
            let begin_offset = usize::try_from(span.begin_offset).map_err(|_| {
                Error::invalid_entity(format!(
                    "entity '{}' has mention '{}' at negative offset {}",
                    entity.name, content, span.begin_offset
                ))
            })?;
            let mention_type = mention
                .mention_type
                .map(|t| MentionType::from_label(&t))
                .unwrap_or(MentionType::Unknown);
            entity.mentions.push(Mention::new(content, begin_offset, mention_type));
        }

        if entity.mentions.is_empty() {
            return Err(Error::invalid_entity(format!(
                "entity '{}' has no mentions",
                entity.name
            )));
        }
        Ok(entity)
    }
}

/// Parse an `analyzeEntities` response body.
///
/// Entities keep the order the service returned them in.
pub fn parse_analyze_entities_response(body: &str) -> Result<Vec<Entity>> {
    let response: AnalyzeEntitiesResponse = serde_json::from_str(body)
        .map_err(|e| Error::annotation_failed(format!("malformed response: {e}")))?;

    if response.language_supported == Some(false) {
        log::warn!(
            "annotator reports language {:?} as unsupported",
            response.language_code.as_deref().unwrap_or("?")
        );
    }

    response
        .entities
        .into_iter()
        .enumerate()
        .map(|(i, e)| e.into_entity(i))
        .collect()
}

// =============================================================================
// Client
// =============================================================================

/// Blocking client for the Cloud Natural Language API.
///
/// Holds one connection agent; construct it once and reuse it.
#[derive(Debug)]
pub struct GoogleNlpAnnotator {
    agent: ureq::Agent,
    endpoint: String,
    credentials: Credentials,
    timeout: Duration,
}

impl GoogleNlpAnnotator {
    /// Create a client for the public endpoint.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a different service root (proxies, regional endpoints, tests).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of the analyzeEntities method.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.endpoint, ANALYZE_ENTITIES_PATH)
    }

    fn request_error(&self, err: ureq::Error) -> Error {
        match err {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                    .map(|env| format!("{} {}", env.error.status, env.error.message))
                    .unwrap_or(body);
                Error::annotation_failed(format!("HTTP {code}: {}", detail.trim()))
            }
            ureq::Error::Transport(transport) => {
                if is_timeout(&transport) {
                    return Error::AnnotationTimedOut(self.timeout);
                }
                // The transport's own Display includes the request URL.
                let mut detail = transport.kind().to_string();
                if let Some(message) = transport.message() {
                    detail.push_str(": ");
                    detail.push_str(message);
                }
                if let Some(source) = std::error::Error::source(&transport) {
                    detail.push_str(&format!(" ({source})"));
                }
                Error::annotation_failed(format!(
                    "network error calling {}: {detail}",
                    self.endpoint
                ))
            }
        }
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    use std::error::Error as _;

    let mut source = transport.source();
    while let Some(err) = source {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ) {
                return true;
            }
        }
        source = err.source();
    }
    transport.to_string().contains("timed out")
}

impl Annotator for GoogleNlpAnnotator {
    fn detect_entities(&self, text: &str) -> Result<Vec<Entity>> {
        if text.trim().is_empty() {
            return Err(Error::invalid_input("cannot annotate empty text"));
        }

        let body = AnalyzeEntitiesRequest {
            document: Document {
                doc_type: "PLAIN_TEXT",
                content: text,
                language_code: LANGUAGE_CODE,
            },
            encoding_type: "UTF8",
        };

        let request = self.agent.post(&self.url()).timeout(self.timeout);
        let request = match &self.credentials {
            Credentials::ApiKey(key) => request.set("x-goog-api-key", key),
            Credentials::AccessToken(token) => {
                request.set("Authorization", &format!("Bearer {token}"))
            }
        };

        log::debug!("analyzeEntities: {} bytes to {}", text.len(), self.endpoint);
        let response = request
            .send_json(&body)
            .map_err(|e| self.request_error(e))?;
        let body = response
            .into_string()
            .map_err(|e| Error::annotation_failed(format!("failed to read response: {e}")))?;

        let entities = parse_analyze_entities_response(&body)?;
        log::debug!("analyzeEntities returned {} entities", entities.len());
        Ok(entities)
    }

    fn name(&self) -> &str {
        "google-nlp"
    }
}

/// Replays a saved `analyzeEntities` response instead of calling the service.
#[derive(Debug, Clone)]
pub struct RecordedAnnotator {
    entities: Vec<Entity>,
}

impl RecordedAnnotator {
    /// Parse a saved response body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(Self {
            entities: parse_analyze_entities_response(body)?,
        })
    }
}

impl Annotator for RecordedAnnotator {
    fn detect_entities(&self, _text: &str) -> Result<Vec<Entity>> {
        Ok(self.entities.clone())
    }

    fn name(&self) -> &str {
        "recorded"
    }
}
