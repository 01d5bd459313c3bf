//! JSON-RPC 2.0 message model.
//!
//! Requests, notifications, and responses are immutable value types. Outbound
//! messages serialise through wire structs whose field order puts the
//! `jsonrpc` marker first; inbound content deserialises through a permissive
//! raw struct and the message kind is inferred from which fields are present.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProtocolError;
use crate::framing;

/// Protocol version marker carried by every message.
const JSONRPC_VERSION: &str = "2.0";

/// A call expecting exactly one [`Response`] carrying the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Caller-chosen correlation id; uniqueness is the caller's concern.
    pub id: i64,
    /// Method to invoke.
    pub method: String,
    /// Optional structured arguments.
    pub params: Option<Value>,
}

impl Request {
    /// Creates a request.
    #[must_use]
    pub fn new(id: i64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request[{}][{}]", self.id, self.method)?;
        if let Some(params) = &self.params {
            write!(f, " : {params}")?;
        }
        Ok(())
    }
}

/// A fire-and-forget event; never answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Method to invoke.
    pub method: String,
    /// Optional structured arguments.
    pub params: Option<Value>,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Notification[{}]", self.method)?;
        if let Some(params) = &self.params {
            write!(f, " : {params}")?;
        }
        Ok(())
    }
}

/// The answer to an earlier [`Request`].
///
/// The model does not forbid `result` and `error` being present together;
/// both are serialised, and the error renders first when displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Id of the request being answered.
    pub id: i64,
    /// Payload produced by a successful handler.
    pub result: Option<Value>,
    /// Failure reported by the handler.
    pub error: Option<ErrorObject>,
}

impl Response {
    /// Creates a response carrying a result payload.
    #[must_use]
    pub fn success(id: i64, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Creates a response reporting a failure.
    #[must_use]
    pub fn failure(id: i64, error: ErrorObject) -> Self {
        Self {
            id,
            result: None,
            error: Some(error),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response[{}]", self.id)?;
        if let Some(error) = &self.error {
            write!(f, " : < {error} >")?;
        }
        if let Some(result) = &self.result {
            write!(f, " : {result}")?;
        }
        Ok(())
    }
}

/// A structured failure carried by a [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Registry code classifying the failure (see [`crate::codes`]).
    pub code: i64,
    /// Human-readable description.
    pub message: String,
    /// Optional payload giving further context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    /// Creates an error object.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// Produces the JSON-RPC-shaped map for this error.
    #[must_use]
    pub fn to_content(&self) -> Value {
        let mut content = serde_json::Map::new();
        content.insert("code".to_owned(), Value::from(self.code));
        content.insert("message".to_owned(), Value::from(self.message.clone()));
        if let Some(data) = &self.data {
            content.insert("data".to_owned(), data.clone());
        }
        Value::Object(content)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error[{}] : {}", self.code, self.message)
    }
}

/// Union of the three message kinds.
///
/// The kind is inferred structurally when parsing: content carrying a
/// `method` is a request when `id` is also present and a notification
/// otherwise, and content without a `method` is a response.
///
/// # Examples
///
/// ```rust
/// use quill_protocol::{Message, Request};
///
/// # fn main() -> Result<(), quill_protocol::ProtocolError> {
/// let message = Message::from(Request::new(1, "note/open", None));
/// let frame = message.serialize()?;
/// assert_eq!(Message::parse(&frame)?, message);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A call expecting a reply.
    Request(Request),
    /// A fire-and-forget event.
    Notification(Notification),
    /// The reply to an earlier request.
    Response(Response),
}

impl Message {
    /// Produces the JSON-RPC-shaped map for this message.
    ///
    /// Absent optional fields are omitted rather than serialised as null, and
    /// the fixed `"jsonrpc": "2.0"` marker is always present.
    #[must_use]
    pub fn to_content(&self) -> Value {
        let mut content = serde_json::Map::new();
        content.insert("jsonrpc".to_owned(), Value::from(JSONRPC_VERSION));
        match self {
            Self::Request(request) => {
                content.insert("id".to_owned(), Value::from(request.id));
                content.insert("method".to_owned(), Value::from(request.method.clone()));
                if let Some(params) = &request.params {
                    content.insert("params".to_owned(), params.clone());
                }
            }
            Self::Notification(notification) => {
                content.insert("method".to_owned(), Value::from(notification.method.clone()));
                if let Some(params) = &notification.params {
                    content.insert("params".to_owned(), params.clone());
                }
            }
            Self::Response(response) => {
                content.insert("id".to_owned(), Value::from(response.id));
                if let Some(result) = &response.result {
                    content.insert("result".to_owned(), result.clone());
                }
                if let Some(error) = &response.error {
                    content.insert("error".to_owned(), error.to_content());
                }
            }
        }
        Value::Object(content)
    }

    /// Rebuilds a message from its JSON-RPC-shaped content.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] when `content` does not deserialise
    /// and [`ProtocolError::MissingField`] when the content carries neither a
    /// `method` nor the `id` a response requires.
    pub fn from_content(content: Value) -> Result<Self, ProtocolError> {
        let raw: RawMessage = serde_json::from_value(content)?;
        match (raw.method, raw.id) {
            (Some(method), Some(id)) => Ok(Self::Request(Request {
                id,
                method,
                params: raw.params,
            })),
            (Some(method), None) => Ok(Self::Notification(Notification {
                method,
                params: raw.params,
            })),
            (None, Some(id)) => Ok(Self::Response(Response {
                id,
                result: raw.result,
                error: raw.error,
            })),
            (None, None) => Err(ProtocolError::missing_field("id")),
        }
    }

    /// Serialises this message as a complete Content-Length frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] if the content cannot be serialised.
    pub fn serialize(&self) -> Result<Vec<u8>, ProtocolError> {
        match self {
            Self::Request(request) => framing::encode(&RequestWire {
                jsonrpc: JSONRPC_VERSION,
                id: request.id,
                method: &request.method,
                params: request.params.as_ref(),
            }),
            Self::Notification(notification) => framing::encode(&NotificationWire {
                jsonrpc: JSONRPC_VERSION,
                method: &notification.method,
                params: notification.params.as_ref(),
            }),
            Self::Response(response) => framing::encode(&ResponseWire {
                jsonrpc: JSONRPC_VERSION,
                id: response.id,
                result: response.result.as_ref(),
                error: response.error.as_ref(),
            }),
        }
    }

    /// Parses one complete frame into a message.
    ///
    /// # Errors
    ///
    /// Propagates framing errors from [`framing::decode`] and content errors
    /// from [`Message::from_content`].
    pub fn parse(frame: &[u8]) -> Result<Self, ProtocolError> {
        Self::from_content(framing::decode(frame)?)
    }
}

impl From<Request> for Message {
    fn from(request: Request) -> Self {
        Self::Request(request)
    }
}

impl From<Notification> for Message {
    fn from(notification: Notification) -> Self {
        Self::Notification(notification)
    }
}

impl From<Response> for Message {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(request) => request.fmt(f),
            Self::Notification(notification) => notification.fmt(f),
            Self::Response(response) => response.fmt(f),
        }
    }
}

/// Serialisation shape for requests; keeps `jsonrpc` first on the wire.
#[derive(Serialize)]
struct RequestWire<'a> {
    jsonrpc: &'static str,
    id: i64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
}

/// Serialisation shape for notifications.
#[derive(Serialize)]
struct NotificationWire<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
}

/// Serialisation shape for responses.
#[derive(Serialize)]
struct ResponseWire<'a> {
    jsonrpc: &'static str,
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ErrorObject>,
}

/// Permissive deserialisation shape; kind inference happens afterwards.
#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Option<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}
