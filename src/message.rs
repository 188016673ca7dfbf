use std::time::{SystemTime, UNIX_EPOCH};

use parse_display::Display;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, value::RawValue};

use super::{CallDescriptor, Error, ParamValue, Result};

#[cfg(test)]
mod tests;

pub const JSONRPC_VERSION: &str = "2.0";

/// Request id, derived from the wall clock at call time.
///
/// Responses are never correlated by id because every exchange carries exactly one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{0}")]
pub struct RequestId(pub u64);

impl RequestId {
    /// Whole seconds since the Unix epoch.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self(secs)
    }
}

#[derive(Debug, Serialize)]
pub struct RequestMessage<'a> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub method: &'a str,
    pub params: &'a [ParamValue],
}
impl<'a> RequestMessage<'a> {
    pub fn new(id: RequestId, call: &'a CallDescriptor) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: call.method(),
            params: call.params(),
        }
    }
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialize(e.into()))
    }
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub result: Option<Box<RawValue>>,
    #[serde(default)]
    pub error: Option<Value>,
}

// `"result": null` is a successful response, so it must not collapse into `None`.
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ResponseMessage {
    pub fn into_result(self) -> Result<Box<RawValue>> {
        if let Some(version) = self.jsonrpc {
            if version != JSONRPC_VERSION {
                return Err(Error::Version(version));
            }
        }
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(error)) => match ErrorObject::deserialize(error) {
                Ok(error) => Err(Error::Protocol(error)),
                Err(_) => Err(Error::Envelope(EnvelopeViolation::MalformedError)),
            },
            (None, None) => Err(Error::Envelope(EnvelopeViolation::Missing)),
            (Some(_), Some(_)) => Err(Error::Envelope(EnvelopeViolation::Ambiguous)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EnvelopeViolation {
    #[display("response has neither `result` nor `error`")]
    Missing,
    #[display("response has both `result` and `error`")]
    Ambiguous,
    #[display("response `error` is not an error object")]
    MalformedError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{0}")]
pub struct ErrorCode(pub i64);

impl ErrorCode {
    pub const PARSE_ERROR: Self = Self(-32700);
    pub const INVALID_REQUEST: Self = Self(-32600);
    pub const METHOD_NOT_FOUND: Self = Self(-32601);
    pub const INVALID_PARAMS: Self = Self(-32602);
    pub const INTERNAL_ERROR: Self = Self(-32603);
    pub const SERVER_ERROR_START: Self = Self(-32099);
    pub const SERVER_ERROR_END: Self = Self(-32000);

    pub fn message(self) -> &'static str {
        match self {
            Self::PARSE_ERROR => "Parse error",
            Self::INVALID_REQUEST => "Invalid Request",
            Self::METHOD_NOT_FOUND => "Method not found",
            Self::INVALID_PARAMS => "Invalid params",
            Self::INTERNAL_ERROR => "Internal error",
            _ if self.is_server_error() => "Server error",
            _ => "Unknown error",
        }
    }
    pub fn is_server_error(self) -> bool {
        (Self::SERVER_ERROR_START.0..=Self::SERVER_ERROR_END.0).contains(&self.0)
    }
}
