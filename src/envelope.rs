use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::{Error, ResponseMessage, Result};

/// How a successful HTTP response body is turned into the fetched value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, FromStr, Serialize, Deserialize,
)]
#[display(style = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeMode {
    /// The whole body is the value. JSON-RPC errors inside the body are not detected.
    Raw,
    /// The body is a JSON-RPC response; `result` is the value and `error` is a failure.
    #[default]
    JsonRpc,
}

impl EnvelopeMode {
    pub fn decode<T: DeserializeOwned>(self, body: &[u8]) -> Result<T> {
        match self {
            Self::Raw => serde_json::from_slice(body).map_err(Error::parse),
            Self::JsonRpc => {
                let m: ResponseMessage = serde_json::from_slice(body).map_err(Error::parse)?;
                let result = m.into_result()?;
                serde_json::from_str(result.get()).map_err(|e| Error::ResultType(e.into()))
            }
        }
    }
}
