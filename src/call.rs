use serde::{Deserialize, Serialize};

use super::ParamValue;

pub const NO_PARAMS: [ParamValue; 0] = [];

/// An immutable description of one JSON-RPC call.
///
/// Two descriptors are equal when endpoint, method and params are all equal,
/// which is what makes them usable as cache identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallDescriptor {
    endpoint: String,
    method: String,
    params: Vec<ParamValue>,
}

impl CallDescriptor {
    pub fn new<P>(
        endpoint: impl Into<String>,
        method: impl Into<String>,
        params: impl IntoIterator<Item = P>,
    ) -> Self
    where
        P: Into<ParamValue>,
    {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
    pub fn method(&self) -> &str {
        &self.method
    }
    pub fn params(&self) -> &[ParamValue] {
        &self.params
    }
}
