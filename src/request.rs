//! Request configuration and per-call override merging.

use crate::endpoint::{HttpMethod, OperationDescriptor, Placement};
use serde_json::{Map, Value};

/// Per-call request overrides: an open map of configuration keys.
///
/// Keys `method`, `data` and `params` replace the computed values; any other
/// key (e.g. `headers`, `timeout`) is carried through to the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOverrides(Map<String, Value>);

impl RequestOverrides {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set a key. A later call with the same key wins.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for RequestOverrides {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RequestOverrides {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value::<Map<String, Value>>(value).map(Self)
    }
}

/// Final request configuration handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    /// Uppercase HTTP method. Kept as a string since overrides may name any verb.
    pub method: String,
    /// JSON request body.
    pub data: Option<Value>,
    /// Query parameters.
    pub params: Option<Value>,
    /// Every other configuration key.
    pub extra: Map<String, Value>,
}

impl RequestConfig {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method: method.as_str().to_string(),
            data: None,
            params: None,
            extra: Map::new(),
        }
    }

    /// Computed defaults for an operation: its method plus the payload in the
    /// slot its placement dictates.
    pub fn for_descriptor(descriptor: &OperationDescriptor, payload: Option<Value>) -> Self {
        let mut config = Self::new(descriptor.method);
        match descriptor.placement {
            Placement::Query => config.params = payload,
            Placement::Body => config.data = payload,
        }
        config
    }

    /// Headers override, if one was supplied as an object.
    pub fn headers(&self) -> Option<&Map<String, Value>> {
        self.extra.get("headers").and_then(Value::as_object)
    }

    /// Per-request timeout override in milliseconds.
    pub fn timeout_ms(&self) -> Option<u64> {
        self.extra.get("timeout").and_then(Value::as_u64)
    }

    /// Flat JSON object view: `method`, `data`, `params` and the extra keys.
    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert("method".into(), Value::String(self.method.clone()));
        if let Some(data) = &self.data {
            map.insert("data".into(), data.clone());
        }
        if let Some(params) = &self.params {
            map.insert("params".into(), params.clone());
        }
        Value::Object(map)
    }
}

/// Merge caller overrides into a computed configuration.
///
/// Precedence is override > computed default. Computed keys the overrides do
/// not name are kept. A `null` for `data` or `params` clears that slot; a
/// non-string `method` is ignored.
pub fn merge(mut computed: RequestConfig, overrides: Option<&RequestOverrides>) -> RequestConfig {
    let Some(overrides) = overrides else {
        return computed;
    };

    for (key, value) in overrides.iter() {
        match key.as_str() {
            "method" => match value.as_str() {
                Some(m) => {
                    let m = m.to_uppercase();
                    if m != computed.method {
                        tracing::warn!(
                            from = %computed.method,
                            to = %m,
                            "request override replaces HTTP method"
                        );
                    }
                    computed.method = m;
                }
                None => {
                    tracing::warn!(value = %value, "ignoring non-string method override");
                }
            },
            "data" => {
                if computed.data.is_none() && !value.is_null() {
                    tracing::warn!("request override moves payload into the body slot");
                }
                computed.data = non_null(value);
            }
            "params" => {
                if computed.params.is_none() && !value.is_null() {
                    tracing::warn!("request override moves payload into the query slot");
                }
                computed.params = non_null(value);
            }
            _ => {
                computed.extra.insert(key.clone(), value.clone());
            }
        }
    }
    computed
}

fn non_null(value: &Value) -> Option<Value> {
    if value.is_null() {
        None
    } else {
        Some(value.clone())
    }
}
