//! JSON-RPC request envelope and response decoding
//!
//! The response lists localities and celebrations in one flat array. A
//! locality entry (carrying `community`) applies to every celebration entry
//! (carrying `celebrationInfoId`) that follows it, until the next locality.

use std::sync::Arc;

use messesinfo_core::{MassParser, RawPayload};
use messesinfo_domain::constants::{DEFAULT_MASS_KIND, RPC_REQUEST_FACTORY, RPC_RESULT_PATH};
use messesinfo_domain::{
    parse_mass_length, parse_mass_start, Community, Mass, MessesError, Result,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::InfraError;

#[derive(Debug, Serialize)]
pub struct RpcEnvelope<'a> {
    #[serde(rename = "F")]
    factory: &'a str,
    #[serde(rename = "I")]
    invocations: [RpcInvocation<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RpcInvocation<'a> {
    #[serde(rename = "O")]
    operation: &'a str,
    /// query, page, page size, then four unused slots
    #[serde(rename = "P")]
    parameters: (String, u32, u32, Option<u32>, Option<u32>, Option<String>, Option<String>),
    #[serde(rename = "R")]
    result_paths: [&'a str; 1],
}

impl<'a> RpcEnvelope<'a> {
    /// Envelope requesting the first page of results for `query`.
    pub fn new(api_key: &'a str, query: String, page_size: u32) -> Self {
        Self {
            factory: RPC_REQUEST_FACTORY,
            invocations: [RpcInvocation {
                operation: api_key,
                parameters: (query, 0, page_size, None, None, None, None),
                result_paths: [RPC_RESULT_PATH],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(rename = "S")]
    status: Vec<Value>,
    #[serde(rename = "O", default)]
    objects: Vec<RpcObject>,
}

#[derive(Debug, Deserialize)]
struct RpcObject {
    #[serde(rename = "P", default)]
    properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RpcLocality {
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    zipcode: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RpcCelebration {
    date: String,
    time: String,
    #[serde(default)]
    length: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Coordinates arrive either as numbers or as numeric strings.
fn lenient_coordinate<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Option::<Coordinate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Coordinate::Number(value)) => Ok(Some(value)),
        Some(Coordinate::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Coordinate::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid coordinate '{text}'"))),
    }
}

impl From<RpcLocality> for Community {
    fn from(locality: RpcLocality) -> Self {
        Self {
            name: locality.name,
            street_address: locality.address.unwrap_or_default(),
            postal_code: locality.zipcode.unwrap_or_default(),
            city: locality.city.unwrap_or_default(),
            latitude: locality.latitude,
            longitude: locality.longitude,
            diocese: None,
        }
    }
}

impl RpcCelebration {
    fn into_mass(self, community: Option<Arc<Community>>) -> Result<Mass> {
        let start = parse_mass_start(&self.date, &self.time)?;
        let duration = parse_mass_length(self.length.as_deref())?;
        let kind = self.kind.filter(|k| !k.trim().is_empty()).unwrap_or_else(|| DEFAULT_MASS_KIND.to_string());
        Ok(Mass::new(start, duration, kind)?.with_community(community))
    }
}

fn decode_entry<T: for<'de> Deserialize<'de>>(properties: &Map<String, Value>, what: &str) -> Result<T> {
    serde_json::from_value(Value::Object(properties.clone())).map_err(|err| {
        let mapped = MessesError::from(InfraError::from(err));
        MessesError::Parse(format!("invalid {what} entry: {mapped}"))
    })
}

/// Parser for `gwtRequest` responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcMassParser;

impl RpcMassParser {
    pub fn parse_value(&self, value: Value) -> Result<Vec<Mass>> {
        let response: RpcResponse =
            serde_json::from_value(value).map_err(|err| MessesError::from(InfraError::from(err)))?;

        if let Some(bad) = response.status.iter().find(|status| **status != Value::Bool(true)) {
            return Err(MessesError::InvalidResponse(format!(
                "server reported status {bad} in {:?}",
                response.status
            )));
        }

        let (_, masses) = response.objects.iter().try_fold(
            (None::<Arc<Community>>, Vec::new()),
            |(community, mut masses), object| -> Result<_> {
                let props = &object.properties;
                if props.contains_key("community") {
                    let locality: RpcLocality = decode_entry(props, "community")?;
                    return Ok((Some(Arc::new(Community::from(locality))), masses));
                }
                if props.contains_key("celebrationInfoId") {
                    let celebration: RpcCelebration = decode_entry(props, "celebration")?;
                    masses.push(celebration.into_mass(community.clone())?);
                }
                Ok((community, masses))
            },
        )?;

        debug!(objects = response.objects.len(), masses = masses.len(), "rpc response decoded");
        Ok(masses)
    }
}

impl MassParser for RpcMassParser {
    fn parse(&self, payload: RawPayload) -> Result<Vec<Mass>> {
        match payload {
            RawPayload::Json(value) => self.parse_value(value),
            RawPayload::Html(_) => Err(MessesError::Parse("expected a JSON payload".into())),
        }
    }
}
