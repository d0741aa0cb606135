//! Upstream response envelope.
//!
//! The upstream wraps every payload as `{ "status": ..., "data": ... }` where
//! `data` is either one employee or a list of them. The shape is decided by
//! looking at the JSON node itself, there is no discriminator field.

use serde::Deserialize;
use serde_json::Value;

use crate::employee::model::Employee;

/// Payload carried by an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeData {
    /// `data` was an object, or null/absent (`None`).
    Single(Option<Employee>),
    /// `data` was an array.
    List(Vec<Employee>),
}

/// Decoded upstream envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEnvelope")]
pub struct Envelope {
    pub status: String,
    pub data: EnvelopeData,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Value,
}

impl TryFrom<RawEnvelope> for Envelope {
    type Error = serde_json::Error;

    fn try_from(raw: RawEnvelope) -> Result<Self, Self::Error> {
        let data = match raw.data {
            Value::Array(items) => EnvelopeData::List(
                items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Null => EnvelopeData::Single(None),
            other => EnvelopeData::Single(Some(serde_json::from_value(other)?)),
        };
        Ok(Self {
            status: raw.status.unwrap_or_default(),
            data,
        })
    }
}

impl Envelope {
    /// Decode an envelope from a raw response body.
    pub fn decode(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// The single-record slot, if this envelope carried one.
    pub fn into_single(self) -> Option<Employee> {
        match self.data {
            EnvelopeData::Single(employee) => employee,
            EnvelopeData::List(_) => None,
        }
    }

    /// The list slot, if this envelope carried one.
    pub fn into_list(self) -> Option<Vec<Employee>> {
        match self.data {
            EnvelopeData::List(employees) => Some(employees),
            EnvelopeData::Single(_) => None,
        }
    }
}
