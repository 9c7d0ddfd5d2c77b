use std::collections::HashMap;

use anyhow::{anyhow, Context};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::app::error::{Error, ErrorExt, ErrorKind};

////////////////////////////////////////////////////////////////////////////////

/// Inbound SNS notification as delivered by the Lambda runtime.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SnsEnvelope {
    #[serde(default)]
    pub(crate) records: Vec<SnsRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SnsRecord {
    pub(crate) sns: SnsMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SnsMessage {
    #[serde(default)]
    pub(crate) message_attributes: HashMap<String, MessageAttribute>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageAttribute {
    #[serde(rename = "Value")]
    pub(crate) value: String,
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub(crate) struct Outcome(String);

impl Outcome {
    const SUCCESS: &'static str = "SUCCESS";

    pub(crate) fn new(outcome: impl Into<String>) -> Self {
        Self(outcome.into())
    }

    /// Case-sensitive: only the literal `SUCCESS` counts.
    pub(crate) fn is_success(&self) -> bool {
        self.0 == Self::SUCCESS
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Attributes of a single notification: which service produced which outcome for
/// which package.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Attributes {
    pub(crate) package_id: String,
    pub(crate) service: String,
    pub(crate) outcome: Outcome,
    pub(crate) package_data: Option<JsonValue>,
}

impl Attributes {
    /// Reads the attributes of the first record, any further records are ignored.
    pub(crate) fn from_envelope(envelope: &SnsEnvelope) -> Result<Self, Error> {
        let record = envelope
            .records
            .first()
            .ok_or_else(|| anyhow!("notification has no records"))
            .error(ErrorKind::MessageParsingFailed)?;

        Self::from_message_attributes(&record.sns.message_attributes)
    }

    pub(crate) fn from_message_attributes(
        attributes: &HashMap<String, MessageAttribute>,
    ) -> Result<Self, Error> {
        let required = |name: &str| {
            attributes
                .get(name)
                .map(|attr| attr.value.clone())
                .ok_or_else(|| anyhow!("missing message attribute '{}'", name))
                .error(ErrorKind::MessageParsingFailed)
        };

        let package_data = match attributes.get("package_data") {
            Some(attr) => Some(
                serde_json::from_str::<JsonValue>(&attr.value)
                    .context("package_data is not valid JSON")
                    .error(ErrorKind::InvalidPackageData)?,
            ),
            None => None,
        };

        Ok(Self {
            package_id: required("package_id")?,
            service: required("service")?,
            outcome: Outcome::new(required("outcome")?),
            package_data,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize)]
pub(crate) struct PackagePayload<'a> {
    pub(crate) package_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) package_data: Option<&'a JsonValue>,
}

impl<'a> From<&'a Attributes> for PackagePayload<'a> {
    fn from(attributes: &'a Attributes) -> Self {
        Self {
            package_id: &attributes.package_id,
            package_data: attributes.package_data.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EventPayload<'a> {
    pub(crate) outcome: &'a str,
    pub(crate) service: &'a str,
    pub(crate) package: &'a str,
    pub(crate) identifier: String,
}

/// Event as listed by the package events endpoint. Unknown fields are ignored,
/// `identifier` and `outcome` may be `null` or absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct PackageEvent {
    pub(crate) identifier: Option<String>,
    pub(crate) service: String,
    pub(crate) outcome: Option<String>,
}
