use async_trait::async_trait;
use aws_sdk_sns::{types::MessageAttributeValue, Client};

const STRING_DATA_TYPE: &str = "String";

/// Outbound request to start a pipeline service for a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartServiceMessage {
    pub package_id: String,
    pub service: String,
}

impl StartServiceMessage {
    pub const REQUESTED_STATUS: &'static str = "START";

    pub fn body(&self) -> String {
        format!(
            "Start service {} for package {}",
            self.service, self.package_id
        )
    }

    /// Message attributes as (name, value) pairs, all of them strings.
    pub fn attributes(&self) -> [(&'static str, &str); 3] {
        [
            ("package_id", self.package_id.as_str()),
            ("requested_status", Self::REQUESTED_STATUS),
            ("service", self.service.as_str()),
        ]
    }
}

#[async_trait]
pub trait Publisher: Sync + Send {
    async fn publish(&self, topic_arn: &str, message: &StartServiceMessage) -> anyhow::Result<()>;
}

#[derive(Clone, Debug)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, topic_arn: &str, message: &StartServiceMessage) -> anyhow::Result<()> {
        let mut request = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message.body());

        for (name, value) in message.attributes() {
            let attribute = MessageAttributeValue::builder()
                .data_type(STRING_DATA_TYPE)
                .string_value(value)
                .build()?;

            request = request.message_attributes(name, attribute);
        }

        request.send().await?;
        Ok(())
    }
}
