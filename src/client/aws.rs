use aws_config::{sts::AssumeRoleProvider, BehaviorVersion, SdkConfig};

const SESSION_NAME: &str = "ingest-notifications";

/// SDK configuration for the SSM and SNS clients.
///
/// With a role ARN the credentials come from STS role assumption on top of the
/// default chain, otherwise the default chain is used as is.
pub async fn sdk_config(role_arn: Option<&str>) -> SdkConfig {
    let base = aws_config::load_defaults(BehaviorVersion::latest()).await;

    match role_arn {
        Some(role_arn) => {
            let provider = AssumeRoleProvider::builder(role_arn)
                .session_name(SESSION_NAME)
                .configure(&base)
                .build()
                .await;

            aws_config::defaults(BehaviorVersion::latest())
                .credentials_provider(provider)
                .load()
                .await
        }
        None => base,
    }
}
