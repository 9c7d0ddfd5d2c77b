use async_trait::async_trait;
use aws_sdk_ssm::Client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

#[async_trait]
pub trait ParameterStore: Sync + Send {
    /// Immediate (non-recursive) parameters under `path`, decrypted.
    async fn parameters_by_path(&self, path: &str) -> anyhow::Result<Vec<Parameter>>;
}

#[derive(Clone, Debug)]
pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn parameters_by_path(&self, path: &str) -> anyhow::Result<Vec<Parameter>> {
        let mut parameters = Vec::new();
        let mut next_token = None;

        loop {
            let output = self
                .client
                .get_parameters_by_path()
                .path(path)
                .recursive(false)
                .with_decryption(true)
                .set_next_token(next_token)
                .send()
                .await?;

            for param in output.parameters() {
                if let (Some(name), Some(value)) = (param.name(), param.value()) {
                    parameters.push(Parameter {
                        name: name.to_owned(),
                        value: value.to_owned(),
                    });
                }
            }

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_owned()),
                _ => break,
            }
        }

        Ok(parameters)
    }
}
