use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    pub(crate) env: String,
    pub(crate) app_config_path: String,
    pub(crate) aws_role_arn: Option<String>,
}

impl Config {
    /// Parameter store path holding the remote configuration.
    pub(crate) fn parameter_path(&self) -> String {
        format!("/{}/{}", self.env, self.app_config_path)
    }
}

pub(crate) fn load() -> Result<Config, config::ConfigError> {
    let mut parser = config::Config::default();
    parser.merge(config::File::with_name("App").required(false))?;
    parser.merge(config::Environment::new())?;
    parser.try_into::<Config>()
}
