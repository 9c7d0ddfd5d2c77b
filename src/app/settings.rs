use std::collections::HashMap;

use anyhow::anyhow;

use crate::{
    app::error::{Error, ErrorExt, ErrorKind},
    client::ssm::ParameterStore,
};

pub(crate) type Parameters = HashMap<String, String>;

/// Fetches the parameters stored directly under `path`, keyed by the last segment of
/// their names.
///
/// A failed fetch is logged and returned as an error: there is no partial result.
pub(crate) async fn get_config(store: &dyn ParameterStore, path: &str) -> Result<Parameters, Error> {
    let params = store
        .parameters_by_path(path)
        .await
        .map_err(|err| {
            tracing::error!(%path, error = %format!("{:#}", err), "Failed to load config from SSM");
            err
        })
        .error(ErrorKind::ConfigLoadFailed)?;

    Ok(params
        .into_iter()
        .map(|param| {
            let key = param
                .name
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_owned();
            (key, param.value)
        })
        .collect())
}

/// Remote configuration required by a single invocation.
#[derive(Clone, Debug)]
pub(crate) struct ServiceConfig {
    pub(crate) zodiac_baseurl: String,
    pub(crate) service_start_sns_topic: String,
}

impl ServiceConfig {
    const REQUIRED_KEYS: [&'static str; 2] = ["ZODIAC_BASEURL", "SERVICE_START_SNS_TOPIC"];
}

impl TryFrom<&Parameters> for ServiceConfig {
    type Error = Error;

    fn try_from(params: &Parameters) -> Result<Self, Self::Error> {
        let missing = Self::REQUIRED_KEYS
            .iter()
            .filter(|key| !params.contains_key(**key))
            .copied()
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(anyhow!("missing config keys: {}", missing.join(", ")))
                .error(ErrorKind::ConfigKeyMissing);
        }

        Ok(Self {
            zodiac_baseurl: params["ZODIAC_BASEURL"].trim_end_matches('/').to_owned(),
            service_start_sns_topic: params["SERVICE_START_SNS_TOPIC"].clone(),
        })
    }
}
