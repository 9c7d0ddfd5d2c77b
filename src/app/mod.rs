use std::sync::Arc;

use anyhow::{anyhow, Context as AnyhowContext, Result};
use lambda_runtime::{service_fn, LambdaEvent};

use crate::app::model::SnsEnvelope;
use crate::client::{aws, sns::SnsPublisher, ssm::SsmParameterStore};
use crate::config;
use context::AppContext;

////////////////////////////////////////////////////////////////////////////////

pub(crate) async fn run() -> Result<()> {
    // Config
    let config = config::load().context("Failed to load config")?;
    tracing::info!(?config, "App config");

    // AWS clients
    let sdk_config = aws::sdk_config(config.aws_role_arn.as_deref()).await;
    let parameter_store = Arc::new(SsmParameterStore::new(&sdk_config));
    let publisher = Arc::new(SnsPublisher::new(&sdk_config));

    // Context
    let context = Arc::new(AppContext::new(config, parameter_store, publisher));

    // Invocation loop
    lambda_runtime::run(service_fn(move |event: LambdaEvent<SnsEnvelope>| {
        let context = context.clone();

        async move {
            handler::handle(context.as_ref(), event.payload)
                .await
                .map_err(|err| {
                    tracing::error!(kind = err.kind(), "{}", err);
                    lambda_runtime::Error::from(err)
                })
        }
    }))
    .await
    .map_err(|err| anyhow!(err).context("Lambda runtime failed"))
}

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handler;
pub(crate) mod model;
pub(crate) mod route;
pub(crate) mod settings;
