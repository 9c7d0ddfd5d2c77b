use std::sync::Arc;

use reqwest::Client;

use crate::{
    app::route::NextServiceMap,
    client::{sns::Publisher, ssm::ParameterStore},
    config::Config,
};

///////////////////////////////////////////////////////////////////////////////

/// Collaborators shared by every invocation of a warm process.
pub(crate) trait GlobalContext: Sync + Send {
    fn config(&self) -> &Config;
    fn parameter_store(&self) -> &dyn ParameterStore;
    fn publisher(&self) -> &dyn Publisher;
    fn http(&self) -> &Client;
    fn routes(&self) -> &NextServiceMap;
}

///////////////////////////////////////////////////////////////////////////////

#[derive(Clone)]
pub(crate) struct AppContext {
    config: Arc<Config>,
    parameter_store: Arc<dyn ParameterStore>,
    publisher: Arc<dyn Publisher>,
    http: Client,
    routes: NextServiceMap,
}

impl AppContext {
    pub(crate) fn new(
        config: Config,
        parameter_store: Arc<dyn ParameterStore>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            parameter_store,
            publisher,
            http: Client::new(),
            routes: NextServiceMap::default(),
        }
    }
}

impl GlobalContext for AppContext {
    fn config(&self) -> &Config {
        &self.config
    }

    fn parameter_store(&self) -> &dyn ParameterStore {
        self.parameter_store.as_ref()
    }

    fn publisher(&self) -> &dyn Publisher {
        self.publisher.as_ref()
    }

    fn http(&self) -> &Client {
        &self.http
    }

    fn routes(&self) -> &NextServiceMap {
        &self.routes
    }
}
