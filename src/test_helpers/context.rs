use reqwest::Client;

use crate::{
    app::{context::GlobalContext, route::NextServiceMap},
    client::{sns::Publisher, ssm::ParameterStore},
    config::Config,
};

use super::{message_publisher::TestPublisher, parameter_store::TestParameterStore, TOPIC_ARN};

///////////////////////////////////////////////////////////////////////////////

const ENV: &str = "dev";
const APP_CONFIG_PATH: &str = "digital_ingest_notifications";

fn build_config() -> Config {
    Config {
        env: ENV.to_owned(),
        app_config_path: APP_CONFIG_PATH.to_owned(),
        aws_role_arn: None,
    }
}

///////////////////////////////////////////////////////////////////////////////

#[derive(Clone)]
pub(crate) struct TestContext {
    config: Config,
    parameter_store: TestParameterStore,
    publisher: TestPublisher,
    http: Client,
    routes: NextServiceMap,
}

impl TestContext {
    /// Context whose remote configuration points the Zodiac API at `zodiac_baseurl`.
    pub(crate) fn new(zodiac_baseurl: &str) -> Self {
        let config = build_config();
        let path = config.parameter_path();

        let parameter_store = TestParameterStore::new(vec![
            (format!("{}/ZODIAC_BASEURL", path), zodiac_baseurl.to_owned()),
            (format!("{}/SERVICE_START_SNS_TOPIC", path), TOPIC_ARN.to_owned()),
        ]);

        Self::with_parameter_store(parameter_store)
    }

    pub(crate) fn with_parameter_store(parameter_store: TestParameterStore) -> Self {
        Self {
            config: build_config(),
            parameter_store,
            publisher: TestPublisher::new(),
            http: Client::new(),
            routes: NextServiceMap::default(),
        }
    }

    pub(crate) fn set_publisher(&mut self, publisher: TestPublisher) {
        self.publisher = publisher;
    }

    pub(crate) fn test_publisher(&self) -> &TestPublisher {
        &self.publisher
    }

    pub(crate) fn test_parameter_store(&self) -> &TestParameterStore {
        &self.parameter_store
    }
}

impl GlobalContext for TestContext {
    fn config(&self) -> &Config {
        &self.config
    }

    fn parameter_store(&self) -> &dyn ParameterStore {
        &self.parameter_store
    }

    fn publisher(&self) -> &dyn Publisher {
        &self.publisher
    }

    fn http(&self) -> &Client {
        &self.http
    }

    fn routes(&self) -> &NextServiceMap {
        &self.routes
    }
}

