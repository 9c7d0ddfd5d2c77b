use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::ssm::{Parameter, ParameterStore};

/// In-memory parameter store. Only parameters directly under the requested path are
/// returned, like a non-recursive SSM lookup.
#[derive(Clone, Default)]
pub(crate) struct TestParameterStore {
    parameters: Vec<Parameter>,
    requested_paths: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl TestParameterStore {
    pub(crate) fn new<N, V>(parameters: Vec<(N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            parameters: parameters
                .into_iter()
                .map(|(name, value)| Parameter {
                    name: name.into(),
                    value: value.into(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn requested_paths(&self) -> Vec<String> {
        self.requested_paths.lock().clone()
    }
}

#[async_trait]
impl ParameterStore for TestParameterStore {
    async fn parameters_by_path(&self, path: &str) -> anyhow::Result<Vec<Parameter>> {
        self.requested_paths.lock().push(path.to_owned());

        if self.fail {
            bail!("AccessDeniedException: not authorized to perform ssm:GetParametersByPath");
        }

        let path = path.trim_end_matches('/');

        Ok(self
            .parameters
            .iter()
            .filter(|param| {
                param
                    .name
                    .rsplit_once('/')
                    .map_or(false, |(parent, _)| parent == path)
            })
            .cloned()
            .collect())
    }
}
