use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::sns::{Publisher, StartServiceMessage};

#[derive(Clone, Default)]
pub(crate) struct TestPublisher {
    messages: Arc<Mutex<Vec<(String, StartServiceMessage)>>>,
    fail: bool,
}

impl TestPublisher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Published messages as (topic ARN, message) pairs.
    pub(crate) fn messages(&self) -> Vec<(String, StartServiceMessage)> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl Publisher for TestPublisher {
    async fn publish(&self, topic_arn: &str, message: &StartServiceMessage) -> anyhow::Result<()> {
        if self.fail {
            bail!("topic {} does not exist", topic_arn);
        }

        self.messages
            .lock()
            .push((topic_arn.to_owned(), message.to_owned()));

        Ok(())
    }
}
