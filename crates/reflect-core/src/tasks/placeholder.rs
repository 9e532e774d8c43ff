//! Message types that are reflected as outgoing but need no local processing

use reflect_storage_traits::ReflectStorageProvider;

use super::{OutgoingMessageHandler, Result, TaskBase};

/// Logs the message and does nothing else
#[derive(Debug, Clone)]
pub struct PlaceholderHandler {
    log_message: String,
}

impl PlaceholderHandler {
    /// Create a placeholder that logs `log_message` when processed
    pub fn new<M>(log_message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            log_message: log_message.into(),
        }
    }

    /// The message logged when processed
    pub fn log_message(&self) -> &str {
        &self.log_message
    }
}

impl<S> OutgoingMessageHandler<S> for PlaceholderHandler
where
    S: ReflectStorageProvider,
{
    fn store_nonces(&self) -> bool {
        false
    }

    fn should_bump_last_update(&self) -> bool {
        false
    }

    fn process_outgoing_message(&self, _task: &TaskBase<'_, S>) -> Result<()> {
        tracing::info!(target: "reflect_core::tasks::placeholder", "{}", self.log_message);
        Ok(())
    }
}
