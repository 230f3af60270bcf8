use async_trait::async_trait;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher records catalog changes as structured tracing events.
#[derive(Debug)]
pub struct LogPublisher {
    branch_id: String,
}

impl LogPublisher {
    pub fn new(branch_id: &str) -> Self {
        Self {
            branch_id: branch_id.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let json = serde_json::to_string(event)?;
        info!(
            branch = self.branch_id.as_str(),
            event_id = event.event_id.as_str(),
            kind = ?event.kind,
            key = event.key.as_str(),
            "{}", json);
        Ok(())
    }
}
