//! Event Detail View Model

use std::sync::Arc;

use crate::client::AnomalyApi;
use crate::models::AnomalyEvent;

/// Detail page state
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Error(String),
    NotFound,
    Found(AnomalyEvent),
}

pub struct EventDetailViewModel {
    api: Arc<dyn AnomalyApi>,
    event_id: Option<String>,
    state: DetailState,
}

impl EventDetailViewModel {
    pub fn new(api: Arc<dyn AnomalyApi>) -> Self {
        Self {
            api,
            event_id: None,
            state: DetailState::Loading,
        }
    }

    pub fn event_id(&self) -> Option<&str> {
        self.event_id.as_deref()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Point the view at an event. Fetches only when the id changes.
    pub async fn set_event_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.event_id.as_deref() == Some(id.as_str()) {
            return;
        }
        self.event_id = Some(id);
        self.load().await;
    }

    /// Fetch the current id again
    pub async fn reload(&mut self) {
        self.load().await;
    }

    async fn load(&mut self) {
        let Some(id) = self.event_id.clone() else {
            return;
        };
        self.state = DetailState::Loading;

        self.state = match self.api.get_event(&id).await {
            Ok(event) => DetailState::Found(event),
            Err(e) if e.is_not_found() => {
                tracing::debug!(event_id = %id, "Event not found");
                DetailState::NotFound
            }
            Err(e) => {
                tracing::warn!(event_id = %id, error = %e, "Failed to load event");
                DetailState::Error(e.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockApi;

    #[tokio::test]
    async fn test_found() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventDetailViewModel::new(api.clone());
        assert_eq!(vm.state(), &DetailState::Loading);

        vm.set_event_id("evt-3").await;
        match vm.state() {
            DetailState::Found(event) => assert_eq!(event.id, "evt-3"),
            other => panic!("unexpected state: {:?}", other),
        }
        assert_eq!(vm.event_id(), Some("evt-3"));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventDetailViewModel::new(api);
        vm.set_event_id("missing").await;
        assert_eq!(vm.state(), &DetailState::NotFound);
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let api = Arc::new(MockApi::new());
        api.fail("get_event");
        let mut vm = EventDetailViewModel::new(api.clone());
        vm.set_event_id("evt-1").await;
        assert!(matches!(vm.state(), DetailState::Error(msg) if msg.contains("get_event")));

        api.recover();
        vm.reload().await;
        assert!(matches!(vm.state(), DetailState::Found(_)));
    }

    #[tokio::test]
    async fn test_same_id_fetches_once() {
        let api = Arc::new(MockApi::new());
        let mut vm = EventDetailViewModel::new(api.clone());
        vm.set_event_id("evt-1").await;
        vm.set_event_id("evt-1").await;
        assert_eq!(api.count("get_event"), 1);

        vm.set_event_id("evt-2").await;
        assert_eq!(api.count("get_event"), 2);
    }
}
