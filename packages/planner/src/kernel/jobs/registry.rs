//! Event registry for dispatching job events to handlers.
//!
//! The registry maps event name strings (e.g., "ai/site.plan") to async
//! handlers. The worker loop decodes an event from the broker and dispatches
//! it here without knowing which domain owns it. An unregistered event name
//! is an error for the caller to log and drop; retry policy belongs to the
//! broker, not this layer.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use super::events::JobEvent;
use crate::domains::plans::PlanJobResult;
use crate::kernel::PlannerDeps;

/// Type alias for the async handler function.
///
/// Handlers take the event payload plus the dependency container and return
/// the job result that whoever inspects job completion sees.
type BoxedHandler = Box<
    dyn Fn(
            serde_json::Value,
            Arc<PlannerDeps>,
        ) -> Pin<Box<dyn Future<Output = Result<PlanJobResult>> + Send>>
        + Send
        + Sync,
>;

/// Registry that maps event names to handlers.
///
/// Each domain registers its event names at startup.
#[derive(Default)]
pub struct EventRegistry {
    registrations: HashMap<&'static str, BoxedHandler>,
}

impl EventRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            registrations: HashMap::new(),
        }
    }

    /// Register an event name with its handler.
    pub fn register<F, Fut>(&mut self, event_name: &'static str, handler: F)
    where
        F: Fn(serde_json::Value, Arc<PlannerDeps>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PlanJobResult>> + Send + 'static,
    {
        let boxed: BoxedHandler =
            Box::new(move |payload, deps| Box::pin(handler(payload, deps)));
        self.registrations.insert(event_name, boxed);
    }

    /// Dispatch an event to its registered handler.
    ///
    /// Returns an error if the event name is not registered or the handler
    /// itself fails.
    pub async fn dispatch(&self, event: &JobEvent, deps: Arc<PlannerDeps>) -> Result<PlanJobResult> {
        let handler = self
            .registrations
            .get(event.name.as_str())
            .ok_or_else(|| anyhow!("Unknown event name: {}", event.name))?;

        handler(event.data.clone(), deps).await
    }

    /// Check if an event name is registered.
    pub fn is_registered(&self, event_name: &str) -> bool {
        self.registrations.contains_key(event_name)
    }

    /// Get all registered event names.
    pub fn registered_events(&self) -> Vec<&'static str> {
        self.registrations.keys().copied().collect()
    }
}

/// Thread-safe registry wrapped in Arc.
pub type SharedEventRegistry = Arc<EventRegistry>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockAI, MockPlanStore};
    use crate::kernel::{AgentConfig, GenerationNetwork};

    fn test_deps() -> Arc<PlannerDeps> {
        let network = GenerationNetwork::new(
            "test",
            vec![AgentConfig::new("builder", "", "system", "model")],
            Arc::new(MockAI::new()),
            1,
        );
        Arc::new(PlannerDeps::new(
            Arc::new(network),
            Arc::new(MockPlanStore::new()),
        ))
    }

    #[test]
    fn register_and_check() {
        let mut registry = EventRegistry::new();
        registry.register("test/event", |_payload, _deps| async move {
            Ok(PlanJobResult::empty("test:v1", "input"))
        });

        assert!(registry.is_registered("test/event"));
        assert!(!registry.is_registered("unknown/event"));
        assert!(registry.registered_events().contains(&"test/event"));
    }

    #[tokio::test]
    async fn dispatch_routes_to_handler() {
        let mut registry = EventRegistry::new();
        registry.register("test/event", |_payload, _deps| async move {
            Ok(PlanJobResult::empty("test:v1", "hello"))
        });

        let event = JobEvent::new("test/event", serde_json::json!({}));
        let result = registry.dispatch(&event, test_deps()).await.unwrap();
        assert!(result.success);
        assert_eq!(result.input, "hello");
    }

    #[tokio::test]
    async fn dispatch_unknown_event_is_an_error() {
        let registry = EventRegistry::new();
        let event = JobEvent::new("no/such.event", serde_json::Value::Null);
        let err = registry.dispatch(&event, test_deps()).await.unwrap_err();
        assert!(err.to_string().contains("no/such.event"));
    }
}
