use fitwell::wellness::{EngineConfig, InMemoryWellnessStore, WellnessService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wellness service backed by the process-local store.
pub(crate) fn in_memory_service(
    engine: EngineConfig,
) -> Arc<WellnessService<InMemoryWellnessStore>> {
    let store = Arc::new(InMemoryWellnessStore::new());
    Arc::new(WellnessService::new(store, engine))
}
