//! Navigation seam for form flows

/// Requests a route change from the surrounding shell.
///
/// The create flow calls this exactly once, with the collection route, after
/// a successful submit. What "navigating" means belongs to the host: a
/// router push in a UI shell, a redirect in a web tier, a log line in a demo.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator that records the request in the log and nothing else
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!(%route, "navigation requested");
    }
}
