use thiserror::Error;

/// Errors produced by the widget registry and the navigation controller.
///
/// Registry errors are fatal during startup registration; navigation errors
/// raised after startup are surfaced as a status-line message by the shell
/// and leave the controller state unchanged.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("no widget registered under id `{0}`")]
    NotFound(String),

    #[error("widget id `{0}` is already registered")]
    DuplicateId(String),

    #[error("navigation requested before any widget was activated")]
    NotActivated,

    #[error("widget `{id}` failed to activate")]
    Activation {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
