//! Core logic for the EggLedger admin dashboard.
//! Records, validation, stats, modal state and action routing live here;
//! hosts only supply a `DisplaySurface`.

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod modal;
pub mod model;
pub mod module;
pub mod render;
pub mod router;
pub mod stats;
pub mod store;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use dashboard::Dashboard;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use modal::{ModalKind, ModalState};
pub use model::customer::Customer;
pub use model::inventory::{InventoryEntry, TrayType};
pub use model::record::{DomainRecord, FormDate, ModuleKind, RecordId, StoredRecord};
pub use model::sale::{format_amount, Sale, SaleKind, EGGS_PER_TRAY};
pub use module::{AdminModule, Outcome, PendingRecord};
pub use render::{
    DetailField, DisplaySurface, ModalBody, Notice, NoticeKind, RecordingSurface, StatTile,
    TableRow,
};
pub use router::{
    parse_action_kind, route, ActionKind, ClickTarget, Command, ElementMarker, FormSubmission,
    RouteError, UiEvent,
};
pub use stats::{summarize, NoCategory, Stats, Summarize};
pub use store::{RecordStore, StoreError, StoreResult};
pub use validate::{FailureReason, FormInput, ValidationFailure};

/// Minimal health-check API for host wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
