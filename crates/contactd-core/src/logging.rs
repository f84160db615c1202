//! Shared tracing targets and field values for contactd crates.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Server cannot continue (bind failure, bad config) |
//! | WARN  | Request rejected for a reason a test author should notice |
//! | INFO  | Lifecycle events, directory mutations, exchange journal lines |
//! | DEBUG | Decision points (filters applied, idempotent no-ops) |
//! | TRACE | Per-item iteration |

/// Value of the `subsystem` field on directory events.
pub const SUBSYSTEM_DIRECTORY: &str = "directory";

/// Target of the request/response journal. Routed to its own file when
/// `REQUEST_LOG` is configured.
pub const EXCHANGE_TARGET: &str = "exchange";
