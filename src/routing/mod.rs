//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     handler + declared arguments
//!     → route.rs (immutable Route, shared via Arc)
//!
//! Incoming Request (after the router picked a candidate route):
//!     → matcher.rs (RouteMatch with raw path variables, or a status match)
//!     → dispatch.rs (gather path/query values, fulfill until executable)
//!     → optional decorate (filters, error mapping)
//!     → execute → handler result
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Matches are per-request values; fulfillment returns new matches
//! - Path variables take precedence over query parameters
//! - No template matching here; the router supplies path variables

pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod route;

pub use dispatch::RouteDispatcher;
pub use error::{RouteError, RouteResult};
pub use matcher::{Executor, RouteMatch, Variables};
pub use route::{Handler, Route, RouteKind};
