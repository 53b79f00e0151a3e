//! Developer profile service.
//!
//! Hexagonal layout: [`domain`] holds the profile aggregate, its ports, and
//! the service implementing them; [`inbound`] adapts HTTP requests onto the
//! driving ports; [`outbound`] provides PostgreSQL and in-memory stores.

#![warn(missing_docs)]

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
