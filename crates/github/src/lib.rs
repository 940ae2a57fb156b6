//! Days-estimate GitHub infrastructure adapter.
//!
//! Implements the [`estimate::BoardGateway`] port for GitHub Projects (v2)
//! using the GraphQL API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. GraphQL
//! documents, cursor pagination, authentication, and response decoding are
//! handled here; the [`estimate`] and `reconcile` crates never see them.
//!
//! ## Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`transport`] | `GraphQlTransport` port and the `reqwest` client |
//! | [`queries`] | Resolution query, item listing query, field update mutation |
//! | [`board`] | `GitHubProjectBoard`, the `BoardGateway` implementation |

pub mod board;
pub mod queries;
pub mod transport;
mod wire;

pub use board::GitHubProjectBoard;
pub use transport::{
    GraphQlError, GraphQlTransport, HttpGraphQlClient, TransportConfig, TransportError,
    DEFAULT_GRAPHQL_URL,
};
