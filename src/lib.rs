//! WikiSpace reading proxy library

// Core subsystems
pub mod config;
pub mod http;
pub mod origin;
pub mod transform;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use transform::transform_page;
