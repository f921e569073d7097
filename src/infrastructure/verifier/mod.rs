//! URL reachability verification over HTTP

pub mod http;

pub use http::HttpUrlVerifier;
