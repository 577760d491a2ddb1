//! HTTP host glue built on `may_minihttp`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::capture_request;
pub use response::{write_json_error, write_reply, CONTENT_TYPE_JSON};
pub use service::AppService;
