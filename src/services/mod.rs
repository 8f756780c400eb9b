mod disk_sink;
mod http_api;

pub use disk_sink::DiskSink;
pub use http_api::{HttpFileApi, DEFAULT_BASE_URL};
