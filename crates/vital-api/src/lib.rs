mod error;
pub use error::ApiError;

mod handler;
pub use handler::{HealthReport, ServiceInfo, StaticStatus, StatusHandler};

mod http;
pub use http::HttpApi;

mod middleware;
pub use middleware::{RequestId, request_id_layer};
