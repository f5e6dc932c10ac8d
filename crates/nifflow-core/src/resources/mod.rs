pub mod http;
pub mod templates;

pub use http::{HttpTransport, ReqwestTransport};
pub use templates::TemplateEngine;
