pub mod config;
pub mod exception;
pub mod handler;
pub mod mime;
pub mod param;
pub mod path;
pub mod request;
pub mod response;
pub mod server;
pub mod template;
pub mod util;

pub use config::Config;
pub use exception::Exception;
pub use handler::{Outcome, RequestHandler};
pub use mime::mime_type;
pub use param::{HttpRequestMethod, HttpVersion};
pub use path::{PathKind, PathResolver, ResolvedPath};
pub use request::Request;
pub use response::Response;
pub use util::HtmlBuilder;
