mod http;

pub use self::http::{Http, HttpError, HttpResult, RequestBuilder, ValidatedUrl};

/// Crux's built-in Render capability covers view updates as is.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
