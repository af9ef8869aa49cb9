mod celebrate;
mod delay;

pub use self::celebrate::{Celebrate, ConfettiOperation, CONFETTI_COLORS};
pub use self::delay::{Delay, DelayOperation};

// Crux's built-in Render covers view updates; no wrapper needed.
pub use crux_core::render::Render;
pub use crux_http::Http;
pub use crux_kv::KeyValue;

// The Effect derive names `App` in its expansion.
use crate::app::App;
use crate::event::Event;

// Field types are spelled out: the Effect derive names its variants after them.
#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub kv: KeyValue<Event>,
    pub render: Render<Event>,
    pub delay: Delay<Event>,
    pub celebrate: Celebrate<Event>,
}
