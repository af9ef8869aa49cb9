// Headless core of the Valentine card page. The browser shell sends `Event`s,
// performs the requested effects and renders the `ViewModel`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod evasion;
pub mod event;
pub mod hearts;
pub mod message;
pub mod model;
pub mod photo;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{Config, MessageSource, RemoteConfig};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{MessageError, PhotoError, RejectReason};
pub use evasion::{EvasiveTarget, Viewport, EVASION_PADDING};
pub use event::Event;
pub use model::{Model, RequestToken};
pub use photo::PhotoRef;
pub use view::{Screen, ViewModel};

/// Encoded photos above this size are not written to storage; browsers cap
/// local storage at roughly 5 MB per origin.
pub const MAX_PERSISTED_PHOTO_BYTES: usize = 4 * 1024 * 1024;
