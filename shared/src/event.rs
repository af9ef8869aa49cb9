use serde::{Deserialize, Serialize};

use crate::error::MessageError;
use crate::evasion::Viewport;
use crate::model::RequestToken;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Lifecycle
    Startup,

    // Question screen
    Accepted,
    PointerNear { viewport: Viewport },
    Reset,

    // Photo
    PhotoSelected {
        media_type: String,
        #[serde(with = "serde_bytes")]
        bytes: Vec<u8>,
    },
    PhotoDisplayFailed,
    DragEntered,
    DragLeft,
    NoticeDismissed,

    // Decorations
    HeartTick,

    // Capability responses (already mapped to plain data)
    #[serde(skip)]
    StoredPhotoLoaded(Result<Option<Vec<u8>>, String>),
    #[serde(skip)]
    PhotoPersisted {
        token: RequestToken,
        result: Result<(), String>,
    },
    #[serde(skip)]
    MessageDelayElapsed { token: RequestToken },
    #[serde(skip)]
    RemoteMessageReceived {
        token: RequestToken,
        outcome: Result<String, MessageError>,
    },
}
