use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, ConfettiOperation};
use crate::config::{MessageSource, RemoteConfig};
use crate::error::{MessageError, PhotoError};
use crate::evasion::EvasiveTarget;
use crate::event::Event;
use crate::message::{self, GenerateRequest, GenerateResponse};
use crate::model::{Model, RequestToken};
use crate::photo::{PhotoRef, FALLBACK_PHOTO_URL, PHOTO_STORAGE_KEY};
use crate::view::{Offset, Screen, ViewModel};

#[derive(Default)]
pub struct App;

impl App {
    fn request_message(model: &mut Model, caps: &Capabilities) {
        let token = model.message_token;
        let failure = match &model.config.message_source {
            MessageSource::Static { delay } => {
                caps.delay.start(*delay, Event::MessageDelayElapsed { token });
                None
            }
            MessageSource::Remote(remote) => Self::send_generate_request(remote, token, caps).err(),
        };

        if let Some(e) = failure {
            Self::commit_message(model, token, message::settle(Err(e)));
        }
    }

    fn send_generate_request(
        remote: &RemoteConfig,
        token: RequestToken,
        caps: &Capabilities,
    ) -> Result<(), MessageError> {
        let body = serde_json::to_vec(&GenerateRequest::for_note(remote))
            .map_err(|e| MessageError::Transport(e.to_string()))?;

        caps.http
            .post(remote.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", remote.api_key())
            .body(body)
            .expect_json::<GenerateResponse>()
            .send(move |result| Event::RemoteMessageReceived {
                token,
                outcome: message::from_http(result),
            });
        Ok(())
    }

    /// Stores `text` if `token` is still the latest request.
    fn commit_message(model: &mut Model, token: RequestToken, text: String) -> bool {
        if token != model.message_token {
            debug!(
                stale = token.0,
                current = model.message_token.0,
                "dropping superseded message"
            );
            return false;
        }
        model.message = Some(text);
        model.message_loading = false;
        true
    }

    fn apply_photo(model: &mut Model, photo: PhotoRef, caps: &Capabilities) {
        model.photo = photo;
        model.photo_broken = false;
        model.notice = None;
        model.photo_write = model.photo_write.next();

        match model.photo.to_stored() {
            Ok(Some(bytes)) => {
                let token = model.photo_write;
                caps.kv.set(PHOTO_STORAGE_KEY.to_string(), bytes, move |result| {
                    Event::PhotoPersisted {
                        token,
                        result: result.map(|_| ()).map_err(|e| e.to_string()),
                    }
                });
            }
            Ok(None) => {}
            Err(e) => Self::photo_not_saved(model, &e),
        }
    }

    fn photo_not_saved(model: &mut Model, error: &PhotoError) {
        warn!(error = %error, "photo kept for this session only");
        model.notice = error.user_facing_message();
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        match event {
            Event::Startup => {
                caps.kv.get(PHOTO_STORAGE_KEY.to_string(), |result| {
                    Event::StoredPhotoLoaded(result.map_err(|e| e.to_string()))
                });
                return;
            }

            Event::StoredPhotoLoaded(Ok(Some(raw))) => match PhotoRef::from_stored(&raw) {
                // A photo picked while the read was in flight wins.
                Ok(photo) if model.photo == PhotoRef::Default => {
                    info!("restored saved photo");
                    model.photo = photo;
                    model.photo_broken = false;
                }
                Ok(_) => debug!("saved photo superseded by a newer pick"),
                Err(e) => warn!(error = %e, "ignoring saved photo"),
            },
            Event::StoredPhotoLoaded(Ok(None)) => {
                debug!("no saved photo, using default");
                return;
            }
            Event::StoredPhotoLoaded(Err(e)) => {
                warn!(error = %e, "could not read saved photo");
                return;
            }

            Event::Accepted => {
                model.accepted = true;
                model.message_loading = true;
                model.message_token = model.message_token.next();
                caps.celebrate.confetti(ConfettiOperation::default());
                Self::request_message(model, caps);
            }

            Event::MessageDelayElapsed { token } => {
                if token != model.message_token {
                    debug!(stale = token.0, "dropping superseded note");
                    return;
                }
                let note = message::pick_note(&mut model.rng).to_string();
                Self::commit_message(model, token, note);
            }

            Event::RemoteMessageReceived { token, outcome } => {
                if !Self::commit_message(model, token, message::settle(outcome)) {
                    return;
                }
            }

            Event::PointerNear { viewport } => {
                model.evasive_target = EvasiveTarget::random(viewport, &mut model.rng);
                model.pointer_miss_count = model.pointer_miss_count.saturating_add(1);
            }

            Event::Reset => {
                model.accepted = false;
                model.pointer_miss_count = 0;
                model.evasive_target = EvasiveTarget::default();
            }

            Event::PhotoSelected { media_type, bytes } => {
                model.drag_active = false;
                match PhotoRef::from_upload(&media_type, &bytes) {
                    Ok(photo) => Self::apply_photo(model, photo, caps),
                    Err(e) => debug!(error = %e, "ignoring dropped file"),
                }
            }

            Event::PhotoPersisted { result: Ok(()), .. } => {
                debug!("photo saved");
                return;
            }
            Event::PhotoPersisted {
                token,
                result: Err(e),
            } => {
                if token != model.photo_write {
                    debug!(stale = token.0, error = %e, "ignoring failed write of a replaced photo");
                    return;
                }
                Self::photo_not_saved(model, &PhotoError::Storage(e));
            }

            Event::PhotoDisplayFailed => {
                if model.photo_broken {
                    return;
                }
                warn!("photo failed to load, showing fallback");
                model.photo_broken = true;
            }

            Event::DragEntered => model.drag_active = true,
            Event::DragLeft => model.drag_active = false,
            Event::NoticeDismissed => model.notice = None,

            Event::HeartTick => {
                model.hearts.spawn(&mut model.rng);
            }
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        let photo_src = if model.photo_broken {
            FALLBACK_PHOTO_URL.to_string()
        } else {
            model.photo.src().to_string()
        };

        ViewModel {
            screen: if model.accepted {
                Screen::Celebration
            } else {
                Screen::Question
            },
            yes_scale: model.yes_scale(),
            evasive_offset: Offset {
                x: model.evasive_target.offset_x,
                y: model.evasive_target.offset_y,
            },
            photo_src,
            drag_active: model.drag_active,
            message_loading: model.message_loading,
            message: model.message.clone(),
            notice: model.notice.clone(),
            hearts: model.hearts.iter().copied().collect(),
        }
    }
}
