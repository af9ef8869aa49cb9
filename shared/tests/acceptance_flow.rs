use crux_core::testing::AppTester;
use crux_http::protocol::{HttpResponse, HttpResult};
use proptest::prelude::*;
use valentine::capabilities::{ConfettiOperation, DelayOperation};
use valentine::config::DEFAULT_ENDPOINT;
use valentine::message::{LOVE_NOTES, PROMPT, TRANSPORT_FALLBACK, VALIDATION_FALLBACK};
use valentine::{
    App, Config, Effect, Event, MessageError, Model, RemoteConfig, RequestToken, Screen,
    Viewport, EVASION_PADDING,
};

fn static_model() -> Model {
    Model::with_seed(Config::static_messages(), 7)
}

fn remote_model() -> Model {
    let remote = RemoteConfig::new(DEFAULT_ENDPOINT, "test-key").unwrap();
    Model::with_seed(Config::remote(remote), 7)
}

#[test]
fn accepting_celebrates_and_waits_for_a_note() {
    let app = AppTester::<App, Effect>::default();
    let mut model = static_model();

    let update = app.update(Event::Accepted, &mut model);

    assert!(model.accepted);
    assert!(model.message_loading);
    assert!(model.message.is_none());
    assert_eq!(app.view(&model).screen, Screen::Celebration);

    let confetti = update.effects.iter().find_map(|e| match e {
        Effect::Celebrate(request) => Some(request.operation.clone()),
        _ => None,
    });
    assert_eq!(confetti, Some(ConfettiOperation::default()));

    let delay = update.effects.iter().find_map(|e| match e {
        Effect::Delay(request) => Some(request.operation),
        _ => None,
    });
    assert_eq!(delay, Some(DelayOperation { millis: 600 }));
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));
}

#[test]
fn elapsed_delay_commits_a_note_from_the_list() {
    let app = AppTester::<App, Effect>::default();
    let mut model = static_model();

    let update = app.update(Event::Accepted, &mut model);
    let mut delay = update
        .effects
        .into_iter()
        .find_map(|e| match e {
            Effect::Delay(request) => Some(request),
            _ => None,
        })
        .expect("accept should start the delay");

    let resolved = app.resolve(&mut delay, ()).expect("delay resolves");
    for event in resolved.events {
        app.update(event, &mut model);
    }

    assert!(!model.message_loading);
    let note = model.message.clone().expect("note committed");
    assert!(LOVE_NOTES.contains(&note.as_str()));
    assert_eq!(app.view(&model).message.as_deref(), Some(note.as_str()));
}

#[test]
fn only_the_latest_request_commits() {
    let app = AppTester::<App, Effect>::default();
    let mut model = static_model();

    app.update(Event::Accepted, &mut model);
    app.update(Event::Accepted, &mut model);
    assert_eq!(model.message_token, RequestToken(2));

    app.update(
        Event::MessageDelayElapsed {
            token: RequestToken(1),
        },
        &mut model,
    );
    assert!(model.message_loading);
    assert!(model.message.is_none());

    app.update(
        Event::MessageDelayElapsed {
            token: RequestToken(2),
        },
        &mut model,
    );
    assert!(!model.message_loading);
    assert!(model.message.is_some());
}

#[test]
fn remote_source_posts_one_generate_request() {
    let app = AppTester::<App, Effect>::default();
    let mut model = remote_model();

    let update = app.update(Event::Accepted, &mut model);

    let requests: Vec<_> = update
        .effects
        .iter()
        .filter_map(|e| match e {
            Effect::Http(request) => Some(&request.operation),
            _ => None,
        })
        .collect();
    assert_eq!(requests.len(), 1);

    let request = requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, DEFAULT_ENDPOINT);
    assert!(request
        .headers
        .iter()
        .any(|h| h.name.eq_ignore_ascii_case("x-goog-api-key") && h.value == "test-key"));

    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], PROMPT);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 30);

    assert!(!update.effects.iter().any(|e| matches!(e, Effect::Delay(_))));
}

/// Accepts with the remote source, answers the outgoing request with
/// `response` and feeds the result back in.
fn answer_generate_request(response: HttpResponse) -> Model {
    let app = AppTester::<App, Effect>::default();
    let mut model = remote_model();

    let update = app.update(Event::Accepted, &mut model);
    let mut request = update
        .effects
        .into_iter()
        .find_map(|e| match e {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .expect("accept should send a request");

    let resolved = app
        .resolve(&mut request, HttpResult::Ok(response))
        .expect("request resolves");
    for event in resolved.events {
        app.update(event, &mut model);
    }
    model
}

fn generated(text: &str) -> HttpResponse {
    let body = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    });
    HttpResponse::ok()
        .body(serde_json::to_vec(&body).unwrap())
        .build()
}

#[test]
fn http_answers_settle_to_the_right_text() {
    let cases = [
        (
            generated("You are my whole heart and home."),
            "You are my whole heart and home.",
        ),
        (generated("Ok."), VALIDATION_FALLBACK),
        (HttpResponse::status(500).build(), TRANSPORT_FALLBACK),
        (HttpResponse::status(429).build(), TRANSPORT_FALLBACK),
        (HttpResponse::ok().body(b"{}".to_vec()).build(), TRANSPORT_FALLBACK),
        (
            HttpResponse::ok().body(b"<html>busy</html>".to_vec()).build(),
            TRANSPORT_FALLBACK,
        ),
    ];

    for (response, expected) in cases {
        let model = answer_generate_request(response);
        assert_eq!(model.message.as_deref(), Some(expected));
        assert!(!model.message_loading);
    }
}

#[test]
fn remote_fragment_is_replaced_by_fallback() {
    let app = AppTester::<App, Effect>::default();
    let mut model = remote_model();
    app.update(Event::Accepted, &mut model);

    app.update(
        Event::RemoteMessageReceived {
            token: model.message_token,
            outcome: Ok("Ok.".into()),
        },
        &mut model,
    );

    assert_eq!(model.message.as_deref(), Some(VALIDATION_FALLBACK));
    assert!(!model.message_loading);
}

#[test]
fn remote_sentence_is_shown_unchanged() {
    let app = AppTester::<App, Effect>::default();
    let mut model = remote_model();
    app.update(Event::Accepted, &mut model);

    app.update(
        Event::RemoteMessageReceived {
            token: model.message_token,
            outcome: Ok("You are my whole heart and home.".into()),
        },
        &mut model,
    );

    assert_eq!(
        model.message.as_deref(),
        Some("You are my whole heart and home.")
    );
}

#[test]
fn remote_transport_failure_uses_fallback() {
    let app = AppTester::<App, Effect>::default();
    let mut model = remote_model();
    app.update(Event::Accepted, &mut model);

    app.update(
        Event::RemoteMessageReceived {
            token: model.message_token,
            outcome: Err(MessageError::Transport("network unreachable".into())),
        },
        &mut model,
    );

    assert_eq!(model.message.as_deref(), Some(TRANSPORT_FALLBACK));
    assert!(!model.message_loading);
}

#[test]
fn stale_remote_answer_is_ignored() {
    let app = AppTester::<App, Effect>::default();
    let mut model = remote_model();
    app.update(Event::Accepted, &mut model);
    let first = model.message_token;
    app.update(Event::Accepted, &mut model);

    let update = app.update(
        Event::RemoteMessageReceived {
            token: first,
            outcome: Ok("An answer nobody waits for.".into()),
        },
        &mut model,
    );

    assert!(model.message.is_none());
    assert!(model.message_loading);
    assert!(update.effects.is_empty());
}

#[test]
fn each_miss_grows_the_yes_button_and_moves_the_no_button() {
    let app = AppTester::<App, Effect>::default();
    let mut model = static_model();
    let viewport = Viewport::new(1280.0, 720.0);

    for n in 1..=25u32 {
        app.update(Event::PointerNear { viewport }, &mut model);
        let view = app.view(&model);
        assert!((view.yes_scale - (1.0 + 0.1 * f64::from(n))).abs() < 1e-9);

        let target = model.evasive_target;
        let half = EVASION_PADDING / 2.0;
        assert!(target.x >= half && target.x <= viewport.width - half);
        assert!(target.y >= half && target.y <= viewport.height - half);
        assert!((view.evasive_offset.x - (target.x - 640.0)).abs() < 1e-9);
    }
    assert_eq!(model.pointer_miss_count, 25);
}

#[test]
fn reset_returns_to_the_question_and_keeps_the_photo() {
    let app = AppTester::<App, Effect>::default();
    let mut model = static_model();
    let viewport = Viewport::new(800.0, 600.0);

    app.update(
        Event::PhotoSelected {
            media_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8, 0xff],
        },
        &mut model,
    );
    let photo = model.photo.clone();

    for _ in 0..4 {
        app.update(Event::PointerNear { viewport }, &mut model);
    }
    app.update(Event::Accepted, &mut model);
    app.update(Event::Reset, &mut model);

    assert!(!model.accepted);
    assert_eq!(model.pointer_miss_count, 0);
    assert_eq!(model.photo, photo);

    let view = app.view(&model);
    assert_eq!(view.screen, Screen::Question);
    assert!((view.yes_scale - 1.0).abs() < f64::EPSILON);
    assert_eq!((view.evasive_offset.x, view.evasive_offset.y), (0.0, 0.0));
}

#[test]
fn reset_from_fresh_state_is_harmless() {
    let app = AppTester::<App, Effect>::default();
    let mut model = static_model();

    let update = app.update(Event::Reset, &mut model);

    assert!(!model.accepted);
    assert_eq!(model.pointer_miss_count, 0);
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Render(_))));
}

#[derive(Debug, Clone)]
enum Step {
    Near { width: f64, height: f64 },
    Accept,
    Photo { image: bool },
    Heart,
    DelayElapsed(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0.0f64..3000.0, 0.0f64..3000.0).prop_map(|(width, height)| Step::Near { width, height }),
        Just(Step::Accept),
        any::<bool>().prop_map(|image| Step::Photo { image }),
        Just(Step::Heart),
        (0u64..6).prop_map(Step::DelayElapsed),
    ]
}

fn event_for(step: &Step) -> Event {
    match *step {
        Step::Near { width, height } => Event::PointerNear {
            viewport: Viewport::new(width, height),
        },
        Step::Accept => Event::Accepted,
        Step::Photo { image: true } => Event::PhotoSelected {
            media_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8, 0xff],
        },
        Step::Photo { image: false } => Event::PhotoSelected {
            media_type: "text/plain".into(),
            bytes: b"not a photo".to_vec(),
        },
        Step::Heart => Event::HeartTick,
        Step::DelayElapsed(token) => Event::MessageDelayElapsed {
            token: RequestToken(token),
        },
    }
}

proptest! {
    #[test]
    fn reset_always_returns_to_the_question(
        steps in proptest::collection::vec(step(), 0..40),
        seed in any::<u64>(),
    ) {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::with_seed(Config::static_messages(), seed);

        for step in &steps {
            app.update(event_for(step), &mut model);
        }
        let photo = model.photo.clone();

        app.update(Event::Reset, &mut model);

        prop_assert!(!model.accepted);
        prop_assert_eq!(model.pointer_miss_count, 0);
        prop_assert_eq!(&model.photo, &photo);
        prop_assert_eq!(app.view(&model).screen, Screen::Question);
    }
}
