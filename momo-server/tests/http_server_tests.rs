//! Router-level tests: every endpoint driven through `oneshot`

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use helpers::{install_background, sine_wav, test_state, FakeSpeech};
use http_body_util::BodyExt;
use momo_common::EmotionLabel;
use momo_mixer::AudioMixer;
use momo_server::build_router;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Router whose narration always succeeds
fn speaking_router(static_dir: &Path, emotion: EmotionLabel) -> axum::Router {
    build_router(test_state(static_dir, emotion, FakeSpeech::speaking(1.0)))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn profile() -> Value {
    json!({
        "gender": "woman",
        "age": "68",
        "occupation": "teacher",
        "relationship_with_person": "granddaughter",
        "how_you_refer_to_person": "Lily",
        "event_involving_person": "we baked bread together",
        "place_where_event_occured": "my kitchen",
        "visual_detail": "flour on her nose",
        "auditory_detail": "0",
        "tactile_detail": ""
    })
}

#[tokio::test]
async fn test_root_and_app_serve_html() {
    let dir = tempfile::tempdir().unwrap();

    for uri in ["/", "/app"] {
        let app = speaking_router(dir.path(), EmotionLabel::Positive);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.contains("text/html"), "{uri}: {content_type}");
    }
}

#[tokio::test]
async fn test_health_reports_wired_services() {
    let dir = tempfile::tempdir().unwrap();
    let app = speaking_router(dir.path(), EmotionLabel::Neutral);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["module"], "momo-server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["agents"]["emotion_analysis"], "fixed");
    assert_eq!(body["agents"]["poem_generation"], "fake-poet");
    assert_eq!(body["agents"]["music_recommendation"], "library");
    assert_eq!(body["agents"]["image_generation"], "unsplash");
    assert_eq!(body["features"]["tts"], true);
    assert_eq!(body["features"]["photorealistic_images"], false);
    assert!(body["build"]["git_hash"].is_string());
}

#[tokio::test]
async fn test_classify_emotion() {
    let dir = tempfile::tempdir().unwrap();
    let app = speaking_router(dir.path(), EmotionLabel::Negative);

    let request = post_json("/classify_emotion", json!({ "eeg_data": [0.1, 0.4] }));
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["emotion"], "negative");
    assert_eq!(body["confidence"], 1.0);
}

#[tokio::test]
async fn test_generate_poem_echoes_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let app = speaking_router(dir.path(), EmotionLabel::Neutral);

    let mut request = profile();
    request["emotion"] = json!("positive");
    let (status, body) = send(app, post_json("/generate_poem", request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["poem"], "Light on the water,\nyour hand in mine.");
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("I am a woman, 68 years old"));
    assert!(prompt.contains("I am feeling positive right now."));
    assert!(prompt.contains("I saw flour on her nose."));
    assert!(!prompt.contains("I heard"));
}

#[tokio::test]
async fn test_generate_poem_without_emotion_cheers_up() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(
        dir.path(),
        EmotionLabel::Neutral,
        FakeSpeech::speaking(1.0),
    ));

    let (status, body) = send(app, post_json("/generate_poem", profile())).await;

    assert_eq!(status, StatusCode::OK);
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("Please generate a modern poem to: cheer me up."));
    assert!(!prompt.contains("I am feeling"));
    assert!(!prompt.contains(EmotionLabel::Neutral.poem_instruction()));
}

#[tokio::test]
async fn test_mistyped_field_uses_error_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(
        dir.path(),
        EmotionLabel::Neutral,
        FakeSpeech::speaking(1.0),
    ));

    let mut user_data = profile();
    user_data["age"] = json!(70);
    let (status, body) = send(
        app,
        post_json(
            "/generate_complete_memory",
            json!({ "eeg_data": [], "user_data": user_data }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn test_unparseable_body_uses_error_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(
        dir.path(),
        EmotionLabel::Neutral,
        FakeSpeech::speaking(1.0),
    ));

    let request = Request::builder()
        .method("POST")
        .uri("/generate_poem")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_generate_complete_memory() {
    let dir = tempfile::tempdir().unwrap();
    let app = speaking_router(dir.path(), EmotionLabel::Positive);

    let (status, body) = send(
        app,
        post_json(
            "/generate_complete_memory",
            json!({ "eeg_data": [], "user_data": profile() }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["emotion"], "positive");
    assert_eq!(body["poem"], "Light on the water,\nyour hand in mine.");
    assert_eq!(body["processing_steps"], 4);

    let titles: Vec<&str> = EmotionLabel::Positive
        .music_library()
        .iter()
        .map(|track| track.title)
        .collect();
    assert!(titles.contains(&body["music"]["title"].as_str().unwrap()));

    assert!(body["image"]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://source.unsplash.com/1024x1024/?happiness,joy,peace,kitchen"));
    assert_eq!(body["image"]["description"], "Memory scene at my kitchen");
    assert!(body["image"]["prompt"].as_str().unwrap().contains("my kitchen"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_recommend_music_defaults_to_neutral() {
    let dir = tempfile::tempdir().unwrap();
    let app = speaking_router(dir.path(), EmotionLabel::Positive);

    let request = post_json("/recommend_music", json!({ "poem": "quiet rain" }));
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["service"], "library");
    assert_eq!(body["music_features"]["mood"], "calm and balanced");
    assert_eq!(
        body["explanation"],
        "Selected music that matches your neutral emotion with calm and balanced mood."
    );
}

#[tokio::test]
async fn test_generate_image() {
    let dir = tempfile::tempdir().unwrap();
    let app = speaking_router(dir.path(), EmotionLabel::Neutral);

    let (status, body) = send(
        app,
        post_json(
            "/generate_image",
            json!({ "emotion": "negative", "user_data": { "place_where_event_occured": "0" } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["service"], "unsplash");
    assert!(body["image_prompt"].as_str().unwrap().contains("a peaceful place"));
    assert!(body["image_url"]
        .as_str()
        .unwrap()
        .contains("reflection,contemplation,hope"));
}

#[tokio::test]
async fn test_narration_requires_poem() {
    let dir = tempfile::tempdir().unwrap();
    let app = speaking_router(dir.path(), EmotionLabel::Neutral);

    let request = post_json("/generate_narration", json!({ "poem": "  " }));
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "No poem provided");
}

#[tokio::test]
async fn test_narration_speech_failure_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path(), EmotionLabel::Neutral, FakeSpeech::failing()));

    let request = post_json(
        "/generate_narration",
        json!({ "poem": "a poem", "emotion": "neutral" }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["service"], "fake-tts");
    assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
}

#[tokio::test]
async fn test_narration_client_mix_plan_when_server_mixing_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = test_state(dir.path(), EmotionLabel::Neutral, FakeSpeech::speaking(1.0));
    state.mixer = Arc::new(
        AudioMixer::new(dir.path().join("audio/background"), reqwest::Client::new())
            .with_server_side(false),
    );
    let app = build_router(state);

    let request = post_json(
        "/generate_narration",
        json!({ "poem": "a poem", "emotion": "positive" }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "web_audio");
    assert_eq!(body["mixed"], false);
    assert_eq!(body["background_volume"], 0.3);
    assert_eq!(body["narration_volume"], 1.0);
    assert_eq!(
        body["background_music_url"],
        EmotionLabel::Positive.background_track().fallback_url
    );
    let encoded = body["narration_base64"].as_str().unwrap();
    let narration = STANDARD.decode(encoded).unwrap();
    assert_eq!(&narration[..4], b"RIFF");
}

#[cfg(feature = "server-mix")]
#[tokio::test]
async fn test_narration_mixed_server_side() {
    let dir = tempfile::tempdir().unwrap();
    let emotion = EmotionLabel::Negative;
    install_background(
        &dir.path().join("audio").join("background"),
        &emotion,
        &sine_wav(44_100, 2, 0.5, 220.0),
    );
    let app = build_router(test_state(dir.path(), emotion, FakeSpeech::speaking(2.0)));

    let request = post_json(
        "/generate_narration",
        json!({ "poem": "a poem", "emotion": "negative" }),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "server_side");
    assert_eq!(body["mixed"], true);
    assert_eq!(body["audio_format"], "mp3");
    assert_eq!(body["emotion"], "negative");
    assert!(!body["audio_base64"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_static_files_served_from_static_dir() {
    let dir = tempfile::tempdir().unwrap();
    install_background(
        &dir.path().join("audio").join("background"),
        &EmotionLabel::Positive,
        b"not really audio",
    );
    let app = speaking_router(dir.path(), EmotionLabel::Positive);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/audio/background/happy_background.mp3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"not really audio");
}
