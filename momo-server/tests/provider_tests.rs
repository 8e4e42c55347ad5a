//! Provider adapters against local stub servers

mod helpers;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use helpers::{captured, spawn_stub, stub_credentials};
use momo_common::config::{DalleSettings, ProviderCredentials};
use momo_common::EmotionLabel;
use momo_server::services::image::{DalleImages, SdxlImages, StabilityImages};
use momo_server::services::music::{MusicGen, MusicProvider, SmartMusic, StableAudio, Suno};
use momo_server::services::replicate::PollPolicy;
use momo_server::services::speech::OpenAiSpeech;
use momo_server::services::{
    DeepSeekPoet, ProviderError, TextGenerator, TextToImage, TextToMusic, TextToSpeech,
    POEM_APOLOGY,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const FAST_POLL: PollPolicy = PollPolicy {
    interval: Duration::from_millis(10),
    max_wait: Duration::from_secs(2),
};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Stub answering every request to `path` with `status` and `body`
async fn fixed_stub(path: &str, status: StatusCode, body: Value) -> String {
    let router = Router::new().route(
        path,
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    spawn_stub(router).await
}

/// Replicate stub: prediction starts, stays `processing` for `pending`
/// polls, then ends with `terminal`
async fn replicate_stub(pending: usize, terminal: Value) -> (String, Arc<AtomicUsize>) {
    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();
    let router = Router::new()
        .route(
            "/predictions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Token test-key");
                assert!(body["version"].is_string());
                Json(json!({ "id": "pred-1", "status": "starting" }))
            }),
        )
        .route(
            "/predictions/pred-1",
            get(move || {
                let counter = counter.clone();
                let terminal = terminal.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    if n < pending {
                        Json(json!({ "id": "pred-1", "status": "processing" }))
                    } else {
                        Json(terminal)
                    }
                }
            }),
        );
    (spawn_stub(router).await, polls)
}

#[tokio::test]
async fn test_deepseek_returns_first_choice() {
    let requests = captured();
    let sink = requests.clone();
    let router = Router::new().route(
        "/chat/completions",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                assert_eq!(headers["authorization"], "Bearer test-key");
                sink.lock().unwrap().push(body);
                Json(json!({
                    "choices": [{ "message": { "content": "Bread and flour,\nmorning light." } }]
                }))
            }
        }),
    );
    let base = spawn_stub(router).await;

    let poet = DeepSeekPoet::new(client(), &stub_credentials(&base));
    let poem = poet.generate("write me a poem").await.unwrap();

    assert_eq!(poem, "Bread and flour,\nmorning light.");
    let body = requests.lock().unwrap()[0].clone();
    assert_eq!(body["model"], "deepseek-reasoner");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "write me a poem");
}

#[tokio::test]
async fn test_deepseek_error_status_falls_back_to_apology() {
    let base = fixed_stub(
        "/chat/completions",
        StatusCode::SERVICE_UNAVAILABLE,
        json!({ "error": "busy" }),
    )
    .await;

    let poet = DeepSeekPoet::new(client(), &stub_credentials(&base));
    let fallback = poet.generate("write").await.unwrap_err();

    assert_eq!(fallback.value, POEM_APOLOGY);
    let message = &fallback.message;
    assert!(message.starts_with("API error 503"), "{message}");
}

#[tokio::test]
async fn test_dalle_enhances_prompt_and_returns_url() {
    let requests = captured();
    let sink = requests.clone();
    let router = Router::new().route(
        "/images/generations",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(body);
                Json(json!({
                    "data": [{ "url": "https://images.test/1.png", "revised_prompt": "revised" }]
                }))
            }
        }),
    );
    let base = spawn_stub(router).await;

    let dalle = DalleImages::new(
        client(),
        &stub_credentials(&base),
        &DalleSettings::default(),
    );
    let image = dalle
        .generate("a kitchen", &EmotionLabel::Positive)
        .await
        .unwrap();

    assert_eq!(image.image_url, "https://images.test/1.png");
    assert_eq!(image.revised_prompt.as_deref(), Some("revised"));
    assert_eq!(image.service, "dall-e");
    let body = requests.lock().unwrap()[0].clone();
    assert_eq!(body["model"], "dall-e-3");
    assert_eq!(body["style"], "natural");
    let sent = body["prompt"].as_str().unwrap();
    assert!(sent.starts_with(
        "A highly detailed photorealistic photograph, a kitchen, warm natural lighting"
    ));
}

#[tokio::test]
async fn test_dalle_failure_uses_placeholder() {
    let base = fixed_stub(
        "/images/generations",
        StatusCode::BAD_REQUEST,
        json!({ "error": { "message": "content policy" } }),
    )
    .await;

    let dalle = DalleImages::new(
        client(),
        &stub_credentials(&base),
        &DalleSettings::default(),
    );
    let fallback = dalle
        .generate("a kitchen", &EmotionLabel::Negative)
        .await
        .unwrap_err();

    assert_eq!(
        fallback.value.image_url,
        "https://source.unsplash.com/1024x1024/?reflection,hope,healing"
    );
    assert_eq!(fallback.value.service, "dall-e");
    assert!(fallback.message.contains("400"));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    // Port 9 (discard) is never contacted when the key check fails first
    let credentials = ProviderCredentials {
        api_key: None,
        base_url: Some("http://127.0.0.1:9".to_string()),
    };

    let fallback = StabilityImages::new(client(), &credentials, "sdxl")
        .generate("a beach", &EmotionLabel::Neutral)
        .await
        .unwrap_err();

    assert_eq!(fallback.message, "API key not configured for Stability AI");
}

#[tokio::test]
async fn test_stability_returns_data_url() {
    let router = Router::new().route(
        "/v1/generation/test-engine/text-to-image",
        post(|Json(body): Json<Value>| async move {
            let text = body["text_prompts"][0]["text"].as_str().unwrap();
            let style = ", natural colors, balanced lighting, peaceful scene";
            assert!(text.ends_with(style), "{text}");
            Json(json!({ "artifacts": [{ "base64": "iVBORw0KGgo=" }] }))
        }),
    );
    let base = spawn_stub(router).await;

    let stability = StabilityImages::new(client(), &stub_credentials(&base), "test-engine");
    let image = stability
        .generate("a beach", &EmotionLabel::Neutral)
        .await
        .unwrap();

    assert_eq!(image.image_url, "data:image/png;base64,iVBORw0KGgo=");
    assert_eq!(image.service, "stability-ai");
}

#[tokio::test]
async fn test_sdxl_polls_until_succeeded() {
    let (base, polls) = replicate_stub(
        2,
        json!({
            "id": "pred-1",
            "status": "succeeded",
            "output": ["https://replicate.test/out.png"]
        }),
    )
    .await;

    let sdxl = SdxlImages::new(client(), &stub_credentials(&base)).with_poll_policy(FAST_POLL);
    let image = sdxl
        .generate("a park", &EmotionLabel::Positive)
        .await
        .unwrap();

    assert_eq!(image.image_url, "https://replicate.test/out.png");
    assert_eq!(image.service, "replicate");
    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_sdxl_failed_prediction_falls_back() {
    let (base, _) = replicate_stub(
        0,
        json!({ "id": "pred-1", "status": "failed", "error": "NSFW content detected" }),
    )
    .await;

    let sdxl = SdxlImages::new(client(), &stub_credentials(&base)).with_poll_policy(FAST_POLL);
    let fallback = sdxl
        .generate("a park", &EmotionLabel::Positive)
        .await
        .unwrap_err();

    assert_eq!(fallback.message, "Prediction failed: NSFW content detected");
    assert!(fallback.value.image_url.ends_with("?happiness,joy,peace"));
}

#[tokio::test]
async fn test_musicgen_times_out() {
    let (base, _) = replicate_stub(usize::MAX, json!({})).await;
    let policy = PollPolicy {
        interval: Duration::from_millis(10),
        max_wait: Duration::from_millis(60),
    };

    let musicgen = MusicGen::new(client(), &stub_credentials(&base)).with_poll_policy(policy);
    let fallback = musicgen
        .generate("", &EmotionLabel::Negative, 30)
        .await
        .unwrap_err();

    let message = &fallback.message;
    assert!(message.starts_with("Prediction timed out"), "{message}");
    assert_eq!(fallback.value.service, "musicgen");
    assert!(EmotionLabel::Negative
        .music_library()
        .iter()
        .any(|track| track.title == fallback.value.title));
}

#[tokio::test]
async fn test_musicgen_success_titles_track() {
    let (base, _) = replicate_stub(
        0,
        json!({
            "id": "pred-1",
            "status": "succeeded",
            "output": "https://replicate.test/song.wav"
        }),
    )
    .await;

    let musicgen = MusicGen::new(client(), &stub_credentials(&base)).with_poll_policy(FAST_POLL);
    let track = musicgen
        .generate("", &EmotionLabel::Positive, 20)
        .await
        .unwrap();

    assert_eq!(track.title, "Positive Memory Music");
    assert_eq!(track.url, "https://replicate.test/song.wav");
    assert_eq!(track.duration, Some(20));
}

#[tokio::test]
async fn test_stable_audio_caps_duration_and_inlines_audio() {
    let requests = captured();
    let sink = requests.clone();
    let router = Router::new().route(
        "/v2beta/stable-audio/generate/music",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(body);
                Json(json!({ "audio": "SUQz" }))
            }
        }),
    );
    let base = spawn_stub(router).await;

    let stable_audio = StableAudio::new(client(), &stub_credentials(&base));
    let track = stable_audio
        .generate("", &EmotionLabel::Neutral, 90)
        .await
        .unwrap();

    assert_eq!(track.url, "data:audio/mp3;base64,SUQz");
    assert_eq!(track.duration, Some(47));
    let body = requests.lock().unwrap()[0].clone();
    assert_eq!(body["duration"], 47);
    assert_eq!(body["output_format"], "mp3");
}

#[tokio::test]
async fn test_suno_without_audio_falls_back() {
    let base = fixed_stub("/v1/generate", StatusCode::OK, json!({ "id": "job-1" })).await;

    let suno = Suno::new(client(), &stub_credentials(&base));
    let fallback = suno
        .generate("", &EmotionLabel::Positive, 30)
        .await
        .unwrap_err();

    assert_eq!(fallback.message, "No audio data returned");
    assert_eq!(fallback.value.service, "suno-ai");
}

#[tokio::test]
async fn test_smart_music_moves_down_the_chain() {
    let failing = fixed_stub(
        "/v2beta/stable-audio/generate/music",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({}),
    )
    .await;
    let working = fixed_stub(
        "/v1/generate",
        StatusCode::OK,
        json!({ "audio_url": "https://suno.test/a.mp3" }),
    )
    .await;

    let smart = SmartMusic::new(vec![
        MusicProvider::StableAudio(StableAudio::new(client(), &stub_credentials(&failing))),
        MusicProvider::Suno(Suno::new(client(), &stub_credentials(&working))),
    ]);
    let track = smart
        .generate("", &EmotionLabel::Positive, 30)
        .await
        .unwrap();

    assert_eq!(track.url, "https://suno.test/a.mp3");
    assert_eq!(track.service, "suno-ai");
}

#[tokio::test]
async fn test_openai_speech_uses_emotion_voice() {
    let requests = captured();
    let sink = requests.clone();
    let router = Router::new().route(
        "/audio/speech",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(body);
                vec![0x49u8, 0x44, 0x33, 0x04]
            }
        }),
    );
    let base = spawn_stub(router).await;

    let speech = OpenAiSpeech::new(client(), &stub_credentials(&base));
    let narration = speech
        .synthesize("hello", &EmotionLabel::Negative)
        .await
        .unwrap();

    let audio = STANDARD.decode(&narration.audio_base64).unwrap();
    assert_eq!(audio, vec![0x49, 0x44, 0x33, 0x04]);
    assert_eq!(narration.voice, "onyx");
    assert_eq!(narration.audio_format, "mp3");
    let body = requests.lock().unwrap()[0].clone();
    assert_eq!(body["model"], "tts-1");
    assert_eq!(body["voice"], "onyx");
    assert_eq!(body["speed"], 0.9);
    assert_eq!(body["input"], "hello");
}

#[tokio::test]
async fn test_openai_speech_error_is_returned() {
    let base = fixed_stub(
        "/audio/speech",
        StatusCode::UNAUTHORIZED,
        json!({ "error": "bad key" }),
    )
    .await;

    let speech = OpenAiSpeech::new(client(), &stub_credentials(&base));
    let result = speech.synthesize("hello", &EmotionLabel::Positive).await;

    assert!(matches!(result, Err(ProviderError::Api(401, _))));
}
