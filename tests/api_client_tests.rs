use std::time::Duration;

use serde_json::json;
use smalltalk_admin::api::{
    AdminApi, AnswerUpdate, ApiError, HttpClient, NewAnswer, NewSmallTalk, SmallTalkPatch,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param, query_param_is_missing},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(server.uri(), Some(Duration::from_secs(5))).unwrap()
}

fn talk_json(talk_id: i64, tag: &str) -> serde_json::Value {
    json!({
        "talk_id": talk_id,
        "eng_sentence": format!("Sentence {talk_id}"),
        "kor_sentence": format!("문장 {talk_id}"),
        "parenthesis": null,
        "tag": tag,
        "update_at": "2024-03-01T09:30:00"
    })
}

/// A talk without the optional `parenthesis` and `tag` keys.
fn talk_id_only(talk_id: i64) -> serde_json::Value {
    json!({
        "talk_id": talk_id,
        "eng_sentence": "Bare",
        "kor_sentence": "맨",
        "update_at": "2024-03-01T09:30:00"
    })
}

async fn mount_count(server: &MockServer, total: u64) {
    Mock::given(method("GET"))
        .and(path("/small-talk/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": total })))
        .mount(server)
        .await;
}

// ============================================================================
// Small Talk Listing
// ============================================================================

#[tokio::test]
async fn test_list_combines_page_and_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/small-talk"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "10"))
        .and(query_param_is_missing("tag"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([talk_json(11, "greeting"), talk_id_only(12)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_count(&server, 12).await;

    let page = client(&server).list_small_talks(None, 10, 10).await.unwrap();

    assert_eq!(page.total, 12);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].talk_id, 11);
    assert_eq!(page.items[0].tag.as_deref(), Some("greeting"));
    // Optional fields may be absent entirely
    assert_eq!(page.items[1].parenthesis, None);
    assert_eq!(page.items[1].tag, None);
}

#[tokio::test]
async fn test_list_sends_tag_to_both_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/small-talk"))
        .and(query_param("tag", "farewell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([talk_json(3, "farewell")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/small-talk/count"))
        .and(query_param("tag", "farewell"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client(&server)
        .list_small_talks(Some(" farewell "), 10, 0)
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_list_accepts_paginated_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/small-talk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [talk_json(1, "greeting")],
            "total": 1,
            "offset": 0,
            "limit": 10
        })))
        .mount(&server)
        .await;
    mount_count(&server, 1).await;

    let page = client(&server).list_small_talks(None, 10, 0).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_count_failure_fails_whole_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/small-talk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([talk_json(1, "greeting")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/small-talk/count"))
        .respond_with(ResponseTemplate::new(500).set_body_string("count exploded"))
        .mount(&server)
        .await;

    let err = client(&server)
        .list_small_talks(None, 10, 0)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Http {
            status: 500,
            body: "count exploded".to_string()
        }
    );
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_create_small_talk_posts_json_with_default_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/small-talk"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(header("access-control-allow-origin", "*"))
        .and(body_json(json!({
            "eng_sentence": "Nice weather!",
            "kor_sentence": "날씨 좋네요!",
            "parenthesis": "",
            "tag": "weather"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(talk_json(42, "weather")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_small_talk(&NewSmallTalk {
            eng_sentence: "Nice weather!".to_string(),
            kor_sentence: "날씨 좋네요!".to_string(),
            parenthesis: String::new(),
            tag: "weather".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.talk_id, 42);
}

#[tokio::test]
async fn test_update_small_talk_sends_only_changed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/small-talk/7"))
        .and(body_json(json!({ "tag": "farewell" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(talk_json(7, "farewell")))
        .expect(1)
        .mount(&server)
        .await;

    let patch = SmallTalkPatch {
        tag: Some("farewell".to_string()),
        ..Default::default()
    };
    let updated = client(&server).update_small_talk(7, &patch).await.unwrap();
    assert_eq!(updated.tag.as_deref(), Some("farewell"));
}

#[tokio::test]
async fn test_delete_accepts_empty_and_message_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/small-talk/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/answers/9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Answer deleted" })),
        )
        .mount(&server)
        .await;

    let api = client(&server);
    let talk = api.delete_small_talk(3).await.unwrap();
    assert_eq!(talk.message, None);

    let answer = api.delete_answer(9).await.unwrap();
    assert_eq!(answer.message.as_deref(), Some("Answer deleted"));
}

#[tokio::test]
async fn test_answer_crud_paths() {
    let server = MockServer::start().await;
    let answer = json!({
        "answer_id": 20,
        "talk_id": 4,
        "eng_sentence": "Fine, thanks",
        "kor_sentence": "잘 지내요",
        "update_at": "2024-03-01T09:30:00"
    });

    Mock::given(method("GET"))
        .and(path("/answers/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([answer.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/answers"))
        .and(body_json(json!({
            "talk_id": 4,
            "eng_sentence": "Fine, thanks",
            "kor_sentence": "잘 지내요"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/answers/20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let answers = api.list_answers(4).await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].answer_id, 20);

    api.create_answer(&NewAnswer {
        talk_id: 4,
        eng_sentence: "Fine, thanks".to_string(),
        kor_sentence: "잘 지내요".to_string(),
    })
    .await
    .unwrap();

    api.update_answer(
        20,
        &AnswerUpdate {
            eng_sentence: "Fine, thanks".to_string(),
            kor_sentence: "잘 지내요".to_string(),
        },
    )
    .await
    .unwrap();
}

// ============================================================================
// Bot Control
// ============================================================================

#[tokio::test]
async fn test_bot_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bot/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": true,
            "jobs": [{ "id": "morning" }, { "id": "evening" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bot/stop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "running": false })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bot/send-now"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "sent" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let status = api.bot_status().await.unwrap();
    assert!(status.running);
    assert_eq!(status.job_count(), 2);

    let stopped = api.set_bot_running(false).await.unwrap();
    assert!(!stopped.running);

    let sent = api.send_now().await.unwrap();
    assert_eq!(sent.message.as_deref(), Some("sent"));
}

// ============================================================================
// Error Normalization
// ============================================================================

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/answers"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("{\"detail\":\"Small talk not found\"}"),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .create_answer(&NewAnswer {
            talk_id: 999,
            eng_sentence: "a".to_string(),
            kor_sentence: "b".to_string(),
        })
        .await
        .unwrap_err();

    assert!(!err.is_transport());
    assert_eq!(
        err.message(),
        "Request failed with HTTP 404: {\"detail\":\"Small talk not found\"}"
    );
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/answers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).list_answers(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_delete_with_non_json_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/small-talk/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).delete_small_talk(5).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)), "got {err:?}");
    // No HTTP failure status was seen
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 1
    let api = HttpClient::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();

    let err = api.bot_status().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
    assert!(err.message().starts_with("Could not reach the server"));
}
