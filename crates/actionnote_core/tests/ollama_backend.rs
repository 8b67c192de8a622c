// Ollama chat backend against a mocked HTTP server.
use actionnote_core::extract::llm::action_items_schema;
use actionnote_core::{extract_action_items_llm, ChatBackend, LlmError, OllamaBackend};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

fn chat_reply(content: &str) -> String {
    json!({
        "model": "llama3.2",
        "created_at": "2024-01-01T00:00:00Z",
        "message": { "role": "assistant", "content": content },
        "done": true,
        "done_reason": "stop"
    })
    .to_string()
}

#[test]
fn sends_structured_chat_request_and_returns_content() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama3.2",
            "stream": false,
            "options": { "temperature": 0.0 },
            "format": action_items_schema(),
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_reply(r#"{"action_items": ["Set up database"]}"#))
        .create();

    let backend = OllamaBackend::new(server.url(), "llama3.2");
    let content = backend
        .complete_json("Extract things", &action_items_schema())
        .unwrap();

    mock.assert();
    assert_eq!(content, r#"{"action_items": ["Set up database"]}"#);
}

#[test]
fn extraction_over_http_returns_parsed_items() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Regex("Fix the login bug".to_string()))
        .with_status(200)
        .with_body(chat_reply(
            r#"{"action_items": ["Fix the login bug", " Update user authentication "]}"#,
        ))
        .create();

    let backend = OllamaBackend::new(format!("{}/", server.url()), "llama3.2");
    let items = extract_action_items_llm(
        &backend,
        "TODO: Fix the login bug\naction: Update user authentication",
    );

    mock.assert();
    assert_eq!(items, vec!["Fix the login bug", "Update user authentication"]);
}

#[test]
fn non_success_status_is_reported() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/chat")
        .with_status(404)
        .with_body(r#"{"error":"model 'nope' not found"}"#)
        .create();

    let backend = OllamaBackend::new(server.url(), "nope");
    let err = backend
        .complete_json("prompt", &action_items_schema())
        .unwrap_err();
    match err {
        LlmError::Status { code, body } => {
            assert_eq!(code, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(extract_action_items_llm(&backend, "- task").is_empty());
}

#[test]
fn unreachable_server_yields_empty_list() {
    let backend = OllamaBackend::new("http://127.0.0.1:9", "llama3.2")
        .with_timeout(Duration::from_millis(500));
    assert!(extract_action_items_llm(&backend, "- task").is_empty());
}
