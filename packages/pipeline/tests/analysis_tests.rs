use pretty_assertions::assert_eq;
use textlens_pipeline::analysis::{AnalysisRequest, Analyzer, LlmConfig, OpenAiClient};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_completion_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "qwen-plus",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 50, "completion_tokens": 10, "total_tokens": 60 }
    })
}

fn test_config(mock_server: &MockServer) -> LlmConfig {
    LlmConfig::builder("test-key")
        .api_base_url(mock_server.uri())
        .timeout_secs(5)
        .build()
}

/// Mount one mock per pipeline step, matched on the step's prompt marker.
async fn mount_pipeline_mocks(mock_server: &MockServer) {
    for (marker, content) in [
        ("类别", "新闻"),
        ("实体", "北京, 中国"),
        ("摘要", "北京是中国的首都。"),
    ] {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_string_contains(marker))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response(content)))
            .mount(mock_server)
            .await;
    }
}

#[tokio::test]
async fn test_successful_analysis_e2e() {
    let mock_server = MockServer::start().await;
    mount_pipeline_mocks(&mock_server).await;

    let config = test_config(&mock_server);
    let client = OpenAiClient::new(&config).expect("client creation");
    let analyzer = Analyzer::new(&client, &config);

    let request = AnalysisRequest::new("北京是中国的首都。");
    let response = analyzer.analyze(&request).await.expect("analysis");

    assert_eq!(response.original_text, "北京是中国的首都。");
    assert_eq!(response.classification.as_deref(), Some("新闻"));
    assert_eq!(
        response.entities,
        Some(vec!["北京".to_string(), "中国".to_string()])
    );
    assert_eq!(response.summary.as_deref(), Some("北京是中国的首都。"));
    assert!(response.processing_time >= 0.0);
}

#[tokio::test]
async fn test_requests_are_single_turn_at_temperature_zero() {
    let mock_server = MockServer::start().await;
    mount_pipeline_mocks(&mock_server).await;

    let config = test_config(&mock_server);
    let client = OpenAiClient::new(&config).expect("client creation");
    let analyzer = Analyzer::new(&client, &config);

    analyzer
        .analyze(&AnalysisRequest::new("北京是中国的首都。"))
        .await
        .expect("analysis");

    let received = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 3);
    for request in &received {
        let body: serde_json::Value =
            serde_json::from_slice(&request.body).expect("request body should be JSON");
        assert_eq!(body["model"], "qwen-plus");
        assert_eq!(body["temperature"], 0.0);
        let messages = body["messages"].as_array().expect("messages array");
        assert_eq!(messages.len(), 1, "no conversation history between calls");
        assert_eq!(messages[0]["role"], "user");
    }
}

#[tokio::test]
async fn test_api_error_surfaces_provider_message() {
    let mock_server = MockServer::start().await;

    let error_body = serde_json::json!({
        "error": {
            "type": "invalid_request_error",
            "message": "Invalid model specified"
        }
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server);
    let client = OpenAiClient::new(&config).expect("client creation");
    let analyzer = Analyzer::new(&client, &config);

    let err = analyzer
        .analyze(&AnalysisRequest::new("text"))
        .await
        .expect_err("should fail");
    let err_str = err.to_string();
    assert!(err_str.contains("400"), "status in message: {err_str}");
    assert!(
        err_str.contains("Invalid model specified"),
        "provider message extracted: {err_str}"
    );
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server);
    let client = OpenAiClient::new(&config).expect("client creation");
    let analyzer = Analyzer::new(&client, &config);

    let err = analyzer
        .analyze(&AnalysisRequest::new("text"))
        .await
        .expect_err("should fail");
    assert!(err.to_string().contains("internal error"));

    // The first failing step aborts the whole request: exactly one call.
    let received = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_empty_choices_is_empty_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server);
    let client = OpenAiClient::new(&config).expect("client creation");
    let analyzer = Analyzer::new(&client, &config);

    let err = analyzer
        .analyze(&AnalysisRequest::new("text"))
        .await
        .expect_err("should fail");
    assert!(err.to_string().contains("empty response"));
}

#[tokio::test]
async fn test_empty_content_is_empty_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_response("")))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server);
    let client = OpenAiClient::new(&config).expect("client creation");
    let analyzer = Analyzer::new(&client, &config);

    let result = analyzer.analyze(&AnalysisRequest::new("text")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_undecodable_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server);
    let client = OpenAiClient::new(&config).expect("client creation");
    let analyzer = Analyzer::new(&client, &config);

    let err = analyzer
        .analyze(&AnalysisRequest::new("text"))
        .await
        .expect_err("should fail");
    assert!(err.to_string().contains("parse"));
}
