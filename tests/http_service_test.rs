//! 解析サーバーHTTPクライアントテスト
//!
//! mockito のローカルサーバーで /analyze・/history の送受信を検証

use ai_detect_rust::client::{AnalysisService, HttpService};
use ai_detect_rust::error::AiDetectError;
use ai_detect_rust::scanner::SelectedFile;
use mockito::{Matcher, Server};

fn upload() -> SelectedFile {
    SelectedFile::from_bytes("upload.png", b"fake-png-bytes".to_vec())
}

/// multipart の `file` フィールドにファイル名付きで送られる
#[tokio::test]
async fn test_analyze_posts_multipart_file_field() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/analyze")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
        .match_body(Matcher::Regex(
            r#"name="file"; filename="upload.png""#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "a1", "summary": "Likely AI-generated", "score": "62%", "image_url": "/uploads/a1.jpg"}"#)
        .create_async()
        .await;

    let service = HttpService::new(&server.url(), 5).expect("クライアント生成失敗");
    let response = service.analyze(&upload()).await.expect("解析失敗");

    mock.assert_async().await;
    assert_eq!(response.id.as_deref(), Some("a1"));
    assert_eq!(response.score.as_deref(), Some("62%"));
    assert!(response.raw_text.is_none());
}

/// 非成功ステータスは本文がそのままメッセージになる
#[tokio::test]
async fn test_analyze_error_body_becomes_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/analyze")
        .with_status(500)
        .with_body("Selenium timeout")
        .create_async()
        .await;

    let service = HttpService::new(&server.url(), 5).expect("クライアント生成失敗");
    let err = service.analyze(&upload()).await.unwrap_err();

    match &err {
        AiDetectError::ApiStatus { endpoint, message } => {
            assert_eq!(endpoint, "/analyze");
            assert_eq!(message, "Selenium timeout");
        }
        other => panic!("ApiStatus を期待: {:?}", other),
    }
    assert!(err.is_transport_failure());
}

/// `{"detail": ...}` は detail を表示
#[tokio::test]
async fn test_analyze_error_detail_json() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/analyze")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "画像ファイルをアップロードしてください"}"#)
        .create_async()
        .await;

    let service = HttpService::new(&server.url(), 5).expect("クライアント生成失敗");
    let err = service.analyze(&upload()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "/analyze リクエストエラー: 画像ファイルをアップロードしてください"
    );
}

/// 空ボディは `HTTP <code>`
#[tokio::test]
async fn test_analyze_error_empty_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/analyze")
        .with_status(502)
        .create_async()
        .await;

    let service = HttpService::new(&server.url(), 5).expect("クライアント生成失敗");
    let err = service.analyze(&upload()).await.unwrap_err();

    assert!(matches!(
        err,
        AiDetectError::ApiStatus { ref message, .. } if message == "HTTP 502"
    ));
}

/// 壊れたJSONはパースエラー
#[tokio::test]
async fn test_analyze_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/analyze")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let service = HttpService::new(&server.url(), 5).expect("クライアント生成失敗");
    let err = service.analyze(&upload()).await.unwrap_err();

    assert!(matches!(err, AiDetectError::ApiParse(_)));
}

/// limit はクエリで渡される
#[tokio::test]
async fn test_history_sends_limit_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/history")
        .match_query(Matcher::UrlEncoded("limit".to_string(), "8".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "h1", "score": "5%"}, {"id": "h2"}]"#)
        .create_async()
        .await;

    let service = HttpService::new(&format!("{}/", server.url()), 5).expect("クライアント生成失敗");
    let items = service.history(8).await.expect("履歴取得失敗");

    mock.assert_async().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_deref(), Some("h1"));
}

#[tokio::test]
async fn test_history_null_body_is_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/history")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let service = HttpService::new(&server.url(), 5).expect("クライアント生成失敗");
    let items = service.history(8).await.expect("履歴取得失敗");

    assert!(items.is_empty());
}
