use image_uploader::config::AppConfig;
use image_uploader::upload::{
    spawn_upload, Notice, PendingFile, SessionState, UploadBatchManager, UploadClient,
    UploadOutcome,
};
use image_uploader::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> UploadClient {
    let config = AppConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    UploadClient::new(&config).unwrap()
}

fn file(name: &str) -> PendingFile {
    PendingFile::from_bytes(name, format!("bytes of {}", name).into_bytes())
}

#[tokio::test]
async fn successful_upload_clears_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image_posting"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stored": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut manager = UploadBatchManager::new();
    manager.add_files(vec![file("a.png"), file("b.jpg")]).unwrap();

    let notice = manager.submit(&client).await.unwrap();

    assert_eq!(notice, Notice::Uploaded { count: 2 });
    assert_eq!(manager.session(), SessionState::Idle);
    assert!(manager.batch().is_empty());
}

#[tokio::test]
async fn every_file_is_sent_under_the_images_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image_posting"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut manager = UploadBatchManager::new();
    manager
        .add_files(vec![file("a.png"), file("a.png"), file("c.bmp")])
        .unwrap();
    manager.submit(&client).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);

    assert_eq!(body.matches("name=\"images\"").count(), 3);
    assert_eq!(body.matches("filename=\"a.png\"").count(), 2);
    assert!(body.contains("filename=\"c.bmp\""));
    assert!(body.contains("Content-Type: image/png"));
    assert!(body.contains("Content-Type: image/bmp"));
    assert!(body.contains("bytes of c.bmp"));
}

#[tokio::test]
async fn server_error_keeps_batch_for_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image_posting"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "disk full" })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut manager = UploadBatchManager::new();
    manager.add_files(vec![file("a.png")]).unwrap();
    manager.add_files(vec![file("b.jpg"), file("c.bmp")]).unwrap();
    assert_eq!(manager.batch().names(), vec!["a.png", "b.jpg", "c.bmp"]);

    manager.remove_file(1).unwrap();
    assert_eq!(manager.batch().names(), vec!["a.png", "c.bmp"]);

    let notice = manager.submit(&client).await.unwrap();

    assert_eq!(notice, Notice::ServerError { status: 500 });
    assert_eq!(manager.session(), SessionState::Idle);
    assert_eq!(manager.batch().names(), vec!["a.png", "c.bmp"]);
}

#[tokio::test]
async fn non_json_success_body_still_counts_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut manager = UploadBatchManager::new();
    manager.add_files(vec![file("a.png")]).unwrap();

    let notice = manager.submit(&client).await.unwrap();
    assert_eq!(notice, Notice::Uploaded { count: 1 });
}

#[tokio::test]
async fn transport_failure_keeps_batch() {
    // Nothing listens on the port once the listener is dropped
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = AppConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        request_timeout_secs: Some(5),
        ..Default::default()
    };
    let client = UploadClient::new(&config).unwrap();

    let mut manager = UploadBatchManager::new();
    manager.add_files(vec![file("a.png")]).unwrap();

    let notice = manager.submit(&client).await.unwrap();

    assert!(matches!(notice, Notice::TransportError { .. }));
    assert_eq!(manager.session(), SessionState::Idle);
    assert_eq!(manager.batch().names(), vec!["a.png"]);
}

#[tokio::test]
async fn empty_batch_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut manager = UploadBatchManager::new();

    let err = manager.submit(&client).await.unwrap_err();

    assert!(matches!(err, Error::EmptyBatch));
    assert_eq!(manager.notice(), Some(&Notice::NoFilesSelected));
    assert_eq!(manager.session(), SessionState::Idle);
}

#[tokio::test]
async fn double_submit_sends_a_single_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut manager = UploadBatchManager::new();
    manager.add_files(vec![file("a.png")]).unwrap();

    let job = manager.begin_submit().unwrap();
    assert!(matches!(manager.begin_submit(), Err(Error::AlreadyUploading)));

    let outcome = client.send(&job).await;
    assert_eq!(outcome, UploadOutcome::Success { status: 200 });
    manager.finish_submit(outcome);
    assert_eq!(manager.session(), SessionState::Idle);
}

#[tokio::test]
async fn timeout_is_reported_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = AppConfig {
        base_url: server.uri(),
        request_timeout_secs: Some(1),
        ..Default::default()
    };
    let client = UploadClient::new(&config).unwrap();

    let mut manager = UploadBatchManager::new();
    manager.add_files(vec![file("slow.png")]).unwrap();

    let notice = manager.submit(&client).await.unwrap();
    assert!(matches!(notice, Notice::TransportError { .. }));
    assert_eq!(manager.batch().len(), 1);
}

#[tokio::test]
async fn background_worker_delivers_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut manager = UploadBatchManager::new();
    manager.add_files(vec![file("a.png")]).unwrap();
    let job = manager.begin_submit().unwrap();

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    let receiver = spawn_upload(client, job, move || {
        let _ = done_tx.send(());
    });

    let outcome = tokio::task::spawn_blocking(move || {
        receiver.recv_timeout(Duration::from_secs(10))
    })
    .await
    .unwrap()
    .unwrap();
    done_rx.recv_timeout(Duration::from_secs(10)).unwrap();

    assert_eq!(outcome, UploadOutcome::ServerError { status: 503 });
    assert_eq!(
        manager.finish_submit(outcome),
        &Notice::ServerError { status: 503 }
    );
}
