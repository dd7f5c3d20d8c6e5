//! Asset retrieval against a local HTTP double.
//!
//! Uses `mockito` for the remote side and a temp directory for the output
//! tree, so nothing leaves the machine.

use pagelift::assets::AssetRetriever;
use pagelift::config::ScrapeConfig;
use pagelift::extractor::{DocumentImage, ImageRef};
use std::path::Path;

fn config_for(dir: &Path, max_images: usize) -> ScrapeConfig {
    ScrapeConfig::builder()
        .max_images_to_download(max_images)
        .asset_concurrency(2)
        .asset_request_timeout_secs(5)
        .output_dir(dir)
        .build()
        .expect("test config")
}

fn remote(url: impl Into<String>) -> DocumentImage {
    DocumentImage::Unresolved(ImageRef {
        url: url.into(),
        alt_text: "alt".to_string(),
        width: None,
        height: None,
        is_inline_encoded: false,
    })
}

fn inline(url: impl Into<String>) -> DocumentImage {
    DocumentImage::Unresolved(ImageRef {
        url: url.into(),
        alt_text: "alt".to_string(),
        width: None,
        height: None,
        is_inline_encoded: true,
    })
}

#[tokio::test]
async fn download_cap_limits_requests_but_not_output_length() {
    let mut server = mockito::Server::new_async().await;
    let out = tempfile::tempdir().unwrap();

    let mut fetched = Vec::new();
    for i in 1..=3 {
        fetched.push(
            server
                .mock("GET", format!("/img{i}.png").as_str())
                .with_status(200)
                .with_header("content-type", "image/png")
                .with_body("PNGDATA")
                .expect(1)
                .create_async()
                .await,
        );
    }
    let mut skipped = Vec::new();
    for i in 4..=5 {
        skipped.push(
            server
                .mock("GET", format!("/img{i}.png").as_str())
                .expect(0)
                .create_async()
                .await,
        );
    }

    let images: Vec<DocumentImage> = (1..=5)
        .map(|i| remote(format!("{}/img{i}.png", server.url())))
        .collect();

    let retriever = AssetRetriever::new(&config_for(out.path(), 3)).unwrap();
    let result = retriever.retrieve(images).await;

    assert_eq!(result.len(), 5);
    for (index, slot) in result.iter().take(3).enumerate() {
        let asset = slot.as_stored().expect("within cap, should be stored");
        assert!(
            asset
                .local_path
                .ends_with(format!("images/image_{}.png", index + 1)),
            "unexpected path {:?}",
            asset.local_path
        );
        let bytes = tokio::fs::read(&asset.local_path).await.unwrap();
        assert_eq!(bytes, b"PNGDATA");
    }
    for slot in &result[3..] {
        assert!(slot.as_unresolved().is_some(), "beyond cap, should stay a ref");
    }

    for mock in fetched.iter().chain(&skipped) {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn server_errors_retry_then_give_up() {
    let mut server = mockito::Server::new_async().await;
    let out = tempfile::tempdir().unwrap();

    // Three attempts total, no more
    let mock = server
        .mock("GET", "/broken.png")
        .with_status(500)
        .expect(3)
        .create_async()
        .await;

    let retriever = AssetRetriever::new(&config_for(out.path(), 10)).unwrap();
    let result = retriever
        .retrieve(vec![remote(format!("{}/broken.png", server.url()))])
        .await;

    assert!(result[0].as_unresolved().is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let out = tempfile::tempdir().unwrap();

    let mock = server
        .mock("GET", "/gone.png")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let retriever = AssetRetriever::new(&config_for(out.path(), 10)).unwrap();
    let result = retriever
        .retrieve(vec![remote(format!("{}/gone.png", server.url()))])
        .await;

    assert!(result[0].as_unresolved().is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn inline_payloads_decode_without_touching_the_network() {
    let out = tempfile::tempdir().unwrap();

    // "aGVsbG8=" is "hello"
    let uri = "data:image/png;base64,aGVsbG8=";
    let retriever = AssetRetriever::new(&config_for(out.path(), 10)).unwrap();
    let result = retriever.retrieve(vec![inline(uri)]).await;

    let asset = result[0].as_stored().expect("decoded inline payload");
    assert!(asset.local_path.ends_with("images/image_1.png"));
    assert_eq!(asset.original_url, uri);
    let bytes = tokio::fs::read(&asset.local_path).await.unwrap();
    assert_eq!(bytes, b"hello");
}

#[tokio::test]
async fn malformed_inline_payload_stays_unresolved() {
    let out = tempfile::tempdir().unwrap();

    let retriever = AssetRetriever::new(&config_for(out.path(), 10)).unwrap();
    let result = retriever
        .retrieve(vec![inline("data:image/png;base64!!!no-comma")])
        .await;

    assert!(result[0].as_unresolved().is_some());
}

#[tokio::test]
async fn unknown_remote_extension_falls_back_to_jpg() {
    let mut server = mockito::Server::new_async().await;
    let out = tempfile::tempdir().unwrap();

    let mock = server
        .mock("GET", "/photo")
        .with_status(200)
        .with_body("JPEGDATA")
        .expect(1)
        .create_async()
        .await;

    let retriever = AssetRetriever::new(&config_for(out.path(), 10)).unwrap();
    let result = retriever
        .retrieve(vec![remote(format!("{}/photo", server.url()))])
        .await;

    let asset = result[0].as_stored().expect("stored");
    assert!(asset.local_path.ends_with("images/image_1.jpg"));
    mock.assert_async().await;
}

#[tokio::test]
async fn zero_cap_is_a_no_op() {
    let out = tempfile::tempdir().unwrap();

    let retriever = AssetRetriever::new(&config_for(out.path(), 0)).unwrap();
    let result = retriever
        .retrieve(vec![remote("https://ex.com/never.png")])
        .await;

    assert!(result[0].as_unresolved().is_some());
    assert!(!retriever.images_dir().exists());
}
