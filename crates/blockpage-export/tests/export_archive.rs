//! End-to-end export against a local image server.

use std::io::{Cursor, Read};
use std::net::SocketAddr;

use axum::http::header;
use axum::routing::get;
use axum::Router;
use zip::ZipArchive;

use blockpage_export::{ExportConfig, Exporter};
use blockpage_model::{parse_canvas, DocumentFormat};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nlocal-png";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0local-jpeg";

async fn serve_images() -> SocketAddr {
    let app = Router::new()
        .route(
            "/logo.png",
            get(|| async { ([(header::CONTENT_TYPE, "image/png")], PNG) }),
        )
        .route(
            "/photo",
            get(|| async { ([(header::CONTENT_TYPE, "image/jpeg")], JPEG) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn read_entry(bytes: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).ok()?;
    let mut out = Vec::new();
    file.read_to_end(&mut out).unwrap();
    Some(out)
}

#[tokio::test]
async fn exports_downloaded_images_into_archive() {
    let addr = serve_images().await;
    let canvas = parse_canvas(
        &format!(
            r##"[
                {{"id": "title", "type": "heading", "content": "Hi", "style": {{"color": "#ff0000"}}}},
                {{"id": "logo", "type": "image", "content": "http://{addr}/logo.png"}},
                {{"id": "missing", "type": "image", "content": "http://{addr}/missing.png"}},
                {{"id": "photo", "type": "image", "content": "http://{addr}/photo"}},
                {{"id": "cta", "type": "button", "content": "Sign up"}}
            ]"##
        ),
        DocumentFormat::Json,
    )
    .unwrap();

    let exporter = Exporter::new(ExportConfig::default()).unwrap();
    let archive = exporter.export_canvas(&canvas).await.unwrap();

    assert_eq!(read_entry(&archive.bytes, "images/image-1.png").unwrap(), PNG);
    assert_eq!(read_entry(&archive.bytes, "images/image-2.jpeg").unwrap(), JPEG);
    assert!(read_entry(&archive.bytes, "images/image-3.png").is_none());

    let html = String::from_utf8(read_entry(&archive.bytes, "index.html").unwrap()).unwrap();
    assert!(html.contains(r#"<h2 class="heading heading-0" style="color: #ff0000">Hi</h2>"#));
    assert!(html.contains(r#"src="images/image-1.png" alt="Image 2""#));
    assert!(html.contains(&format!(r#"src="http://{}/missing.png""#, addr)));
    assert!(html.contains(r#"src="images/image-2.jpeg" alt="Image 4""#));
    assert!(html.contains(r#"<button class="button button-4" style="">Sign up</button>"#));

    let css = String::from_utf8(read_entry(&archive.bytes, "styles.css").unwrap()).unwrap();
    for selector in [".heading-0 {", ".image-1 {", ".image-2 {", ".image-3 {", ".button-4 {"] {
        assert!(css.contains(selector), "missing {}", selector);
    }

    assert!(read_entry(&archive.bytes, "script.js").is_some());
    assert_eq!(archive.report.images_embedded, 2);
    assert_eq!(archive.report.images_kept_remote, 1);
}

#[tokio::test]
async fn unreachable_host_keeps_url() {
    let canvas = parse_canvas(
        r#"[{"id": "img", "type": "image", "content": "http://127.0.0.1:1/a.png"}]"#,
        DocumentFormat::Json,
    )
    .unwrap();

    let archive = Exporter::new(ExportConfig::default())
        .unwrap()
        .export_canvas(&canvas)
        .await
        .unwrap();

    let html = String::from_utf8(read_entry(&archive.bytes, "index.html").unwrap()).unwrap();
    assert!(html.contains(r#"src="http://127.0.0.1:1/a.png""#));
    assert!(read_entry(&archive.bytes, "images/").is_some());
}
