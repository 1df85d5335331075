use actix_web::{http::header, http::StatusCode, test, web, App};
use serde_json::{json, Value};
use tempfile::TempDir;

use traffic_insights::models::domain::Predictions;
use traffic_insights::server::{configure, UploadSettings};
use traffic_insights::store::PredictionStore;

const BOUNDARY: &str = "----traffic-insights-boundary";

fn multipart_body(field: &str, filename: Option<&str>, content: &str) -> String {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
        None => format!("form-data; name=\"{}\"", field),
    };
    format!(
        "--{b}\r\nContent-Disposition: {d}\r\nContent-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        d = disposition,
        c = content
    )
}

fn upload_request(body: String) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

fn predictions_request() -> test::TestRequest {
    test::TestRequest::get().uri("/get-predictions")
}

macro_rules! app {
    ($store:expr, $dir:expr, $limit:expr) => {
        test::init_service(
            App::new()
                .app_data($store.clone())
                .app_data(web::Data::new(UploadSettings {
                    dir: $dir.path().to_path_buf(),
                    max_bytes: $limit,
                }))
                .configure(configure),
        )
        .await
    };
    ($store:expr, $dir:expr) => {
        app!($store, $dir, 1024 * 1024)
    };
}

fn upload_dir_is_empty(dir: &TempDir) -> bool {
    std::fs::read_dir(dir.path()).unwrap().next().is_none()
}

#[actix_web::test]
async fn predictions_start_at_zero() {
    let dir = TempDir::new().unwrap();
    let store = web::Data::new(PredictionStore::new());
    let app = app!(store, dir);

    let body: Value = test::call_and_read_body_json(&app, predictions_request().to_request()).await;
    assert_eq!(
        body,
        json!({
            "protocol_counts": { "TCP": 0, "UDP": 0, "ICMP": 0 },
            "anomaly_data": { "normal": 0, "abnormal": 0 },
            "additional_metrics": { "duration": [], "src_bytes": [], "dst_bytes": [] }
        })
    );
}

#[actix_web::test]
async fn upload_then_read_back() {
    let dir = TempDir::new().unwrap();
    let store = web::Data::new(PredictionStore::new());
    let app = app!(store, dir);

    let csv = "duration,protocol_type,src_bytes,class\n\
               0,TCP,491,normal\n\
               2,udp,146,dos\n\
               0,ftp,0,normal\n";
    let resp = test::call_service(&app, upload_request(multipart_body("file", Some("kdd.csv"), csv)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "File uploaded successfully" }));
    assert!(upload_dir_is_empty(&dir));

    let body: Value = test::call_and_read_body_json(&app, predictions_request().to_request()).await;
    assert_eq!(
        body,
        json!({
            "protocol_counts": { "TCP": 1, "UDP": 1, "ICMP": 0 },
            "anomaly_data": { "normal": 2, "abnormal": 1 },
            "additional_metrics": {
                "duration": [0, 2, 0],
                "src_bytes": [491, 146, 0],
                "dst_bytes": [0, 0, 0]
            }
        })
    );
}

#[actix_web::test]
async fn missing_protocol_column_keeps_previous_results() {
    let dir = TempDir::new().unwrap();
    let store = web::Data::new(PredictionStore::new());
    let app = app!(store, dir);

    let good = multipart_body("file", Some("good.csv"), "protocol_type,class\nicmp,smurf\n");
    let resp = test::call_service(&app, upload_request(good).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let before = store.snapshot();

    let bad = multipart_body("file", Some("bad.csv"), "class\nnormal\nnormal\n");
    let resp = test::call_service(&app, upload_request(bad).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("protocol_type"));

    assert_eq!(store.snapshot(), before);
    assert_eq!(store.snapshot().protocol_counts.icmp, 1);
    assert!(upload_dir_is_empty(&dir));
}

#[actix_web::test]
async fn unparseable_upload_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = web::Data::new(PredictionStore::new());
    let app = app!(store, dir);

    let resp = test::call_service(
        &app,
        upload_request(multipart_body("file", Some("ragged.csv"), "protocol_type\ntcp,extra\n")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Error tokenizing data"));
    assert!(upload_dir_is_empty(&dir));
}

#[actix_web::test]
async fn missing_file_part_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let store = web::Data::new(PredictionStore::new());
    let app = app!(store, dir);

    let resp = test::call_service(&app, upload_request(multipart_body("notes", None, "hello")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "No file part" }));
}

#[actix_web::test]
async fn empty_filename_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let store = web::Data::new(PredictionStore::new());
    let app = app!(store, dir);

    let resp = test::call_service(&app, upload_request(multipart_body("file", Some(""), "")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "No selected file" }));
}

#[actix_web::test]
async fn oversized_upload_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = web::Data::new(PredictionStore::new());
    let app = app!(store, dir, 16);

    let csv = "protocol_type,class\ntcp,normal\nudp,normal\nicmp,normal\n";
    let resp = test::call_service(&app, upload_request(multipart_body("file", Some("big.csv"), csv)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(*store.snapshot(), Predictions::default());
}
