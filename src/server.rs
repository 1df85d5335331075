use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};
use futures::StreamExt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::detection::aggregate;
use crate::error::{ApiError, ProcessError};
use crate::models::domain::Predictions;
use crate::models::dto::MessageDTO;
use crate::parser::Table;
use crate::store::PredictionStore;

const FILE_FIELD: &str = "file";

/// Where uploads are staged and how large they may be.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload).service(get_predictions);
}

#[post("/upload")]
async fn upload(
    mut payload: Multipart,
    store: web::Data<PredictionStore>,
    settings: web::Data<UploadSettings>,
) -> Result<HttpResponse, ApiError> {
    let file = read_file_field(&mut payload, settings.max_bytes).await?;
    let dir = settings.dir.clone();
    let filename = file.filename.clone();

    let outcome = web::block(move || process_upload(&dir, &file.filename, &file.bytes))
        .await
        .map_err(|_| ApiError::Internal)?;

    match outcome {
        Ok(predictions) => {
            store.replace(predictions);
            Ok(HttpResponse::Ok().json(MessageDTO {
                message: "File uploaded successfully".to_string(),
            }))
        }
        Err(e) => {
            warn!("Upload {} rejected: {}", filename, e);
            Err(e.into())
        }
    }
}

#[get("/get-predictions")]
async fn get_predictions(store: web::Data<PredictionStore>) -> impl Responder {
    HttpResponse::Ok().json(store.snapshot().as_ref())
}

/// Pull the `file` part out of the form. Other parts are skipped.
async fn read_file_field(payload: &mut Multipart, max_bytes: usize) -> Result<UploadedFile, ApiError> {
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| ApiError::Multipart(e.to_string()))?;

        let disposition = field.content_disposition();
        let is_file_field = disposition.get_name() == Some(FILE_FIELD);
        let filename = disposition.get_filename().map(str::to_string);

        let filename = match (is_file_field, filename) {
            (true, Some(name)) if name.is_empty() => return Err(ApiError::NoSelectedFile),
            (true, Some(name)) => name,
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| ApiError::Multipart(e.to_string()))?;
                }
                continue;
            }
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::Multipart(e.to_string()))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ApiError::PayloadTooLarge { limit: max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        debug!("Received {} ({} bytes)", filename, bytes.len());
        return Ok(UploadedFile { filename, bytes });
    }

    Err(ApiError::NoFilePart)
}

/// Stage the upload on disk, parse it and aggregate it.
///
/// The staged file is removed when `staged` drops, on success and on every error path.
pub fn process_upload(dir: &Path, filename: &str, bytes: &[u8]) -> Result<Predictions, ProcessError> {
    let prefix = format!("{}-", secure_filename(filename));
    let mut staged = tempfile::Builder::new().prefix(&prefix).tempfile_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;

    let table = Table::from_path(staged.path())?;
    let predictions = aggregate(&table)?;

    info!(
        "Processed {}: {} rows, protocols {:?}, anomalies {:?}",
        filename,
        table.len(),
        predictions.protocol_counts,
        predictions.anomaly_data
    );
    Ok(predictions)
}

/// Reduce a client-supplied filename to something safe to embed in a local path.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']);

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
