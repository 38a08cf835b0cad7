//! Multipart page submission.
//!
//! Text parts become form values by part name, except `action` which names
//! the form action. A part carrying a file name is streamed into the upload
//! directory and its value becomes the stored file name. The parsed
//! submission then follows the same path as a JSON one.

use super::requested_facets;
use super::submit::respond;
use crate::config::AdminConfig;
use crate::services::responses::json_error;
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use admin_common::model::schema::FormValues;
use futures_util::StreamExt;
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub async fn process(
    id: web::Path<i64>,
    req: HttpRequest,
    payload: Multipart,
    config: web::Data<AdminConfig>,
) -> HttpResponse {
    let id = id.into_inner();
    let mut uploads = Vec::new();
    match read_submission(payload, &config.upload_dir, &mut uploads).await {
        Ok((values, action)) => {
            let request = requested_facets(&req);
            respond(&config, id, values, action, request, uploads).await
        }
        Err(e) => {
            log::warn!("Rejected multipart submission for page {}: {}", id, e);
            discard_uploads(&uploads);
            json_error(400, None)
        }
    }
}

/// Removes files written for a submission that was not stored.
pub(super) fn discard_uploads(uploads: &[PathBuf]) {
    for path in uploads {
        match std::fs::remove_file(path) {
            Ok(()) => log::info!("Discarded upload {}", path.display()),
            Err(e) => log::warn!("Cannot discard upload {}: {}", path.display(), e),
        }
    }
}

/// Reads every part of a multipart submission into form values and the
/// action name. Every file written is pushed to `uploads`, including one
/// left incomplete by a failing part.
async fn read_submission(
    mut payload: Multipart,
    upload_dir: &Path,
    uploads: &mut Vec<PathBuf>,
) -> Result<(FormValues, String), Box<dyn std::error::Error>> {
    let mut values = FormValues::new();
    let mut action: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_string),
                cd.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };
        let Some(name) = name else {
            continue;
        };

        match filename {
            Some(filename) if !filename.is_empty() => {
                let stored = stored_file_name(&filename);
                std::fs::create_dir_all(upload_dir)?;
                let path = upload_dir.join(&stored);
                let file = File::create(&path)?;
                uploads.push(path);
                let mut writer = BufWriter::new(file);
                while let Some(chunk) = field.next().await {
                    writer.write_all(&chunk?)?;
                }
                writer.flush()?;
                log::info!("Stored upload {} as {}", filename, stored);
                values.insert(name, Value::String(stored));
            }
            // A file input left empty.
            Some(_) => {
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
            }
            None => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    bytes.extend_from_slice(&chunk?);
                }
                let text = String::from_utf8(bytes).map_err(|_| "Form value is not valid UTF-8")?;
                if name == "action" {
                    action = Some(text);
                } else {
                    values.insert(name, Value::String(text));
                }
            }
        }
    }

    let action = action.ok_or("Missing form action")?;
    Ok((values, action))
}

/// Unique on-disk name for an upload, keeping only the base name the client
/// sent.
fn stored_file_name(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .replace(|c: char| c.is_whitespace(), "-");
    format!("{}-{}", uuid::Uuid::new_v4().simple(), base)
}
