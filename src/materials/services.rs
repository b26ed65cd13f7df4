use std::path::Path;

use anyhow::Context;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use super::dto::MaterialItem;
use super::repo_types::{Material, NewMaterial};
use crate::storage::StorageClient;
use crate::store::Repository;

const DOWNLOAD_TTL_SECS: u64 = 30 * 60;

pub struct Upload {
    pub user_id: Uuid,
    pub title: String,
    pub file_name: String,
    pub content_type: String,
    pub body: Bytes,
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "application/pdf" => Some("pdf"),
        "text/plain" => Some("txt"),
        "text/markdown" => Some("md"),
        "application/msword" => Some("doc"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some("docx"),
        "application/vnd.openxmlformats-officedocument.presentationml.presentation" => Some("pptx"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Known MIME types win; otherwise the uploaded name's extension, if it is plain ASCII.
fn extension_for(content_type: &str, file_name: &str) -> String {
    if let Some(ext) = ext_from_mime(content_type) {
        return ext.to_string();
    }
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

pub fn object_key(user_id: Uuid, object_id: Uuid, content_type: &str, file_name: &str) -> String {
    format!(
        "materials/{}/{}.{}",
        user_id,
        object_id,
        extension_for(content_type, file_name)
    )
}

/// Stores the bytes, then the record. A failed insert removes the orphaned object.
pub async fn store_upload(
    storage: &dyn StorageClient,
    repo: &dyn Repository<Material>,
    upload: Upload,
) -> anyhow::Result<Material> {
    let key = object_key(
        upload.user_id,
        Uuid::new_v4(),
        &upload.content_type,
        &upload.file_name,
    );
    let size_bytes = i64::try_from(upload.body.len()).context("upload size overflow")?;

    storage
        .put_object(&key, upload.body, &upload.content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;

    let new = NewMaterial {
        user_id: upload.user_id,
        title: upload.title,
        file_name: upload.file_name,
        content_type: upload.content_type,
        object_key: key.clone(),
        size_bytes,
    };
    match repo.create(new).await {
        Ok(material) => Ok(material),
        Err(e) => {
            if let Err(cleanup) = storage.delete_object(&key).await {
                warn!(error = %cleanup, %key, "could not remove object after failed insert");
            }
            Err(e).context("insert material")
        }
    }
}

/// A link that cannot be signed is left out rather than failing the listing.
pub async fn with_download_urls(
    storage: Option<&dyn StorageClient>,
    materials: Vec<Material>,
) -> Vec<MaterialItem> {
    let mut out = Vec::with_capacity(materials.len());
    for material in materials {
        let url = match storage {
            Some(s) => match s.presign_get(&material.object_key, DOWNLOAD_TTL_SECS).await {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(error = %e, key = %material.object_key, "presign failed");
                    None
                }
            },
            None => None,
        };
        out.push(MaterialItem { material, url });
    }
    out
}
