use crate::ingest::parser::check_file_type;
use crate::ingest::{IngestError, Upload};
use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::StreamExt;

const FILE_FIELD: &str = "file";

fn malformed(err: MultipartError) -> IngestError {
    IngestError::Format(format!("Malformed multipart upload: {}", err))
}

async fn drain(field: &mut Field) -> Result<(), IngestError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(malformed)?;
    }
    Ok(())
}

/// Reads the `file` part of a multipart/form-data upload into memory.
///
/// The file name is checked as soon as the part header arrives. Bytes past
/// `max_bytes` are counted but not kept, so an oversized upload is reported
/// with its real size without being buffered. Other parts, and any `file`
/// part after the first, are drained and ignored.
pub async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<Upload, IngestError> {
    let mut upload: Option<Upload> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(malformed)?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some(FILE_FIELD) || upload.is_some() {
            drain(&mut field).await?;
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let content_type = field.content_type().map(|m| m.essence_str().to_string());
        check_file_type(&filename, content_type.as_deref())?;

        let mut bytes = Vec::new();
        let mut received = 0usize;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(malformed)?;
            received += chunk.len();
            if received <= max_bytes {
                bytes.extend_from_slice(&chunk);
            }
        }
        if received > max_bytes {
            return Err(IngestError::Size {
                actual: received,
                limit: max_bytes,
            });
        }

        upload = Some(Upload {
            filename,
            content_type,
            bytes,
        });
    }

    upload.ok_or_else(|| IngestError::Format("Upload is missing the 'file' field".to_string()))
}
