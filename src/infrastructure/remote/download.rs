use crate::error::{AppError, AppResult};
use crate::infrastructure::remote::http_client::HttpClient;
use futures_util::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// 流式下载到文件并回调进度 (已下载, 总大小)
///
/// 先写入 `.downloading` 临时文件，完成后再重命名，失败时清理残留文件。
pub async fn download_to_file(
    client: &HttpClient,
    url: &str,
    file_path: &Path,
    progress: impl Fn(u64, u64),
) -> AppResult<u64> {
    let temp_path = file_path.with_extension("downloading");
    let result = download_to_temp(client, url, &temp_path, &progress).await;

    match result {
        Ok(size) => {
            tokio::fs::rename(&temp_path, file_path).await?;
            Ok(size)
        }
        Err(e) => {
            let _ = tokio::fs::remove_file(&temp_path).await;
            Err(e)
        }
    }
}

async fn download_to_temp(
    client: &HttpClient,
    url: &str,
    temp_path: &Path,
    progress: &impl Fn(u64, u64),
) -> AppResult<u64> {
    let response = client.get(url).await?;
    let total_size = response.content_length().unwrap_or(0);
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    let mut file = tokio::fs::File::create(temp_path).await?;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AppError::network(format!("failed to read body: {e}")))?;
        downloaded += chunk.len() as u64;
        progress(downloaded, total_size);
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(downloaded)
}
