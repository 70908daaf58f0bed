use crate::core::variant::ArchiveFormat;
use crate::error::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

/// 按格式解压产物到目标目录
pub fn extract_archive(format: ArchiveFormat, archive: &Path, dest_dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dest_dir)?;
    match format {
        ArchiveFormat::Zip => extract_zip(archive, dest_dir),
        ArchiveFormat::TarGz => extract_tar_gz(archive, dest_dir),
    }
}

pub fn extract_zip(zip_path: &Path, dest_dir: &Path) -> AppResult<()> {
    let file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::extraction(zip_path, format!("failed to read zip: {e}")))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| AppError::extraction(zip_path, format!("failed to read entry: {e}")))?;
        // enclosed_name 拒绝绝对路径和 `..`
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            tracing::warn!(entry = entry.name(), "skipping zip entry with unsafe path");
            continue;
        };
        let outpath = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&outpath)?;
            std::io::copy(&mut entry, &mut outfile)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
                }
            }
        }
    }
    Ok(())
}

pub fn extract_tar_gz(tar_path: &Path, dest_dir: &Path) -> AppResult<()> {
    let output = Command::new("tar")
        .arg("-xzf")
        .arg(tar_path)
        .arg("-C")
        .arg(dest_dir)
        .output()
        .map_err(|e| AppError::extraction(tar_path, format!("failed to run tar: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::extraction(tar_path, stderr.trim().to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_zip(path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default();
        writer.add_directory("lib/", options).unwrap();
        writer.start_file("lib/libLiteCore.so", options).unwrap();
        writer.write_all(b"binary").unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_zip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("artifact.zip");
        write_zip(&archive);

        let dest = dir.path().join("out/android");
        extract_archive(ArchiveFormat::Zip, &archive, &dest).unwrap();

        let content = fs::read(dest.join("lib/libLiteCore.so")).unwrap();
        assert_eq!(content, b"binary");
    }

    #[test]
    fn test_extract_corrupt_zip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"not a zip").unwrap();

        let err = extract_zip(&archive, dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Extraction { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_tar_gz() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("lib")).unwrap();
        fs::write(src.join("lib/libLiteCore.so"), b"elf").unwrap();

        let archive = dir.path().join("artifact.tar.gz");
        let status = Command::new("tar")
            .arg("-czf")
            .arg(&archive)
            .arg("-C")
            .arg(&src)
            .arg("lib")
            .status()
            .unwrap();
        assert!(status.success());

        let dest = dir.path().join("out/linux");
        extract_archive(ArchiveFormat::TarGz, &archive, &dest).unwrap();
        assert_eq!(fs::read(dest.join("lib/libLiteCore.so")).unwrap(), b"elf");
    }
}
