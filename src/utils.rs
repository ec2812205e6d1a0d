use log::info;
use std::io;
use std::path::Path;

/// Creates `path` (and parents) unless it already is a directory.
pub async fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Output path exists but is not a directory: {}", path.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            tokio::fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_directories() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        let nested = root.path().join("a").join("b");
        ensure_dir_exists(&nested).await?;
        assert!(nested.is_dir());
        ensure_dir_exists(&nested).await?;
        Ok(())
    }

    #[tokio::test]
    async fn rejects_existing_file() -> io::Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        let err = ensure_dir_exists(file.path()).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }
}
