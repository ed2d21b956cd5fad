//! ファイル読み書きの実処理
//!
//! 読み込みは UTF-8 テキストとしてそのまま返す（改行コードや BOM は変換しない）。
//! 保存は同じディレクトリの一時ファイルへ書いてからリネームする。

use crate::error::{file::Result, FileError};
use std::path::{Path, PathBuf};

/// ファイル読み込み処理
#[derive(Debug, Default)]
pub struct FileReader;

impl FileReader {
    pub fn new() -> Self {
        Self
    }

    /// ファイル内容を読み込み
    pub fn read_file(&self, path: &Path) -> Result<String> {
        let metadata = std::fs::metadata(path).map_err(|e| FileError::from_io(path, &e))?;

        if !metadata.is_file() {
            return Err(FileError::InvalidPath {
                path: format!("Not a regular file: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FileError::from_io(path, &e))?;
        self.validate_content(&content);

        Ok(content)
    }

    /// 制御文字の混入を警告する（読み込みは継続）
    pub fn validate_content(&self, content: &str) {
        if let Some((pos, ch)) = content
            .char_indices()
            .find(|(_, ch)| ch.is_control() && !matches!(ch, '\t' | '\n' | '\r'))
        {
            log::warn!("Control character found at position {}: {:?}", pos, ch);
        }
    }
}

/// ファイル保存処理
#[derive(Debug)]
pub struct FileSaver {
    atomic_save: bool,
}

impl FileSaver {
    pub fn new() -> Self {
        Self { atomic_save: true }
    }

    /// 一時ファイルを使わずに直接書き込む
    pub fn direct() -> Self {
        Self { atomic_save: false }
    }

    /// ファイルを保存
    pub fn save_file(&self, path: &Path, content: &str) -> Result<()> {
        log::debug!(
            "save_file called with path: {} ({} bytes)",
            path.display(),
            content.len()
        );

        if path.is_dir() {
            return Err(FileError::InvalidPath {
                path: format!("Is a directory: {}", path.display()),
            });
        }

        let result = if self.atomic_save {
            self.atomic_save_impl(path, content)
        } else {
            self.direct_save_impl(path, content)
        };

        match &result {
            Ok(_) => log::debug!("save operation completed: {}", path.display()),
            Err(e) => log::debug!("save operation failed: {}", e),
        }

        result
    }

    /// アトミック保存（一時ファイル経由）
    ///
    /// シンボリックリンクはリンク先を置き換える。既存ファイルの権限は引き継ぐ。
    fn atomic_save_impl(&self, path: &Path, content: &str) -> Result<()> {
        let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let temp_path = self.generate_temp_path(&target)?;
        log::trace!("atomic_save: temp_path: {}", temp_path.display());

        let discard = |e: std::io::Error| {
            let _ = std::fs::remove_file(&temp_path);
            FileError::from_io(path, &e)
        };

        std::fs::write(&temp_path, content.as_bytes()).map_err(discard)?;

        if let Ok(metadata) = std::fs::metadata(&target) {
            std::fs::set_permissions(&temp_path, metadata.permissions()).map_err(discard)?;
        }

        std::fs::rename(&temp_path, &target).map_err(discard)
    }

    /// 直接保存
    fn direct_save_impl(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content.as_bytes()).map_err(|e| FileError::from_io(path, &e))
    }

    fn generate_temp_path(&self, original: &Path) -> Result<PathBuf> {
        let invalid = || FileError::InvalidPath {
            path: original.display().to_string(),
        };
        let parent = original.parent().ok_or_else(invalid)?;
        let filename = original.file_name().ok_or_else(invalid)?;

        let temp_name = format!(".{}_{}.tmp", filename.to_string_lossy(), std::process::id());

        Ok(parent.join(temp_name))
    }
}

impl Default for FileSaver {
    fn default() -> Self {
        Self::new()
    }
}
