//! ファイルI/Oの境界
//!
//! セッションはこのトレイト越しにのみファイルを読み書きする。

use crate::error::file::Result;
use crate::file::operations::{FileReader, FileSaver};
use std::path::Path;

/// テキストファイルの読み書き
pub trait FileStore {
    /// ファイル全体を UTF-8 テキストとして読み込む
    fn read_text(&self, path: &Path) -> Result<String>;

    /// テキストでファイル全体を置き換える
    fn write_text(&self, path: &Path, text: &str) -> Result<()>;
}

/// ローカルディスク上のファイル
#[derive(Debug, Default)]
pub struct DiskFileStore {
    reader: FileReader,
    saver: FileSaver,
}

impl DiskFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saver(saver: FileSaver) -> Self {
        Self {
            reader: FileReader::new(),
            saver,
        }
    }
}

impl FileStore for DiskFileStore {
    fn read_text(&self, path: &Path) -> Result<String> {
        self.reader.read_file(path)
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        self.saver.save_file(path, text)
    }
}

/// ファイル読み込みの便利関数
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    DiskFileStore::new().read_text(path.as_ref())
}

/// ファイル書き込みの便利関数
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    DiskFileStore::new().write_text(path.as_ref(), content)
}
