//! ファイル操作モジュール
//!
//! - 読み込みは UTF-8 テキストのみ（それ以外は読み込みエラー）
//! - 保存は一時ファイル経由のアトミック書き込み
//! - 親ディレクトリの自動作成はしない
//! - ダイアログはキャンセルを `None` で返す

pub mod dialog;
pub mod io;
pub mod operations;

pub use dialog::{DialogFilter, DialogRequest, FileDialog, QueuedDialog};
pub use io::{read_file, write_file, DiskFileStore, FileStore};
pub use operations::{FileReader, FileSaver};
