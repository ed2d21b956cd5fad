//! エラーハンドリングシステム
//!
//! sourcepad 全体で使用されるエラー型と、ユーザー向け通知への変換を定義する。
//! 読み込み・書き込みの失敗はセッション境界で通知に変換され、それ以上伝播しない。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum SourcepadError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// セッション操作エラー
    #[error("Session operation failed: {0}")]
    Session(#[from] SessionError),

    /// 言語解決エラー
    #[error("Language resolution failed: {0}")]
    Language(#[from] LanguageError),

    /// エディタウィジェットのエラー
    #[error("Widget operation failed: {0}")]
    Widget(#[from] WidgetError),

    /// 入力処理エラー
    #[error("Input processing failed: {0}")]
    Input(#[from] InputError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` をパス付きで分類する
    pub fn from_io(path: &Path, error: &std::io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => FileError::NotFound { path },
            ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            ErrorKind::InvalidData => FileError::Encoding {
                message: format!("{path}: {error}"),
            },
            ErrorKind::InvalidInput => FileError::InvalidPath { path },
            _ => FileError::Io {
                message: error.to_string(),
            },
        }
    }
}

/// 言語解決のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("Unknown language: {0}")]
    Unknown(String),
}

/// ウィジェット操作のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Unknown buffer handle: {0}")]
    UnknownBuffer(u64),

    #[error("No buffer is attached")]
    NoAttachedBuffer,
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid key chord: {chord}")]
    InvalidKeyChord { chord: String },

    #[error("Command not found: {command}")]
    CommandNotFound { command: String },
}

/// ドキュメントセッションの操作エラー
///
/// いずれもセッション状態を変更せずに返される。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: FileError },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: FileError },

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}

impl From<LanguageError> for SessionError {
    fn from(error: LanguageError) -> Self {
        match error {
            LanguageError::Unknown(token) => SessionError::UnknownLanguage(token),
        }
    }
}

/// 通知レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// ユーザーに表示するブロッキング通知
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// セッションエラーから表示用メッセージを組み立てる
    pub fn from_session_error(error: &SessionError) -> Self {
        match error {
            SessionError::Read { path, source } => Self::error(format!(
                "ファイルを開けませんでした: {} ({})",
                path.display(),
                describe_file_error(source)
            )),
            SessionError::Write { path, source } => Self::error(format!(
                "ファイルを保存できませんでした: {} ({})",
                path.display(),
                describe_file_error(source)
            )),
            SessionError::UnknownLanguage(token) => Self {
                level: NotificationLevel::Warning,
                message: format!("未対応の言語です: {token}"),
            },
            SessionError::Widget(err) => Self::error(format!("エディタの操作に失敗しました: {err}")),
        }
    }
}

fn describe_file_error(error: &FileError) -> String {
    match error {
        FileError::NotFound { .. } => "ファイルが見つかりません".to_string(),
        FileError::PermissionDenied { .. } => "アクセス権限がありません".to_string(),
        FileError::InvalidPath { .. } => "無効なパスです".to_string(),
        FileError::Encoding { .. } => "UTF-8 テキストではありません".to_string(),
        FileError::Io { message } => message.clone(),
    }
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, SourcepadError>;

/// 各モジュール固有のResult型
pub mod file {
    pub type Result<T> = std::result::Result<T, super::FileError>;
}

pub mod session {
    pub type Result<T> = std::result::Result<T, super::SessionError>;
}
