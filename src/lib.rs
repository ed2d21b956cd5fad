//! sourcepad - 構文対応ウィジェットを埋め込んだ最小のソースファイルエディタ
//!
//! このクレートはドキュメントセッション（どのファイルを開いているか、未保存の変更が
//! あるか、どの言語モードか）と、その協調者との境界を提供する。

// コアモジュール
pub mod error;
pub mod logging;

// 協調者との境界
pub mod chrome;
pub mod file;
pub mod widget;

// ロジック層
pub mod input;
pub mod language;
pub mod session;

// 公開API
pub use chrome::{window_title, ChromeState, WindowChrome};
pub use error::{Notification, NotificationLevel, Result, SessionError, SourcepadError};
pub use language::{LanguageId, LanguageResolver};
pub use session::{DesktopSession, DocumentSession, Outcome, SessionState};
