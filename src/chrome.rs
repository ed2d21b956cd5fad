//! ウィンドウ表示
//!
//! タイトルバー・言語セレクタ・通知ダイアログへの出力先。

use crate::error::Notification;
use crate::language::LanguageId;
use std::collections::VecDeque;
use std::path::Path;

/// 無題ドキュメントの表示名
pub const UNTITLED: &str = "Untitled";

/// 未保存の変更を示すサフィックス
pub const DIRTY_MARKER: &str = " *";

/// タイトル文字列を組み立てる
///
/// `"Untitled"`, `"Untitled *"`, `path`, `"path *"` のいずれか。
pub fn window_title(path: Option<&Path>, is_dirty: bool) -> String {
    let mut title = match path {
        Some(path) => path.display().to_string(),
        None => UNTITLED.to_string(),
    };
    if is_dirty {
        title.push_str(DIRTY_MARKER);
    }
    title
}

/// ウィンドウ表示への出力
pub trait WindowChrome {
    fn set_title(&mut self, title: &str);

    /// 言語セレクタの表示値を合わせる
    fn set_language_selector(&mut self, language: LanguageId);

    /// ブロッキング通知を表示する
    fn notify(&mut self, notification: Notification);
}

/// 表示状態を保持するだけのクローム
///
/// GUI バックエンドはここからスナップショットを作る。
#[derive(Debug, Default, Clone)]
pub struct ChromeState {
    title: String,
    language_selector: Option<LanguageId>,
    notifications: VecDeque<Notification>,
    title_updates: usize,
}

impl ChromeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn language_selector(&self) -> Option<LanguageId> {
        self.language_selector
    }

    /// 表示待ちの通知
    pub fn pending_notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// 表示待ちの通知を取り出す
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// `set_title` が呼ばれた回数
    pub fn title_updates(&self) -> usize {
        self.title_updates
    }
}

impl WindowChrome for ChromeState {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.title_updates += 1;
    }

    fn set_language_selector(&mut self, language: LanguageId) {
        self.language_selector = Some(language);
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }
}
