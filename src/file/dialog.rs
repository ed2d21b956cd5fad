//! ファイル選択ダイアログの境界
//!
//! ネイティブのダイアログはフロントエンド側で表示される。ここでは
//! その結果（選ばれたパス、もしくはキャンセル）だけを扱う。

use std::collections::VecDeque;
use std::path::PathBuf;

/// 開くダイアログのフィルタ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl DialogFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

/// ファイル選択ダイアログ
///
/// `None` はユーザーによるキャンセルを表す。
pub trait FileDialog {
    fn show_open_dialog(&mut self, filter: &DialogFilter) -> Option<PathBuf>;

    fn show_save_dialog(&mut self) -> Option<PathBuf>;
}

/// ダイアログの要求記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogRequest {
    Open(DialogFilter),
    Save,
}

/// あらかじめ与えられた応答を順に返すダイアログ
///
/// GUI バックエンドはフロントエンドで選ばれたパスを積んでから操作を呼ぶ。
/// 応答が積まれていなければキャンセル扱い。
#[derive(Debug, Default)]
pub struct QueuedDialog {
    responses: VecDeque<Option<PathBuf>>,
    requests: Vec<DialogRequest>,
}

impl QueuedDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次のダイアログの応答を積む（`None` でキャンセル）
    pub fn push_response(&mut self, response: Option<PathBuf>) {
        self.responses.push_back(response);
    }

    /// 消費されなかった応答を捨てる
    pub fn clear_responses(&mut self) {
        self.responses.clear();
    }

    /// これまでに表示要求されたダイアログ
    pub fn requests(&self) -> &[DialogRequest] {
        &self.requests
    }

    fn next_response(&mut self) -> Option<PathBuf> {
        self.responses.pop_front().flatten()
    }
}

impl FileDialog for QueuedDialog {
    fn show_open_dialog(&mut self, filter: &DialogFilter) -> Option<PathBuf> {
        self.requests.push(DialogRequest::Open(filter.clone()));
        self.next_response()
    }

    fn show_save_dialog(&mut self) -> Option<PathBuf> {
        self.requests.push(DialogRequest::Save);
        self.next_response()
    }
}
