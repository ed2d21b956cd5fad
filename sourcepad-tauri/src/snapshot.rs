use serde::{Deserialize, Serialize};
use sourcepad::{DesktopSession, LanguageId, Notification};

/// フロントエンドへ返す表示状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub buffer: BufferSnapshot,
    pub status: StatusSnapshot,
    pub language_selector: LanguageSelectorSnapshot,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BufferSnapshot {
    /// ウィジェット側のモデルを差し替えるための識別子
    pub handle: u64,
    pub text: String,
    pub language: LanguageId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub title: String,
    pub path: Option<String>,
    pub is_modified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageSelectorSnapshot {
    pub value: LanguageId,
    pub options: Vec<LanguageId>,
}

impl EditorSnapshot {
    /// セッションの現在の状態を写し取る（表示待ちの通知はここで消費する）
    pub fn capture(session: &mut DesktopSession) -> Self {
        let language = session.active_language();
        let selector = session.chrome().language_selector().unwrap_or(language);
        Self {
            buffer: BufferSnapshot {
                handle: session.buffer().0,
                text: session.text(),
                language,
            },
            status: StatusSnapshot {
                title: session.chrome().title().to_string(),
                path: session
                    .active_path()
                    .map(|path| path.display().to_string()),
                is_modified: session.is_dirty(),
            },
            language_selector: LanguageSelectorSnapshot {
                value: selector,
                options: LanguageId::SELECTABLE.to_vec(),
            },
            notifications: session.chrome_mut().take_notifications(),
        }
    }
}
