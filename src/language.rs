//! 言語リゾルバ
//!
//! 拡張子やセレクタで選ばれたトークンを正規の言語IDへ変換し、
//! その言語に束縛された新しいバッファをウィジェットに要求する。

use crate::chrome::WindowChrome;
use crate::error::LanguageError;
use crate::widget::{BufferHandle, EditorWidget};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 正規の言語ID
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    /// 初回起動時の既定言語
    #[default]
    JavaScript,
    TypeScript,
    Html,
    Css,
    /// 未対応の拡張子のフォールバック
    PlainText,
}

impl LanguageId {
    /// 言語セレクタに並ぶ言語
    pub const SELECTABLE: [LanguageId; 4] = [
        LanguageId::JavaScript,
        LanguageId::TypeScript,
        LanguageId::Html,
        LanguageId::Css,
    ];

    /// ファイルを開くダイアログのフィルタ
    pub const SOURCE_EXTENSIONS: [&'static str; 4] = ["js", "ts", "html", "css"];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
            LanguageId::Html => "html",
            LanguageId::Css => "css",
            LanguageId::PlainText => "plaintext",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = LanguageError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        resolve(token)
    }
}

/// トークンを言語IDへ解決する
///
/// 別名 `js`/`ts` と正規ID（`javascript`, `typescript`, `html`, `css`, `plaintext`）を受け付ける。
/// それ以外は [`LanguageError::Unknown`]。
pub fn resolve(token: &str) -> Result<LanguageId, LanguageError> {
    let normalized = token.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "js" | "javascript" => Ok(LanguageId::JavaScript),
        "ts" | "typescript" => Ok(LanguageId::TypeScript),
        "html" => Ok(LanguageId::Html),
        "css" => Ok(LanguageId::Css),
        "plaintext" => Ok(LanguageId::PlainText),
        _ => Err(LanguageError::Unknown(token.to_string())),
    }
}

/// パスの拡張子から言語を推定する（未知の拡張子はプレーンテキスト）
pub fn resolve_path(path: &Path) -> LanguageId {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        log::debug!("no extension on {}, using plaintext", path.display());
        return LanguageId::PlainText;
    };

    resolve(extension).unwrap_or_else(|_| {
        log::debug!("unrecognized extension {extension:?}, using plaintext");
        LanguageId::PlainText
    })
}

/// 言語リゾルバ
///
/// バッファの生成と言語セレクタの同期をまとめて扱う。
#[derive(Debug, Default)]
pub struct LanguageResolver;

impl LanguageResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, token: &str) -> Result<LanguageId, LanguageError> {
        resolve(token)
    }

    pub fn resolve_path(&self, path: &Path) -> LanguageId {
        resolve_path(path)
    }

    /// 指定言語の新しいバッファを生成し、セレクタの表示を合わせる
    ///
    /// 既存バッファの言語は変更しない。ウィジェット側の言語束縛は生成時に固定されるため。
    pub fn create_buffer<W, C>(
        &self,
        widget: &mut W,
        chrome: &mut C,
        text: &str,
        language: LanguageId,
    ) -> BufferHandle
    where
        W: EditorWidget + ?Sized,
        C: WindowChrome + ?Sized,
    {
        let handle = widget.create_buffer(text, language);
        chrome.set_language_selector(language);
        log::debug!("created buffer {handle} ({language}, {} bytes)", text.len());
        handle
    }
}
