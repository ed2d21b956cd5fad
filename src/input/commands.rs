//! セッション操作のアクション
//!
//! メニュー・キーバインド・言語セレクタから起動される名前付き操作。

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ドキュメントセッションに対するアクション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "argument", rename_all = "kebab-case")]
pub enum Action {
    NewFile,
    OpenFile,
    #[serde(rename = "save-file")]
    Save,
    SaveAs,
    /// 言語セレクタの値（別名も可）
    SetLanguage(String),
}

impl Action {
    /// コマンド名からアクションを作る（`set-language` は引数必須）
    pub fn from_name(name: &str, argument: Option<&str>) -> Result<Self, InputError> {
        let action = match name.trim() {
            "new-file" => Action::NewFile,
            "open-file" => Action::OpenFile,
            "save-file" => Action::Save,
            "save-as" => Action::SaveAs,
            "set-language" => match argument {
                Some(token) => Action::SetLanguage(token.to_string()),
                None => {
                    return Err(InputError::CommandNotFound {
                        command: format!("{name} (missing language)"),
                    })
                }
            },
            other => {
                return Err(InputError::CommandNotFound {
                    command: other.to_string(),
                })
            }
        };
        Ok(action)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::NewFile => "new-file",
            Action::OpenFile => "open-file",
            Action::Save => "save-file",
            Action::SaveAs => "save-as",
            Action::SetLanguage(_) => "set-language",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::NewFile => "新しい無題のドキュメントを作成",
            Action::OpenFile => "ファイルを開く",
            Action::Save => "ファイルを保存",
            Action::SaveAs => "名前を付けて保存",
            Action::SetLanguage(_) => "言語モードを切り替え",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetLanguage(token) => write!(f, "{} {token}", self.name()),
            other => f.write_str(other.name()),
        }
    }
}
