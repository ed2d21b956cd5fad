//! キーバインド
//!
//! プラットフォーム共通のコマンド修飾キー（Linux/Windows の Ctrl、macOS の Cmd）を
//! 一つの `command` 修飾として扱う。

use crate::error::InputError;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyModifiers {
    /// Ctrl もしくは Cmd
    pub command: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Esc,
    F(u8),
}

/// キーの組み合わせ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyChord {
    /// 修飾なしのキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// コマンド修飾付きの文字キー（`CtrlCmd+S` など）
    pub fn command(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                command: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(ch.to_ascii_lowercase()),
        }
    }

    /// 保存の既定キー
    pub fn save() -> Self {
        Self::command('s')
    }

    /// ターミナル/ウェブビューのキーイベントから変換する
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        let code = match event.code {
            CrosstermKeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            _ => return None,
        };
        let modifiers = KeyModifiers {
            command: event
                .modifiers
                .intersects(CrosstermModifiers::CONTROL | CrosstermModifiers::SUPER),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };
        Some(Self { modifiers, code })
    }
}

impl FromStr for KeyChord {
    type Err = InputError;

    /// `"CtrlCmd+S"`, `"Ctrl+Shift+S"`, `"F5"` のような表記を解釈する
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InputError::InvalidKeyChord {
            chord: raw.to_string(),
        };

        let mut modifiers = KeyModifiers::default();
        let mut code = None;

        for part in raw.split('+').map(str::trim) {
            if code.is_some() {
                return Err(invalid());
            }
            match part.to_ascii_lowercase().as_str() {
                "ctrlcmd" | "ctrl" | "cmd" | "control" | "meta" => modifiers.command = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "enter" => code = Some(KeyCode::Enter),
                "tab" => code = Some(KeyCode::Tab),
                "esc" | "escape" => code = Some(KeyCode::Esc),
                key => code = Some(parse_key(key).ok_or_else(invalid)?),
            }
        }

        code.map(|code| Self { modifiers, code }).ok_or_else(invalid)
    }
}

fn parse_key(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(KeyCode::Char(ch)),
        _ => key
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=24).contains(n))
            .map(KeyCode::F),
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.command {
            f.write_str("CtrlCmd+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        match &self.code {
            KeyCode::Char(ch) => write!(f, "{}", ch.to_ascii_uppercase()),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::F(n) => write!(f, "F{n}"),
        }
    }
}
