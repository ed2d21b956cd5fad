use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use serde::{Deserialize, Serialize};
use sourcepad::input::KeyChord;
use thiserror::Error;

/// フロントエンドの keydown イベント
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyStrokePayload {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    /// macOS の Cmd
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct KeySequencePayload {
    /// 入力されたキー列（時系列順）
    #[serde(default)]
    pub keys: Vec<KeyStrokePayload>,
    /// キー操作で開かれるダイアログへの応答（フロントエンドで選ばれたパス、`null` はキャンセル）
    #[serde(default)]
    pub dialog_responses: Vec<Option<String>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyConversionError {
    #[error("未対応のキーです: {0}")]
    UnsupportedKey(String),
}

impl KeySequencePayload {
    pub fn from_strokes(keys: Vec<KeyStrokePayload>) -> Self {
        Self {
            keys,
            dialog_responses: Vec::new(),
        }
    }

    /// セッションに渡せるキーの組み合わせへ変換する
    ///
    /// 修飾キー単独の押下など、割り当ての対象にならないキーは読み飛ばす。
    pub fn to_chords(&self) -> Result<Vec<KeyChord>, KeyConversionError> {
        let mut chords = Vec::with_capacity(self.keys.len());
        for stroke in &self.keys {
            let event = stroke.to_key_event()?;
            match KeyChord::from_key_event(&event) {
                Some(chord) => chords.push(chord),
                None => log::trace!("no chord for {:?}", stroke.key),
            }
        }
        Ok(chords)
    }
}

impl KeyStrokePayload {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
        }
    }

    pub fn to_key_event(&self) -> Result<KeyEvent, KeyConversionError> {
        let code = parse_key_code(&self.key)?;
        let mut modifiers = CrosstermModifiers::empty();
        if self.ctrl {
            modifiers |= CrosstermModifiers::CONTROL;
        }
        if self.meta {
            modifiers |= CrosstermModifiers::SUPER;
        }
        if self.alt {
            modifiers |= CrosstermModifiers::ALT;
        }
        if self.shift {
            modifiers |= CrosstermModifiers::SHIFT;
        }
        Ok(KeyEvent::new(code, modifiers))
    }
}

/// DOM の `KeyboardEvent.key` 名を解釈する
fn parse_key_code(raw: &str) -> Result<CrosstermKeyCode, KeyConversionError> {
    let mut chars = raw.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Ok(CrosstermKeyCode::Char(ch));
    }

    let key = raw.trim();
    let code = match key.to_ascii_lowercase().as_str() {
        "enter" => CrosstermKeyCode::Enter,
        "backspace" => CrosstermKeyCode::Backspace,
        "delete" => CrosstermKeyCode::Delete,
        "tab" => CrosstermKeyCode::Tab,
        "escape" | "esc" => CrosstermKeyCode::Esc,
        "arrowup" | "up" => CrosstermKeyCode::Up,
        "arrowdown" | "down" => CrosstermKeyCode::Down,
        "arrowleft" | "left" => CrosstermKeyCode::Left,
        "arrowright" | "right" => CrosstermKeyCode::Right,
        "control" | "meta" | "alt" | "shift" => CrosstermKeyCode::Modifier(modifier_code(key)),
        lower => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if (1..=24).contains(&n) => CrosstermKeyCode::F(n),
            _ => return Err(KeyConversionError::UnsupportedKey(key.to_string())),
        },
    };

    Ok(code)
}

fn modifier_code(key: &str) -> crossterm::event::ModifierKeyCode {
    use crossterm::event::ModifierKeyCode::*;
    match key.to_ascii_lowercase().as_str() {
        "control" => LeftControl,
        "meta" => LeftSuper,
        "alt" => LeftAlt,
        _ => LeftShift,
    }
}
