//! 入力処理
//!
//! キーの組み合わせとセッション操作の対応付け

pub mod commands;
pub mod keybinding;

pub use commands::Action;
pub use keybinding::{KeyChord, KeyCode, KeyModifiers};
