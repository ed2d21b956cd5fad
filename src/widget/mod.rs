//! 埋め込みエディタウィジェットとの境界
//!
//! レイアウト・カーソル・ハイライトはウィジェット側の責務。
//! セッションはバッファの生成・差し替え・テキストの読み書きと、
//! 変更通知の購読だけを行う。

mod memory;

pub use memory::BufferWidget;

use crate::error::WidgetError;
use crate::input::{Action, KeyChord};
use crate::language::LanguageId;
use std::fmt;

/// ウィジェットが所有するバッファの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u64);

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 変更通知の購読ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub id: u64,
    pub buffer: BufferHandle,
}

/// ウィジェットからの通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// 購読中のバッファのテキストが変化した
    ContentChanged { buffer: BufferHandle },
}

/// 埋め込みエディタウィジェット
pub trait EditorWidget {
    /// 言語を束縛した新しいバッファを生成する（アタッチはしない）
    fn create_buffer(&mut self, text: &str, language: LanguageId) -> BufferHandle;

    /// バッファを表示対象にする
    fn attach_buffer(&mut self, handle: BufferHandle) -> Result<(), WidgetError>;

    /// 不要になったバッファを破棄する
    fn dispose_buffer(&mut self, handle: BufferHandle);

    /// 現在アタッチされているバッファ
    fn attached_buffer(&self) -> Option<BufferHandle>;

    /// アタッチ中のバッファのテキスト
    fn text(&self) -> String;

    /// アタッチ中のバッファのテキストを置き換える
    fn set_text(&mut self, text: &str);

    /// バッファの変更通知を購読する
    fn subscribe_changes(&mut self, handle: BufferHandle) -> Result<Subscription, WidgetError>;

    /// 購読を解除する
    fn unsubscribe(&mut self, subscription: Subscription);

    /// 溜まっている通知を取り出す
    fn drain_events(&mut self) -> Vec<WidgetEvent>;

    /// キーの組み合わせにアクションを割り当てる
    fn bind_key_command(&mut self, chord: KeyChord, action: Action);

    /// キー入力に割り当てられたアクションを引く
    fn dispatch_key(&self, chord: &KeyChord) -> Option<Action>;

    /// 入力フォーカスを与える
    fn focus(&mut self);
}
