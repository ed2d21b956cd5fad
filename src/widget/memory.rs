//! プロセス内ウィジェット
//!
//! バッファを文字列として保持する最小実装。GUI バックエンドはフロントエンドの
//! 編集内容をここへ反映し、テストではウィジェット本体の代わりに使う。

use super::{BufferHandle, EditorWidget, Subscription, WidgetEvent};
use crate::error::WidgetError;
use crate::input::{Action, KeyChord};
use crate::language::LanguageId;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone)]
struct Buffer {
    text: String,
    language: LanguageId,
}

/// 文字列バッファを持つウィジェット
#[derive(Debug, Default)]
pub struct BufferWidget {
    buffers: HashMap<BufferHandle, Buffer>,
    attached: Option<BufferHandle>,
    subscriptions: HashMap<u64, BufferHandle>,
    events: VecDeque<WidgetEvent>,
    key_commands: HashMap<KeyChord, Action>,
    next_buffer_id: u64,
    next_subscription_id: u64,
    focused: bool,
}

impl BufferWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// アタッチ中のバッファ末尾に入力する（タイピング相当）
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(handle) = self.attached else {
            log::warn!("insert_text without an attached buffer");
            return;
        };
        if let Some(buffer) = self.buffers.get_mut(&handle) {
            buffer.text.push_str(text);
            self.notify_changed(handle);
        }
    }

    /// アタッチ中のバッファの言語
    pub fn language(&self) -> Option<LanguageId> {
        self.attached.and_then(|handle| self.buffer_language(handle))
    }

    pub fn buffer_language(&self, handle: BufferHandle) -> Option<LanguageId> {
        self.buffers.get(&handle).map(|buffer| buffer.language)
    }

    /// 生存しているバッファ数
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// 有効な購読数
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn notify_changed(&mut self, handle: BufferHandle) {
        let subscribed = self.subscriptions.values().any(|buffer| *buffer == handle);
        if subscribed {
            self.events
                .push_back(WidgetEvent::ContentChanged { buffer: handle });
        }
    }
}

impl EditorWidget for BufferWidget {
    fn create_buffer(&mut self, text: &str, language: LanguageId) -> BufferHandle {
        self.next_buffer_id += 1;
        let handle = BufferHandle(self.next_buffer_id);
        self.buffers.insert(
            handle,
            Buffer {
                text: text.to_string(),
                language,
            },
        );
        handle
    }

    fn attach_buffer(&mut self, handle: BufferHandle) -> Result<(), WidgetError> {
        if !self.buffers.contains_key(&handle) {
            return Err(WidgetError::UnknownBuffer(handle.0));
        }
        self.attached = Some(handle);
        Ok(())
    }

    fn dispose_buffer(&mut self, handle: BufferHandle) {
        if self.attached == Some(handle) {
            log::warn!("refusing to dispose attached buffer {handle}");
            return;
        }
        self.buffers.remove(&handle);
        self.subscriptions.retain(|_, buffer| *buffer != handle);
        self.events.retain(|event| match event {
            WidgetEvent::ContentChanged { buffer } => *buffer != handle,
        });
    }

    fn attached_buffer(&self) -> Option<BufferHandle> {
        self.attached
    }

    fn text(&self) -> String {
        self.attached
            .and_then(|handle| self.buffers.get(&handle))
            .map(|buffer| buffer.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&mut self, text: &str) {
        let Some(handle) = self.attached else {
            log::warn!("set_text without an attached buffer");
            return;
        };
        let changed = match self.buffers.get_mut(&handle) {
            Some(buffer) if buffer.text != text => {
                buffer.text = text.to_string();
                true
            }
            _ => false,
        };
        if changed {
            self.notify_changed(handle);
        }
    }

    fn subscribe_changes(&mut self, handle: BufferHandle) -> Result<Subscription, WidgetError> {
        if !self.buffers.contains_key(&handle) {
            return Err(WidgetError::UnknownBuffer(handle.0));
        }
        self.next_subscription_id += 1;
        let id = self.next_subscription_id;
        self.subscriptions.insert(id, handle);
        Ok(Subscription { id, buffer: handle })
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscriptions.remove(&subscription.id);
    }

    fn drain_events(&mut self) -> Vec<WidgetEvent> {
        self.events.drain(..).collect()
    }

    fn bind_key_command(&mut self, chord: KeyChord, action: Action) {
        self.key_commands.insert(chord, action);
    }

    fn dispatch_key(&self, chord: &KeyChord) -> Option<Action> {
        self.key_commands.get(chord).cloned()
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
