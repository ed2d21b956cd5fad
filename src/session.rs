//! ドキュメントセッション
//!
//! 開いているファイル・未保存の変更・言語モードを一元管理する状態機械。
//! 新規作成 / 開く / 保存 / 名前を付けて保存 / 言語切り替えを、ウィジェット・
//! ファイルI/O・ダイアログ・ウィンドウ表示の各協調者に対して実行する。
//!
//! 操作は成功して遷移するか、失敗して何も変えないかのどちらか。失敗は
//! ユーザー通知に変換したうえで呼び出し元にも返す。

use crate::chrome::{window_title, ChromeState, WindowChrome};
use crate::error::{session::Result, Notification, SessionError};
use crate::file::{DialogFilter, DiskFileStore, FileDialog, FileStore, QueuedDialog};
use crate::input::{Action, KeyChord};
use crate::language::{LanguageId, LanguageResolver};
use crate::widget::{BufferHandle, BufferWidget, EditorWidget, Subscription, WidgetEvent};
use std::path::{Path, PathBuf};

/// 保存済み表示の通知文
pub const SAVED_MESSAGE: &str = "保存しました";

/// 操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// ダイアログがキャンセルされ、何も変わらなかった
    Cancelled,
}

/// セッション状態の写し
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub active_path: Option<PathBuf>,
    pub is_dirty: bool,
    pub active_language: LanguageId,
}

/// デスクトップ版の構成
pub type DesktopSession = DocumentSession<BufferWidget, DiskFileStore, QueuedDialog, ChromeState>;

/// ドキュメントセッション
pub struct DocumentSession<W, F, D, C> {
    widget: W,
    files: F,
    dialog: D,
    chrome: C,
    resolver: LanguageResolver,
    active_path: Option<PathBuf>,
    is_dirty: bool,
    active_language: LanguageId,
    buffer: BufferHandle,
    subscription: Subscription,
}

impl DesktopSession {
    /// ディスクと文字列バッファを使う既定構成
    pub fn desktop(language: LanguageId) -> Result<Self> {
        DocumentSession::with_language(
            BufferWidget::new(),
            DiskFileStore::new(),
            QueuedDialog::new(),
            ChromeState::new(),
            language,
        )
    }
}

impl<W, F, D, C> DocumentSession<W, F, D, C>
where
    W: EditorWidget,
    F: FileStore,
    D: FileDialog,
    C: WindowChrome,
{
    /// 既定言語の無題・空・未変更の状態で起動する
    pub fn new(widget: W, files: F, dialog: D, chrome: C) -> Result<Self> {
        Self::with_language(widget, files, dialog, chrome, LanguageId::default())
    }

    pub fn with_language(
        mut widget: W,
        files: F,
        dialog: D,
        mut chrome: C,
        language: LanguageId,
    ) -> Result<Self> {
        let resolver = LanguageResolver::new();
        let buffer = resolver.create_buffer(&mut widget, &mut chrome, "", language);
        widget.attach_buffer(buffer)?;
        let subscription = widget.subscribe_changes(buffer)?;
        widget.bind_key_command(KeyChord::save(), Action::Save);
        widget.focus();

        let mut session = Self {
            widget,
            files,
            dialog,
            chrome,
            resolver,
            active_path: None,
            is_dirty: false,
            active_language: language,
            buffer,
            subscription,
        };
        session.refresh_title();
        log::info!("session started ({language})");
        Ok(session)
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn active_language(&self) -> LanguageId {
        self.active_language
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            active_path: self.active_path.clone(),
            is_dirty: self.is_dirty,
            active_language: self.active_language,
        }
    }

    /// 現在のタイトル
    pub fn title(&self) -> String {
        window_title(self.active_path.as_deref(), self.is_dirty)
    }

    /// バッファのテキスト
    pub fn text(&self) -> String {
        self.widget.text()
    }

    /// 変更通知を購読しているバッファ
    pub fn buffer(&self) -> BufferHandle {
        self.buffer
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut D {
        &mut self.dialog
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut C {
        &mut self.chrome
    }

    /// 新規作成
    ///
    /// 未保存の変更は確認なしで破棄する。言語は直前のものを引き継ぐ。
    pub fn new_document(&mut self) -> Result<Outcome> {
        self.process_widget_events();
        if self.is_dirty {
            log::info!("discarding unsaved changes");
        }

        let language = self.active_language;
        self.replace_buffer("", language).map_err(|err| self.report(err))?;
        self.active_path = None;
        self.is_dirty = false;
        self.refresh_title();
        Ok(Outcome::Completed)
    }

    /// 指定パスのファイルを開く
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<Outcome> {
        self.process_widget_events();
        let path = path.as_ref();

        let text = self
            .files
            .read_text(path)
            .map_err(|source| {
                SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            })
            .map_err(|err| self.report(err))?;

        let language = self.resolver.resolve_path(path);
        self.replace_buffer(&text, language)
            .map_err(|err| self.report(err))?;
        self.active_path = Some(absolute_path(path));
        self.is_dirty = false;
        self.refresh_title();
        self.widget.focus();
        log::info!("opened {} as {language}", path.display());
        Ok(Outcome::Completed)
    }

    /// ファイル選択ダイアログから開く
    pub fn open_with_dialog(&mut self) -> Result<Outcome> {
        let filter = DialogFilter::new("source", &LanguageId::SOURCE_EXTENSIONS);
        match self.dialog.show_open_dialog(&filter) {
            Some(path) => self.open(path),
            None => {
                log::debug!("open dialog cancelled");
                Ok(Outcome::Cancelled)
            }
        }
    }

    /// 保存
    ///
    /// 無題なら保存ダイアログでパスを決める。パスが決まっていればダイアログなしで上書きする。
    pub fn save(&mut self) -> Result<Outcome> {
        self.process_widget_events();

        match self.active_path.clone() {
            Some(path) => {
                self.write_to(path)?;
                self.chrome.notify(Notification::info(SAVED_MESSAGE));
                Ok(Outcome::Completed)
            }
            None => self.save_via_dialog(),
        }
    }

    /// 名前を付けて保存（常にダイアログを表示する）
    pub fn save_as(&mut self) -> Result<Outcome> {
        self.process_widget_events();
        self.save_via_dialog()
    }

    /// 言語モードを切り替える
    ///
    /// テキストを保ったままバッファを差し替える。変更フラグとパスには触れない。
    pub fn set_language(&mut self, token: &str) -> Result<LanguageId> {
        self.process_widget_events();

        let language = self
            .resolver
            .resolve(token)
            .map_err(SessionError::from)
            .map_err(|err| self.report(err))?;

        let text = self.widget.text();
        self.replace_buffer(&text, language)
            .map_err(|err| self.report(err))?;
        log::debug!("language switched to {language}");
        Ok(language)
    }

    /// ウィジェットからの変更通知
    ///
    /// 差し替え前のバッファからの通知は無視する。
    pub fn on_content_changed(&mut self, buffer: BufferHandle) {
        if buffer != self.subscription.buffer {
            log::trace!("ignoring change from detached buffer {buffer}");
            return;
        }
        self.is_dirty = true;
        self.refresh_title();
    }

    /// ウィジェットに溜まった通知を処理する
    pub fn process_widget_events(&mut self) {
        for event in self.widget.drain_events() {
            match event {
                WidgetEvent::ContentChanged { buffer } => self.on_content_changed(buffer),
            }
        }
    }

    /// アクションを実行する
    pub fn execute(&mut self, action: Action) -> Result<Outcome> {
        log::debug!("execute {action}");
        match action {
            Action::NewFile => self.new_document(),
            Action::OpenFile => self.open_with_dialog(),
            Action::Save => self.save(),
            Action::SaveAs => self.save_as(),
            Action::SetLanguage(token) => self.set_language(&token).map(|_| Outcome::Completed),
        }
    }

    /// キー入力を割り当て済みのアクションに振り分ける
    pub fn handle_key(&mut self, chord: &KeyChord) -> Option<Result<Outcome>> {
        let action = self.widget.dispatch_key(chord)?;
        Some(self.execute(action))
    }

    fn save_via_dialog(&mut self) -> Result<Outcome> {
        let Some(path) = self.dialog.show_save_dialog() else {
            log::debug!("save dialog cancelled");
            return Ok(Outcome::Cancelled);
        };
        self.write_to(path)?;
        Ok(Outcome::Completed)
    }

    fn write_to(&mut self, path: PathBuf) -> Result<()> {
        let text = self.widget.text();
        if let Err(source) = self.files.write_text(&path, &text) {
            return Err(self.report(SessionError::Write { path, source }));
        }

        log::info!("saved {} ({} bytes)", path.display(), text.len());
        self.active_path = Some(absolute_path(&path));
        self.is_dirty = false;
        self.refresh_title();
        Ok(())
    }

    /// 新しいバッファを生成して差し替え、変更通知の購読も張り替える
    fn replace_buffer(&mut self, text: &str, language: LanguageId) -> Result<()> {
        let handle = self
            .resolver
            .create_buffer(&mut self.widget, &mut self.chrome, text, language);

        if let Err(err) = self.widget.attach_buffer(handle) {
            self.widget.dispose_buffer(handle);
            self.chrome.set_language_selector(self.active_language);
            return Err(err.into());
        }

        let subscription = match self.widget.subscribe_changes(handle) {
            Ok(subscription) => subscription,
            Err(err) => {
                // 元のバッファに戻す
                if let Err(restore) = self.widget.attach_buffer(self.buffer) {
                    log::warn!("could not reattach {}: {restore}", self.buffer);
                }
                self.widget.dispose_buffer(handle);
                self.chrome.set_language_selector(self.active_language);
                return Err(err.into());
            }
        };

        let previous = std::mem::replace(&mut self.subscription, subscription);
        self.widget.unsubscribe(previous);
        let previous_buffer = std::mem::replace(&mut self.buffer, handle);
        self.widget.dispose_buffer(previous_buffer);
        self.active_language = language;
        Ok(())
    }

    fn refresh_title(&mut self) {
        let title = self.title();
        self.chrome.set_title(&title);
    }

    fn report(&mut self, error: SessionError) -> SessionError {
        log::warn!("{error}");
        self.chrome.notify(Notification::from_session_error(&error));
        error
    }
}

/// 相対パスは現在のディレクトリを基準に絶対パスへ直す
fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|err| {
        log::warn!("could not make {} absolute: {err}", path.display());
        path.to_path_buf()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::ChromeState;
    use crate::error::{FileError, NotificationLevel, WidgetError};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// メモリ上のファイル
    #[derive(Default)]
    struct MemoryFiles {
        files: RefCell<HashMap<PathBuf, String>>,
        read_only: bool,
    }

    impl MemoryFiles {
        fn with_file(path: &str, content: &str) -> Self {
            let files = Self::default();
            files
                .files
                .borrow_mut()
                .insert(PathBuf::from(path), content.to_string());
            files
        }

        fn content(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl FileStore for MemoryFiles {
        fn read_text(&self, path: &Path) -> crate::error::file::Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| FileError::NotFound {
                    path: path.display().to_string(),
                })
        }

        fn write_text(&self, path: &Path, text: &str) -> crate::error::file::Result<()> {
            if self.read_only {
                return Err(FileError::PermissionDenied {
                    path: path.display().to_string(),
                });
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), text.to_string());
            Ok(())
        }
    }

    type TestSession = DocumentSession<BufferWidget, MemoryFiles, QueuedDialog, ChromeState>;

    fn session_with(files: MemoryFiles) -> TestSession {
        DocumentSession::new(BufferWidget::new(), files, QueuedDialog::new(), ChromeState::new())
            .unwrap()
    }

    fn type_text(session: &mut TestSession, text: &str) {
        session.widget_mut().insert_text(text);
        session.process_widget_events();
    }

    #[test]
    fn starts_untitled_clean_and_empty() {
        let session = session_with(MemoryFiles::default());

        assert_eq!(session.active_path(), None);
        assert!(!session.is_dirty());
        assert_eq!(session.text(), "");
        assert_eq!(session.active_language(), LanguageId::JavaScript);
        assert_eq!(session.chrome().title(), "Untitled");
        assert_eq!(session.chrome().language_selector(), Some(LanguageId::JavaScript));
        assert!(session.widget().is_focused());
    }

    #[test]
    fn typing_marks_dirty_and_title() {
        let mut session = session_with(MemoryFiles::default());
        type_text(&mut session, "let a = 1;");

        assert!(session.is_dirty());
        assert_eq!(session.chrome().title(), "Untitled *");

        type_text(&mut session, "\n");
        assert_eq!(session.chrome().title(), "Untitled *");
    }

    #[test]
    fn open_binds_path_language_and_text() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/a.css", "body{}"));
        type_text(&mut session, "scratch");

        assert_eq!(session.open("/tmp/a.css").unwrap(), Outcome::Completed);

        assert_eq!(session.text(), "body{}");
        assert_eq!(session.active_language(), LanguageId::Css);
        assert_eq!(session.active_path(), Some(Path::new("/tmp/a.css")));
        assert!(!session.is_dirty());
        assert_eq!(session.chrome().title(), "/tmp/a.css");
        assert_eq!(session.chrome().language_selector(), Some(LanguageId::Css));
    }

    #[test]
    fn failed_open_leaves_state_untouched() {
        let mut session = session_with(MemoryFiles::default());
        type_text(&mut session, "draft");
        let before = session.state();

        let err = session.open("/tmp/missing.js").unwrap_err();

        assert!(matches!(err, SessionError::Read { .. }));
        assert_eq!(session.state(), before);
        assert_eq!(session.text(), "draft");
        assert_eq!(session.chrome().title(), "Untitled *");
        let notifications = session.chrome_mut().take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
    }

    #[test]
    fn save_untitled_uses_dialog_path() {
        let mut session = session_with(MemoryFiles::default());
        type_text(&mut session, "const x = 1;");
        session
            .dialog_mut()
            .push_response(Some(PathBuf::from("/tmp/x.js")));

        assert_eq!(session.save().unwrap(), Outcome::Completed);

        assert_eq!(session.files().content("/tmp/x.js").as_deref(), Some("const x = 1;"));
        assert_eq!(session.active_path(), Some(Path::new("/tmp/x.js")));
        assert!(!session.is_dirty());
        assert_eq!(session.chrome().title(), "/tmp/x.js");
    }

    #[test]
    fn cancelled_save_dialog_is_a_no_op() {
        let mut session = session_with(MemoryFiles::default());
        type_text(&mut session, "draft");
        let before = session.state();
        let title_updates = session.chrome().title_updates();

        assert_eq!(session.save().unwrap(), Outcome::Cancelled);

        assert_eq!(session.state(), before);
        assert_eq!(session.chrome().title_updates(), title_updates);
        assert!(session.files().files.borrow().is_empty());
    }

    #[test]
    fn failed_untitled_save_keeps_path_unset() {
        let files = MemoryFiles {
            read_only: true,
            ..MemoryFiles::default()
        };
        let mut session = session_with(files);
        type_text(&mut session, "draft");
        session
            .dialog_mut()
            .push_response(Some(PathBuf::from("/readonly/x.js")));

        let err = session.save().unwrap_err();

        assert!(matches!(err, SessionError::Write { .. }));
        assert_eq!(session.active_path(), None);
        assert!(session.is_dirty());
        assert_eq!(session.chrome().title(), "Untitled *");
    }

    #[test]
    fn save_titled_writes_without_dialog_and_reports() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/a.css", "body{}"));
        session.open("/tmp/a.css").unwrap();
        type_text(&mut session, " div{}");

        assert_eq!(session.save().unwrap(), Outcome::Completed);

        assert!(session.dialog().requests().is_empty());
        assert_eq!(session.files().content("/tmp/a.css").as_deref(), Some("body{} div{}"));
        assert_eq!(session.chrome().title(), "/tmp/a.css");
        let notifications = session.chrome_mut().take_notifications();
        assert_eq!(notifications, vec![Notification::info(SAVED_MESSAGE)]);
    }

    #[test]
    fn save_as_rebinds_path() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/a.css", "body{}"));
        session.open("/tmp/a.css").unwrap();
        session
            .dialog_mut()
            .push_response(Some(PathBuf::from("/tmp/b.css")));

        assert_eq!(session.save_as().unwrap(), Outcome::Completed);

        assert_eq!(session.active_path(), Some(Path::new("/tmp/b.css")));
        assert_eq!(session.files().content("/tmp/b.css").as_deref(), Some("body{}"));
        assert_eq!(session.chrome().title(), "/tmp/b.css");
    }

    #[test]
    fn cancelled_save_as_keeps_binding() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/a.css", "body{}"));
        session.open("/tmp/a.css").unwrap();
        type_text(&mut session, "x");

        assert_eq!(session.save_as().unwrap(), Outcome::Cancelled);
        assert_eq!(session.active_path(), Some(Path::new("/tmp/a.css")));
        assert!(session.is_dirty());
    }

    #[test]
    fn failed_titled_save_keeps_binding_and_dirty_flag() {
        let files = MemoryFiles {
            read_only: true,
            ..MemoryFiles::with_file("/tmp/a.css", "body{}")
        };
        let mut session = session_with(files);
        session.open("/tmp/a.css").unwrap();
        type_text(&mut session, " div{}");
        session.chrome_mut().take_notifications();
        let before = session.state();

        let err = session.save().unwrap_err();

        assert!(matches!(err, SessionError::Write { .. }));
        assert_eq!(session.state(), before);
        assert_eq!(session.chrome().title(), "/tmp/a.css *");
        assert_eq!(session.files().content("/tmp/a.css").as_deref(), Some("body{}"));
        let notifications = session.chrome_mut().take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
        assert!(!notifications.contains(&Notification::info(SAVED_MESSAGE)));
    }

    #[test]
    fn failed_save_as_keeps_previous_binding() {
        let files = MemoryFiles {
            read_only: true,
            ..MemoryFiles::with_file("/tmp/a.css", "body{}")
        };
        let mut session = session_with(files);
        session.open("/tmp/a.css").unwrap();
        type_text(&mut session, " div{}");
        session.chrome_mut().take_notifications();
        session
            .dialog_mut()
            .push_response(Some(PathBuf::from("/tmp/b.css")));
        let before = session.state();

        let err = session.save_as().unwrap_err();

        assert!(matches!(err, SessionError::Write { .. }));
        assert_eq!(session.state(), before);
        assert_eq!(session.active_path(), Some(Path::new("/tmp/a.css")));
        assert_eq!(session.chrome().title(), "/tmp/a.css *");
        assert_eq!(session.files().content("/tmp/b.css"), None);
        let notifications = session.chrome_mut().take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Error);
    }

    #[test]
    fn relative_open_path_is_stored_absolute() {
        let mut session = session_with(MemoryFiles::with_file("src/app.js", "x"));

        session.open("src/app.js").unwrap();

        let expected = std::env::current_dir().unwrap().join("src/app.js");
        assert_eq!(session.active_path(), Some(expected.as_path()));
        assert!(session.active_path().unwrap().is_absolute());
        assert_eq!(session.chrome().title(), expected.display().to_string());
    }

    /// 購読を拒否できるウィジェット
    #[derive(Default)]
    struct RefusingWidget {
        inner: BufferWidget,
        refuse_subscribe: bool,
    }

    impl EditorWidget for RefusingWidget {
        fn create_buffer(&mut self, text: &str, language: LanguageId) -> BufferHandle {
            self.inner.create_buffer(text, language)
        }
        fn attach_buffer(&mut self, handle: BufferHandle) -> std::result::Result<(), WidgetError> {
            self.inner.attach_buffer(handle)
        }
        fn dispose_buffer(&mut self, handle: BufferHandle) {
            self.inner.dispose_buffer(handle)
        }
        fn attached_buffer(&self) -> Option<BufferHandle> {
            self.inner.attached_buffer()
        }
        fn text(&self) -> String {
            self.inner.text()
        }
        fn set_text(&mut self, text: &str) {
            self.inner.set_text(text)
        }
        fn subscribe_changes(
            &mut self,
            handle: BufferHandle,
        ) -> std::result::Result<Subscription, WidgetError> {
            if self.refuse_subscribe {
                return Err(WidgetError::UnknownBuffer(handle.0));
            }
            self.inner.subscribe_changes(handle)
        }
        fn unsubscribe(&mut self, subscription: Subscription) {
            self.inner.unsubscribe(subscription)
        }
        fn drain_events(&mut self) -> Vec<WidgetEvent> {
            self.inner.drain_events()
        }
        fn bind_key_command(&mut self, chord: KeyChord, action: Action) {
            self.inner.bind_key_command(chord, action)
        }
        fn dispatch_key(&self, chord: &KeyChord) -> Option<Action> {
            self.inner.dispatch_key(chord)
        }
        fn focus(&mut self) {
            self.inner.focus()
        }
    }

    #[test]
    fn failed_subscription_restores_previous_buffer() {
        let mut session = DocumentSession::new(
            RefusingWidget::default(),
            MemoryFiles::default(),
            QueuedDialog::new(),
            ChromeState::new(),
        )
        .unwrap();
        session.widget_mut().inner.insert_text("let a;");
        session.process_widget_events();
        let buffer = session.buffer();
        let before = session.state();
        session.widget_mut().refuse_subscribe = true;

        let err = session.set_language("css").unwrap_err();

        assert!(matches!(err, SessionError::Widget(_)));
        assert_eq!(session.state(), before);
        assert_eq!(session.buffer(), buffer);
        assert_eq!(session.widget().attached_buffer(), Some(buffer));
        assert_eq!(session.text(), "let a;");
        assert_eq!(session.widget().inner.buffer_count(), 1);
        assert_eq!(session.chrome().language_selector(), Some(LanguageId::JavaScript));
    }

    #[test]
    fn set_language_preserves_text_dirty_and_path() {
        let mut session = session_with(MemoryFiles::default());
        type_text(&mut session, "let a: number = 1;");
        let first = session.buffer();

        assert_eq!(session.set_language("ts").unwrap(), LanguageId::TypeScript);
        assert_ne!(session.buffer(), first);
        assert_eq!(session.text(), "let a: number = 1;");
        assert!(session.is_dirty());
        assert_eq!(session.active_path(), None);
        assert_eq!(session.chrome().language_selector(), Some(LanguageId::TypeScript));

        assert_eq!(session.set_language("js").unwrap(), LanguageId::JavaScript);
        assert_eq!(session.text(), "let a: number = 1;");
        assert_eq!(session.widget().buffer_count(), 1);
        assert_eq!(session.widget().subscription_count(), 1);
    }

    #[test]
    fn set_language_on_clean_document_stays_clean() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/a.js", "x"));
        session.open("/tmp/a.js").unwrap();

        session.set_language("typescript").unwrap();

        assert!(!session.is_dirty());
        assert_eq!(session.chrome().title(), "/tmp/a.js");
    }

    #[test]
    fn unknown_language_is_reported_and_ignored() {
        let mut session = session_with(MemoryFiles::default());
        type_text(&mut session, "print(1)");
        let buffer = session.buffer();

        let err = session.set_language("python").unwrap_err();

        assert_eq!(err, SessionError::UnknownLanguage("python".to_string()));
        assert_eq!(session.buffer(), buffer);
        assert_eq!(session.active_language(), LanguageId::JavaScript);
        assert_eq!(session.chrome_mut().take_notifications().len(), 1);
    }

    #[test]
    fn changes_from_replaced_buffer_are_ignored() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/a.js", "x"));
        session.open("/tmp/a.js").unwrap();
        let stale = BufferHandle(1);

        session.on_content_changed(stale);

        assert!(!session.is_dirty());
        assert_eq!(session.chrome().title(), "/tmp/a.js");
    }

    #[test]
    fn new_document_keeps_last_language() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/index.html", "<p></p>"));
        session.open("/tmp/index.html").unwrap();
        type_text(&mut session, "<div>");

        session.new_document().unwrap();

        assert_eq!(session.active_path(), None);
        assert!(!session.is_dirty());
        assert_eq!(session.text(), "");
        assert_eq!(session.active_language(), LanguageId::Html);
        assert_eq!(session.chrome().title(), "Untitled");
    }

    #[test]
    fn unknown_extension_opens_as_plaintext() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/main.py", "print(1)"));

        session.open("/tmp/main.py").unwrap();

        assert_eq!(session.active_language(), LanguageId::PlainText);
        assert_eq!(session.chrome().language_selector(), Some(LanguageId::PlainText));
    }

    #[test]
    fn save_chord_triggers_save() {
        let mut session = session_with(MemoryFiles::with_file("/tmp/a.ts", "let a;"));
        session.open("/tmp/a.ts").unwrap();
        type_text(&mut session, " let b;");

        let result = session.handle_key(&KeyChord::save());

        assert_eq!(result, Some(Ok(Outcome::Completed)));
        assert!(!session.is_dirty());
        assert_eq!(session.files().content("/tmp/a.ts").as_deref(), Some("let a; let b;"));
        assert!(session.handle_key(&KeyChord::command('q')).is_none());
    }

    #[test]
    fn pending_edits_are_flushed_before_operations() {
        let mut session = session_with(MemoryFiles::default());
        session.widget_mut().insert_text("unsaved");
        session
            .dialog_mut()
            .push_response(Some(PathBuf::from("/tmp/u.js")));

        session.save().unwrap();

        assert_eq!(session.files().content("/tmp/u.js").as_deref(), Some("unsaved"));
        assert!(!session.is_dirty());
        assert_eq!(session.chrome().title(), "/tmp/u.js");
    }
}
