use crate::keymap::{KeyConversionError, KeySequencePayload};
use crate::logging::DebugLogger;
use crate::options::BackendOptions;
use crate::snapshot::EditorSnapshot;
use serde::Serialize;
use serde_json::json;
use sourcepad::input::Action;
use sourcepad::{DesktopSession, Outcome, SessionError};
use std::path::PathBuf;
use thiserror::Error;

/// バックエンドのエラー
///
/// 読み書きの失敗は通知としてスナップショットに載るため、ここには含まれない。
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("セッションの初期化に失敗しました: {0}")]
    Init(#[from] SessionError),

    #[error("キー入力の変換に失敗しました: {0}")]
    Key(#[from] KeyConversionError),

    #[error("デバッグログ出力に失敗しました: {0}")]
    DebugLog(#[from] std::io::Error),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// GUI から Rust バックエンドを操作するコントローラー
pub struct BackendController {
    session: DesktopSession,
    logger: Option<DebugLogger>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub cancelled: bool,
    pub message: Option<String>,
    pub snapshot: EditorSnapshot,
}

impl BackendController {
    pub fn new(options: BackendOptions) -> BackendResult<Self> {
        let session = DesktopSession::desktop(options.language())?;
        let logger = match options.resolve_log_path() {
            Some(path) => Some(DebugLogger::new(path)?),
            None => None,
        };
        let mut controller = Self { session, logger };

        if let Some(path) = options.initial_file.as_ref() {
            // 失敗は通知として最初のスナップショットに載る
            let result = controller.session.open(path);
            controller.log_result("initial_file", &result)?;
        }
        Ok(controller)
    }

    pub fn session(&self) -> &DesktopSession {
        &self.session
    }

    pub fn snapshot(&mut self) -> BackendResult<EditorSnapshot> {
        self.session.process_widget_events();
        let snapshot = EditorSnapshot::capture(&mut self.session);
        self.log_event("snapshot", &snapshot.status)?;
        Ok(snapshot)
    }

    pub fn new_file(&mut self) -> BackendResult<EditorSnapshot> {
        let result = self.session.new_document();
        self.log_result("new_file", &result)?;
        self.snapshot()
    }

    /// フロントエンドのダイアログで選ばれたファイルを開く（`None` はキャンセル）
    pub fn open_file(&mut self, picked: Option<String>) -> BackendResult<EditorSnapshot> {
        let result = self.with_dialog_responses(vec![picked], |session| session.open_with_dialog());
        self.log_result("open_file", &result)?;
        self.snapshot()
    }

    /// 保存（無題のときだけ `picked` を保存先として使う）
    pub fn save_file(&mut self, picked: Option<String>) -> BackendResult<SaveResponse> {
        let result = self.with_dialog_responses(vec![picked], |session| session.save());
        self.save_response("save_file", result)
    }

    pub fn save_file_as(&mut self, picked: Option<String>) -> BackendResult<SaveResponse> {
        let result = self.with_dialog_responses(vec![picked], |session| session.save_as());
        self.save_response("save_file_as", result)
    }

    pub fn set_language(&mut self, token: &str) -> BackendResult<EditorSnapshot> {
        let result = self.session.set_language(token);
        self.log_event("set_language", &json!({ "token": token, "ok": result.is_ok() }))?;
        self.snapshot()
    }

    /// ウィジェットで編集された内容を反映する
    pub fn update_text(&mut self, text: &str) -> BackendResult<EditorSnapshot> {
        use sourcepad::widget::EditorWidget;

        self.session.widget_mut().set_text(text);
        self.session.process_widget_events();
        self.log_event("update_text", &json!({ "bytes": text.len() }))?;
        self.snapshot()
    }

    /// 名前付きアクションを実行する
    pub fn execute(
        &mut self,
        action: Action,
        dialog_response: Option<String>,
    ) -> BackendResult<EditorSnapshot> {
        let tag = action.name();
        let result = self.with_dialog_responses(vec![dialog_response], |session| {
            session.execute(action)
        });
        self.log_result(tag, &result)?;
        self.snapshot()
    }

    pub fn handle_serialized_keys(
        &mut self,
        payload: KeySequencePayload,
    ) -> BackendResult<EditorSnapshot> {
        let chords = payload.to_chords()?;
        let responses = payload.dialog_responses.clone();
        let description: Vec<String> = chords.iter().map(|chord| chord.to_string()).collect();

        self.with_dialog_responses(responses, |session| {
            for chord in &chords {
                if let Some(Err(err)) = session.handle_key(chord) {
                    log::debug!("{chord} failed: {err}");
                }
            }
        });
        self.log_event("key_sequence", &description)?;
        self.snapshot()
    }

    pub fn shutdown(&mut self) {
        if self.session.is_dirty() {
            log::warn!("shutting down with unsaved changes ({})", self.session.title());
        }
        if let Err(err) = self.log_event("shutdown", &json!({ "dirty": self.session.is_dirty() })) {
            log::warn!("{err}");
        }
    }

    fn with_dialog_responses<T>(
        &mut self,
        responses: Vec<Option<String>>,
        f: impl FnOnce(&mut DesktopSession) -> T,
    ) -> T {
        for response in responses {
            self.session
                .dialog_mut()
                .push_response(response.map(PathBuf::from));
        }
        let result = f(&mut self.session);
        self.session.dialog_mut().clear_responses();
        result
    }

    fn save_response(
        &mut self,
        tag: &str,
        result: Result<Outcome, SessionError>,
    ) -> BackendResult<SaveResponse> {
        self.log_result(tag, &result)?;
        let (success, cancelled, message) = match &result {
            Ok(Outcome::Completed) => (true, false, None),
            Ok(Outcome::Cancelled) => (false, true, None),
            Err(err) => (false, false, Some(err.to_string())),
        };
        Ok(SaveResponse {
            success,
            cancelled,
            message,
            snapshot: self.snapshot()?,
        })
    }

    fn log_result(&self, tag: &str, result: &Result<Outcome, SessionError>) -> BackendResult<()> {
        let payload = match result {
            Ok(outcome) => json!({ "outcome": format!("{outcome:?}") }),
            Err(err) => json!({ "error": err.to_string() }),
        };
        self.log_event(tag, &payload)
    }

    fn log_event<T: Serialize>(&self, tag: &str, payload: &T) -> BackendResult<()> {
        if let Some(logger) = &self.logger {
            logger.log_event(tag, payload)?;
        }
        Ok(())
    }
}
