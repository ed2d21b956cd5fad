use sourcepad::LanguageId;
use std::env;
use std::path::{Path, PathBuf};

/// デバッグログの出力先を指定する環境変数
pub const DEBUG_LOG_ENV: &str = "SOURCEPAD_DEBUG_LOG";
/// 起動時に開くファイル
pub const INITIAL_FILE_ENV: &str = "SOURCEPAD_INITIAL_FILE";
/// 初回起動時の言語
pub const DEFAULT_LANGUAGE_ENV: &str = "SOURCEPAD_DEFAULT_LANGUAGE";

/// GUI バックエンド制御のオプション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendOptions {
    /// デバッグログ出力先（未指定時は `~/.sourcepad-log/debug.log`）
    pub debug_log_path: Option<PathBuf>,
    /// 起動時に開くファイルパス
    pub initial_file: Option<PathBuf>,
    /// 無題ドキュメントの言語（未指定時は JavaScript）
    pub default_language: Option<LanguageId>,
}

impl BackendOptions {
    /// 環境変数から読み込む
    ///
    /// パスは `~` と `$VAR` を展開する。解釈できない言語名は無視する。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_language = lookup(DEFAULT_LANGUAGE_ENV).and_then(|raw| {
            raw.parse::<LanguageId>()
                .map_err(|err| log::warn!("{DEFAULT_LANGUAGE_ENV}: {err}"))
                .ok()
        });

        BackendOptions {
            debug_log_path: lookup(DEBUG_LOG_ENV).map(|raw| expand_path(&raw)),
            initial_file: lookup(INITIAL_FILE_ENV).map(|raw| expand_path(&raw)),
            default_language,
        }
    }

    pub fn resolve_log_path(&self) -> Option<PathBuf> {
        match &self.debug_log_path {
            Some(path) => Some(path.clone()),
            None => default_log_path(),
        }
    }

    pub fn language(&self) -> LanguageId {
        self.default_language.unwrap_or_default()
    }

    pub fn merged_with(&self, overrides: &BackendOptions) -> BackendOptions {
        BackendOptions {
            debug_log_path: overrides
                .debug_log_path
                .clone()
                .or_else(|| self.debug_log_path.clone()),
            initial_file: overrides
                .initial_file
                .clone()
                .or_else(|| self.initial_file.clone()),
            default_language: overrides.default_language.or(self.default_language),
        }
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sourcepad-log").join("debug.log"))
}

fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(err) => {
            log::warn!("could not expand {raw:?}: {err}");
            PathBuf::from(raw)
        }
    }
}

/// ヘルパー：親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
