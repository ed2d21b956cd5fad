//! ロギング
//!
//! コア側は `log` マクロだけを使い、出力先はこのモジュールで `env_logger` に繋ぐ。
//! フィルタは `SOURCEPAD_LOG`（`RUST_LOG` と同じ書式）で指定する。

use log::LevelFilter;
use std::sync::Once;

/// フィルタを読む環境変数
pub const LOG_ENV: &str = "SOURCEPAD_LOG";

static INIT: Once = Once::new();

/// ロガーを初期化する（二度目以降は何もしない）
pub fn init() {
    init_with_level(LevelFilter::Warn);
}

/// 既定レベルを指定して初期化する
pub fn init_with_level(default_level: LevelFilter) {
    INIT.call_once(|| {
        let result = env_logger::Builder::new()
            .filter_level(default_level)
            .parse_env(LOG_ENV)
            .format_timestamp_millis()
            .try_init();
        if let Err(err) = result {
            eprintln!("logger already installed: {err}");
        }
    });
}

/// テスト用: 出力をテストハーネスに取り込ませる
pub fn init_for_tests() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_env(LOG_ENV)
        .is_test(true)
        .try_init();
}
