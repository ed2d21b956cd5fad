use sourcepad_tauri::{BackendController, BackendOptions};

/// ウィンドウなしでバックエンドを起動し、初期スナップショットを JSON で出力する
fn main() {
    sourcepad::logging::init();

    let mut controller = match BackendController::new(BackendOptions::from_env()) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("バックエンドの起動に失敗しました: {err}");
            std::process::exit(1);
        }
    };

    match controller.snapshot() {
        Ok(snapshot) => match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("スナップショットの出力に失敗しました: {err}"),
        },
        Err(err) => eprintln!("スナップショット取得に失敗しました: {err}"),
    }
    controller.shutdown();
}
