//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - `slint::spawn_local`: UI非同期処理（フォルダ選択ダイアログなど、メインスレッドで実行する必要がある処理）
//! - `rayon::spawn`: ブロッキングI/O（画像の保存など、別スレッドで実行可能な処理）
//! - `slint::invoke_from_event_loop`: バックエンドからのイベントをUIスレッドのルーターへ届ける

pub mod handlers;
pub mod presenter;
mod state_helpers;

pub use handlers::{connect_inbox, setup_handlers};
pub use presenter::SlintPresenter;
pub use state_helpers::*;
