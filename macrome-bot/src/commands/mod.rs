//! Slash Commands module
//!
//! グローバルに登録する管理コマンドを提供します。
//! マクロ自体はギルドコマンドとして個別に登録されます。

pub mod macro_cmd;

use serenity::builder::CreateCommand;
use serenity::model::application::Command;
use std::sync::atomic::{AtomicBool, Ordering};

/// 管理コマンド名（マクロ名としては使えない）
pub const MANAGEMENT_COMMAND: &str = "macro";

/// 全てのグローバルコマンドの定義
pub fn register_commands() -> Vec<CreateCommand> {
    vec![macro_cmd::register()]
}

/// グローバルコマンドとして登録
///
/// 既存のグローバルコマンドは一括で上書きされる
pub async fn register_global_commands(ctx: &serenity::prelude::Context) -> serenity::Result<usize> {
    let commands = register_commands();
    let registered = Command::set_global_commands(&ctx.http, commands).await?;
    Ok(registered.len())
}

/// グローバルコマンド登録の状態
///
/// 再接続のたびに `ready` が届くため、登録は成功するまで一度だけ行う
#[derive(Debug, Default)]
pub struct GlobalRegistration {
    started: AtomicBool,
}

impl GlobalRegistration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録を始めてよいか（既に登録済み・登録中なら false）
    pub fn try_begin(&self) -> bool {
        !self.started.swap(true, Ordering::SeqCst)
    }

    /// 登録失敗。次の `try_begin` で再試行させる
    pub fn failed(&self) {
        self.started.store(false, Ordering::SeqCst);
    }
}
