//! ギルドコマンド登録レイヤー
//!
//! マクロをDiscord側のSlash Commandとして登録・削除するためのtraitと型定義

mod discord;
#[cfg(test)]
mod mock;

use async_trait::async_trait;
use thiserror::Error;

// パブリックエクスポート
pub use discord::DiscordRegistrar;
#[cfg(test)]
pub use mock::{MockRegistrar, RegistrarCall};

/// 登録エラー
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("Discord API error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("Discord HTTP client is not attached")]
    NotConnected,
}

/// ギルドコマンド登録trait
///
/// マクロの追加・削除時にレジストリから呼び出される
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// ギルドコマンドを登録
    ///
    /// # Arguments
    /// * `guild_id` - 対象ギルド
    /// * `name` - コマンド名（マクロ名）
    /// * `description` - コマンドの説明
    ///
    /// # Returns
    /// * `Ok(u64)` - 登録されたコマンドID
    /// * `Err(RegistrarError)` - エラー
    async fn create_guild_command(
        &self,
        guild_id: u64,
        name: &str,
        description: &str,
    ) -> Result<u64, RegistrarError>;

    /// ギルドコマンドを削除
    async fn delete_guild_command(&self, guild_id: u64, command_id: u64)
        -> Result<(), RegistrarError>;
}
