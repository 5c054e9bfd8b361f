//! コマンドディスパッチャー
//!
//! 受信したコマンドイベントを分類し、レジストリを操作して応答テキストを返す。

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::commands::{self, macro_cmd::MacroSubcommand};
use crate::interaction::CommandEvent;
use crate::macro_registry::MacroRegistry;
use crate::registrar::RegistrarError;

/// ディスパッチエラー
///
/// いずれもそのイベントの処理を打ち切り、ユーザーには応答しない
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Interaction is not tied to a guild")]
    MissingGuild,

    #[error("Missing subcommand")]
    MissingSubcommand,

    #[error("Unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("Missing required option: {0}")]
    MissingOption(&'static str),

    #[error("Registrar error: {0}")]
    Registrar(#[from] RegistrarError),
}

/// コマンドディスパッチャー
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<MacroRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<MacroRegistry>) -> Self {
        Self { registry }
    }

    /// イベントを処理して応答テキストを返す
    pub async fn dispatch(&self, event: &CommandEvent) -> Result<String, DispatchError> {
        if event.command_name == commands::MANAGEMENT_COMMAND {
            let subcommand = MacroSubcommand::parse(event.subcommand.as_ref())?;
            return commands::macro_cmd::run(subcommand, event.guild_id, &self.registry).await;
        }

        match self
            .registry
            .get_macro_text(event.guild_id, &event.command_name)
            .await
        {
            Some(text) => Ok(text),
            None => {
                debug!(
                    "Unknown macro {} in guild {}",
                    event.command_name, event.guild_id
                );
                Ok(unknown_macro_response(&event.command_name))
            }
        }
    }
}

fn unknown_macro_response(name: &str) -> String {
    format!("Unknown macro: {}", name)
}
