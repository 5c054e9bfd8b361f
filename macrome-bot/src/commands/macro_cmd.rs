//! /macro - マクロ管理Slash Command

use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::CommandOptionType;
use tracing::debug;

use super::MANAGEMENT_COMMAND;
use crate::dispatcher::DispatchError;
use crate::interaction::SubcommandEvent;
use crate::macro_registry::MacroRegistry;

/// /macro コマンドの定義
pub fn register() -> CreateCommand {
    CreateCommand::new(MANAGEMENT_COMMAND)
        .description("Macro management")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add macro")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "name", "Macro name")
                        .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "text", "Macro text")
                        .required(true),
                ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "delete", "Delete macro")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "name", "Macro name")
                        .required(true),
                ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "list",
            "List macros",
        ))
}

/// /macro のサブコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroSubcommand {
    Add { name: String, text: String },
    Delete { name: String },
    List,
}

impl MacroSubcommand {
    /// サブコマンドと必須オプションを取り出す
    pub fn parse(subcommand: Option<&SubcommandEvent>) -> Result<Self, DispatchError> {
        let sub = subcommand.ok_or(DispatchError::MissingSubcommand)?;

        match sub.name.as_str() {
            "add" => Ok(Self::Add {
                name: sub.required("name")?,
                text: sub.required("text")?,
            }),
            "delete" => Ok(Self::Delete {
                name: sub.required("name")?,
            }),
            "list" => Ok(Self::List),
            other => Err(DispatchError::UnknownSubcommand(other.to_string())),
        }
    }
}

/// /macro コマンドの実行
pub async fn run(
    subcommand: MacroSubcommand,
    guild_id: u64,
    registry: &MacroRegistry,
) -> Result<String, DispatchError> {
    match subcommand {
        MacroSubcommand::Add { name, text } => {
            registry.add_macro(guild_id, &name, &text).await?;
            Ok("Macro added.".to_string())
        }
        MacroSubcommand::Delete { name } => {
            if !registry.delete_macro(guild_id, &name).await? {
                debug!("No macro {} to delete in guild {}", name, guild_id);
            }
            Ok("Macro deleted.".to_string())
        }
        MacroSubcommand::List => Ok(registry.list_macro_names(guild_id).await.join(", ")),
    }
}
