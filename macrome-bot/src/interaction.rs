//! Slash Commandのインタラクションを、serenityに依存しないイベント型へ変換する

use serenity::model::application::{CommandDataOption, CommandDataOptionValue, CommandInteraction};

use crate::dispatcher::DispatchError;

/// 文字列オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArg {
    pub name: String,
    pub value: String,
}

impl CommandArg {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// サブコマンドとそのオプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandEvent {
    pub name: String,
    pub args: Vec<CommandArg>,
}

impl SubcommandEvent {
    pub fn new(name: impl Into<String>, args: Vec<CommandArg>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// オプション値を取得
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| arg.value.as_str())
    }

    /// 必須オプション値を取得
    pub fn required(&self, name: &'static str) -> Result<String, DispatchError> {
        self.arg(name)
            .map(str::to_string)
            .ok_or(DispatchError::MissingOption(name))
    }
}

/// 受信したコマンドイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub interaction_id: u64,
    pub guild_id: u64,
    pub command_name: String,
    pub subcommand: Option<SubcommandEvent>,
}

impl CommandEvent {
    /// serenityのインタラクションから変換
    ///
    /// ギルド外（DM）のインタラクションは扱わない
    pub fn from_interaction(interaction: &CommandInteraction) -> Result<Self, DispatchError> {
        let guild_id = interaction
            .guild_id
            .ok_or(DispatchError::MissingGuild)?
            .get();

        let subcommand = interaction.data.options.first().and_then(|opt| {
            if let CommandDataOptionValue::SubCommand(sub_opts) = &opt.value {
                Some(SubcommandEvent::new(opt.name.clone(), string_args(sub_opts)))
            } else {
                None
            }
        });

        Ok(Self {
            interaction_id: interaction.id.get(),
            guild_id,
            command_name: interaction.data.name.clone(),
            subcommand,
        })
    }
}

/// 文字列オプションだけを取り出す
fn string_args(options: &[CommandDataOption]) -> Vec<CommandArg> {
    options
        .iter()
        .filter_map(|opt| {
            if let CommandDataOptionValue::String(s) = &opt.value {
                Some(CommandArg::new(opt.name.clone(), s.clone()))
            } else {
                None
            }
        })
        .collect()
}
