//! 環境変数からの設定読み込み

use std::env;
use thiserror::Error;

/// Discordトークンの環境変数名
pub const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
/// デバッグログの環境変数名
pub const DEBUG_VAR: &str = "MCM_DEBUG";

/// 設定エラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingVar(&'static str),
}

/// ボット設定
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// デバッグログを有効にするか
    pub debug: bool,
}

impl Config {
    /// 環境変数から読み込み
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から読み込み
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingVar(TOKEN_VAR))?;

        // 値が空でなければ有効
        let debug = lookup(DEBUG_VAR).is_some_and(|value| !value.is_empty());

        Ok(Self {
            discord_token,
            debug,
        })
    }

    /// デフォルトのログレベル
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
