//! serenity経由のギルドコマンド登録

use async_trait::async_trait;
use serenity::builder::CreateCommand;
use serenity::http::Http;
use serenity::model::id::{CommandId, GuildId};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use super::{CommandRegistrar, RegistrarError};

/// Discord HTTP APIを使う登録実装
///
/// ハンドラーはクライアントより先に作られるため、
/// クライアント作成後に `attach` でクライアントのHTTPを共有する
#[derive(Default)]
pub struct DiscordRegistrar {
    http: OnceLock<Arc<Http>>,
}

impl DiscordRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// クライアントのHTTPを設定（2回目以降は無視）
    pub fn attach(&self, http: Arc<Http>) {
        if self.http.set(http).is_err() {
            debug!("Discord HTTP client already attached");
        }
    }

    fn http(&self) -> Result<&Http, RegistrarError> {
        self.http
            .get()
            .map(|http| &**http)
            .ok_or(RegistrarError::NotConnected)
    }
}

#[async_trait]
impl CommandRegistrar for DiscordRegistrar {
    async fn create_guild_command(
        &self,
        guild_id: u64,
        name: &str,
        description: &str,
    ) -> Result<u64, RegistrarError> {
        let http = self.http()?;
        let builder = CreateCommand::new(name).description(description);
        let command = GuildId::new(guild_id).create_command(http, builder).await?;

        debug!(
            "Registered guild command /{} ({}) in guild {}",
            name, command.id, guild_id
        );
        Ok(command.id.get())
    }

    async fn delete_guild_command(
        &self,
        guild_id: u64,
        command_id: u64,
    ) -> Result<(), RegistrarError> {
        let http = self.http()?;
        GuildId::new(guild_id)
            .delete_command(http, CommandId::new(command_id))
            .await?;

        debug!("Deleted guild command {} in guild {}", command_id, guild_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unattached_registrar_fails_without_request() {
        let registrar = DiscordRegistrar::new();

        let result = registrar.create_guild_command(1, "hi", "hello").await;
        assert!(matches!(result, Err(RegistrarError::NotConnected)));

        let result = registrar.delete_guild_command(1, 42).await;
        assert!(matches!(result, Err(RegistrarError::NotConnected)));
    }

    #[test]
    fn test_attach_keeps_first_client() {
        let registrar = DiscordRegistrar::new();
        let first = Arc::new(Http::new("first-token"));
        registrar.attach(first.clone());
        registrar.attach(Arc::new(Http::new("second-token")));

        let attached = registrar.http.get().unwrap();
        assert!(Arc::ptr_eq(attached, &first));
    }
}
