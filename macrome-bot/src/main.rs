mod commands;
mod config;
mod dispatcher;
mod interaction;
mod macro_registry;
mod registrar;

use commands::GlobalRegistration;
use config::Config;
use dispatcher::Dispatcher;
use interaction::CommandEvent;
use macro_registry::MacroRegistry;
use registrar::DiscordRegistrar;
use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::{CommandInteraction, Interaction};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct Handler {
    dispatcher: Dispatcher,
    /// グローバルコマンドの登録状態（再接続時の再登録防止）
    global_registration: GlobalRegistration,
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);

        debug!("Application ID: {}", ready.application.id);

        if !self.global_registration.try_begin() {
            debug!("Slash commands already registered, skipping");
            return;
        }

        match commands::register_global_commands(&ctx).await {
            Ok(count) => info!("Registered {} global slash command(s)", count),
            Err(e) => {
                error!("Failed to register global slash commands: {}", e);
                // 次のreadyで再試行
                self.global_registration.failed();
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            self.handle_slash_command(&ctx, &command).await;
        }
    }
}

impl Handler {
    fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            global_registration: GlobalRegistration::new(),
        }
    }

    /// Slash Commandを処理
    async fn handle_slash_command(&self, ctx: &Context, command: &CommandInteraction) {
        let event = match CommandEvent::from_interaction(command) {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring /{}: {}", command.data.name, e);
                return;
            }
        };
        debug!(
            "Interaction {} in guild {}: /{} {:?}",
            event.interaction_id, event.guild_id, event.command_name, event.subcommand
        );

        let response = match self.dispatcher.dispatch(&event).await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to handle /{}: {}", event.command_name, e);
                return;
            }
        };

        // インタラクションに応答
        if let Err(e) = command
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new().content(response),
                ),
            )
            .await
        {
            error!("Failed to respond to slash command: {}", e);
        }
    }
}

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // トレーシング初期化前なので標準エラーに出す
            eprintln!("{}", e);
            return;
        }
    };

    // トレーシング初期化
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();
    info!("Discord token loaded");

    // HTTPはクライアント作成後に共有する
    let registrar = Arc::new(DiscordRegistrar::new());
    let registry = Arc::new(MacroRegistry::new(registrar.clone()));
    let handler = Handler::new(Dispatcher::new(registry));

    // Slash Commandsのみ使用
    let intents = GatewayIntents::GUILDS;

    info!("Creating client...");

    // クライアントを作成
    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
    {
        Ok(client) => {
            info!("Client created");
            client
        }
        Err(why) => {
            error!("Error creating client: {:?}", why);
            return;
        }
    };

    // ギルドコマンドの登録もクライアントと同じHTTP（レートリミッター）を使う
    registrar.attach(client.http.clone());

    info!("Starting bot...");

    // 起動
    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }
}
