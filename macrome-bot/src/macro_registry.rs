//! マクロレジストリ
//!
//! ギルドごとの マクロ名 -> テキスト の対応をメモリ上で管理する。
//! 永続化はしないため、再起動するとすべてのマクロが失われる。

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::registrar::{CommandRegistrar, RegistrarError};

/// ギルドコマンドの説明に使う最大文字数
pub const DESCRIPTION_WIDTH: usize = 20;
/// 省略時に末尾へ付ける記号
const PLACEHOLDER: &str = "...";

/// 登録済みマクロ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroEntry {
    /// 呼び出し時に返すテキスト
    pub text: String,
    /// Discord側のコマンドID
    pub command_id: u64,
}

/// 1ギルド分のマクロ（名前順）
type MacroSet = BTreeMap<String, MacroEntry>;

/// マクロレジストリ
///
/// ギルドごとに個別のロックを持ち、追加・削除はリモート呼び出しを含めて
/// ギルド単位で直列化される
pub struct MacroRegistry {
    registrar: Arc<dyn CommandRegistrar>,
    guilds: RwLock<HashMap<u64, Arc<Mutex<MacroSet>>>>,
}

impl MacroRegistry {
    pub fn new(registrar: Arc<dyn CommandRegistrar>) -> Self {
        Self {
            registrar,
            guilds: RwLock::new(HashMap::new()),
        }
    }

    /// ギルドのマクロセットを取得（なければ作成）
    async fn guild_set(&self, guild_id: u64) -> Arc<Mutex<MacroSet>> {
        if let Some(set) = self.existing_guild_set(guild_id).await {
            return set;
        }
        let mut guilds = self.guilds.write().await;
        guilds.entry(guild_id).or_default().clone()
    }

    async fn existing_guild_set(&self, guild_id: u64) -> Option<Arc<Mutex<MacroSet>>> {
        self.guilds.read().await.get(&guild_id).cloned()
    }

    /// マクロを追加
    ///
    /// ギルドコマンドを登録してからローカルに保存する。
    /// 同名のマクロがあれば上書きする（既存コマンドの削除は行わない）。
    pub async fn add_macro(
        &self,
        guild_id: u64,
        name: &str,
        text: &str,
    ) -> Result<MacroEntry, RegistrarError> {
        let set = self.guild_set(guild_id).await;
        let mut macros = set.lock().await;

        let description = shorten(text, DESCRIPTION_WIDTH);
        let command_id = self
            .registrar
            .create_guild_command(guild_id, name, &description)
            .await?;

        let entry = MacroEntry {
            text: text.to_string(),
            command_id,
        };
        if macros.insert(name.to_string(), entry.clone()).is_some() {
            debug!("Overwrote macro {} in guild {}", name, guild_id);
        }
        info!("Added macro {} in guild {} (command {})", name, guild_id, command_id);

        Ok(entry)
    }

    /// マクロを削除
    ///
    /// # Returns
    /// * `Ok(true)` - 削除した
    /// * `Ok(false)` - 該当マクロなし（リモート呼び出しもしない）
    pub async fn delete_macro(&self, guild_id: u64, name: &str) -> Result<bool, RegistrarError> {
        let Some(set) = self.existing_guild_set(guild_id).await else {
            return Ok(false);
        };
        let mut macros = set.lock().await;

        let Some(command_id) = macros.get(name).map(|entry| entry.command_id) else {
            return Ok(false);
        };

        self.registrar
            .delete_guild_command(guild_id, command_id)
            .await?;
        macros.remove(name);
        info!("Deleted macro {} in guild {}", name, guild_id);

        Ok(true)
    }

    /// ギルドのマクロ名一覧
    pub async fn list_macro_names(&self, guild_id: u64) -> Vec<String> {
        match self.existing_guild_set(guild_id).await {
            Some(set) => set.lock().await.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// マクロのテキストを取得
    pub async fn get_macro_text(&self, guild_id: u64, name: &str) -> Option<String> {
        let set = self.existing_guild_set(guild_id).await?;
        let macros = set.lock().await;
        macros.get(name).map(|entry| entry.text.clone())
    }
}

/// テキストを単語単位で `width` 文字未満に収まるよう省略する
///
/// 空白は1文字に畳み込む。収まらない場合は先頭から入るだけの単語に
/// ` ...` を付ける。
pub fn shorten(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");

    if collapsed.is_empty() {
        // Discordは空の説明を受け付けない
        return PLACEHOLDER.to_string();
    }
    if collapsed.chars().count() < width {
        return collapsed;
    }

    let suffix_len = PLACEHOLDER.len() + 1;
    let mut kept = String::new();
    let mut kept_len = 0;
    for word in words {
        let separator = usize::from(!kept.is_empty());
        let word_len = word.chars().count();
        if kept_len + separator + word_len + suffix_len > width {
            break;
        }
        if separator == 1 {
            kept.push(' ');
        }
        kept.push_str(word);
        kept_len += separator + word_len;
    }

    if kept.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        format!("{} {}", kept, PLACEHOLDER)
    }
}
