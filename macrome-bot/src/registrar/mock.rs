//! モック登録実装（テスト用）

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use super::{CommandRegistrar, RegistrarError};

/// 記録された呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrarCall {
    Create {
        guild_id: u64,
        name: String,
        description: String,
    },
    Delete {
        guild_id: u64,
        command_id: u64,
    },
}

/// テスト用モック登録実装
///
/// 呼び出しを記録し、1から順にコマンドIDを払い出す
pub struct MockRegistrar {
    calls: Mutex<Vec<RegistrarCall>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            failing: AtomicBool::new(false),
        }
    }

    /// 以降の呼び出しを失敗させるかどうか
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// 記録された呼び出しのコピー
    pub fn calls(&self) -> Vec<RegistrarCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check_failing(&self) -> Result<(), RegistrarError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RegistrarError::Discord(serenity::Error::Other("mock failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CommandRegistrar for MockRegistrar {
    async fn create_guild_command(
        &self,
        guild_id: u64,
        name: &str,
        description: &str,
    ) -> Result<u64, RegistrarError> {
        self.calls.lock().unwrap().push(RegistrarCall::Create {
            guild_id,
            name: name.to_string(),
            description: description.to_string(),
        });
        self.check_failing()?;
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn delete_guild_command(
        &self,
        guild_id: u64,
        command_id: u64,
    ) -> Result<(), RegistrarError> {
        self.calls.lock().unwrap().push(RegistrarCall::Delete {
            guild_id,
            command_id,
        });
        self.check_failing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_hands_out_increasing_ids() {
        let registrar = MockRegistrar::new();
        let first = registrar.create_guild_command(1, "a", "A").await.unwrap();
        let second = registrar.create_guild_command(1, "b", "B").await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(registrar.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_failing_mode() {
        let registrar = MockRegistrar::new();
        registrar.set_failing(true);

        let result = registrar.delete_guild_command(1, 7).await;
        assert!(matches!(result, Err(RegistrarError::Discord(_))));
        // 失敗しても呼び出しは記録される
        assert_eq!(
            registrar.calls(),
            vec![RegistrarCall::Delete {
                guild_id: 1,
                command_id: 7
            }]
        );
    }
}
