#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use herald::{
    config::Settings,
    domain::{BucketSpec, PlatformCommand},
    error::{AppError, Result},
    integrations::{BotIdentity, BotPlatform, StorageAdmin, TextGenerator},
    service::{Integrations, ServiceContext},
};

/// Single-connection in-memory database with the schema applied.
pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.backend.url = "https://abcd1234.supabase.co".to_string();
    settings.backend.service_key = "service-key".to_string();
    settings.bot.token = Some("test-token".to_string());
    settings.bot.admin_ids = vec![42];
    settings
}

pub enum Reply {
    Text(String),
    Fail(String),
}

/// Text generator answering from a script; repeats the last reply once the
/// script runs out.
pub struct FakeGenerator {
    replies: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Self::scripted(vec![Reply::Text(text.to_string())])
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::scripted(vec![Reply::Fail(message.to_string())])
    }

    pub fn scripted(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake-generator"
    }

    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Reply::Text(text)) => {
                *self.last.lock().unwrap() = Some(text.clone());
                Ok(text)
            }
            Some(Reply::Fail(message)) => Err(AppError::Upstream(message)),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| AppError::Upstream("no scripted reply".to_string())),
        }
    }
}

#[derive(Default)]
pub struct FakeBotPlatform {
    pub fail_get_me: bool,
    pub fail_set_commands: bool,
    pub registered: Mutex<Vec<Vec<PlatformCommand>>>,
    pub webhooks: Mutex<Vec<(String, Vec<String>)>>,
    pub sent: Mutex<Vec<(i64, String)>>,
}

impl FakeBotPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl BotPlatform for FakeBotPlatform {
    fn name(&self) -> &str {
        "fake-bot"
    }

    async fn get_me(&self, _token: &str) -> Result<BotIdentity> {
        if self.fail_get_me {
            return Err(AppError::Upstream("Telegram getMe failed: Unauthorized".to_string()));
        }
        Ok(BotIdentity {
            id: 7,
            username: "herald_bot".to_string(),
        })
    }

    async fn set_webhook(&self, _token: &str, url: &str, allowed_updates: &[&str]) -> Result<Value> {
        self.webhooks.lock().unwrap().push((
            url.to_string(),
            allowed_updates.iter().map(|u| u.to_string()).collect(),
        ));
        Ok(json!(true))
    }

    async fn set_commands(&self, _token: &str, commands: &[PlatformCommand]) -> Result<()> {
        if self.fail_set_commands {
            return Err(AppError::Upstream("Telegram setMyCommands failed".to_string()));
        }
        self.registered.lock().unwrap().push(commands.to_vec());
        Ok(())
    }

    async fn send_message(&self, _token: &str, chat_id: i64, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeStorage {
    pub buckets: Mutex<Vec<String>>,
    pub created: Mutex<Vec<BucketSpec>>,
}

impl FakeStorage {
    pub fn with_buckets(buckets: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            buckets: Mutex::new(buckets.iter().map(|b| b.to_string()).collect()),
            created: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl StorageAdmin for FakeStorage {
    fn name(&self) -> &str {
        "fake-storage"
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(self.buckets.lock().unwrap().clone())
    }

    async fn create_bucket(&self, spec: &BucketSpec) -> Result<()> {
        self.buckets.lock().unwrap().push(spec.id.clone());
        self.created.lock().unwrap().push(spec.clone());
        Ok(())
    }
}

pub struct Fakes {
    pub classifier: Arc<FakeGenerator>,
    pub generator: Arc<FakeGenerator>,
    pub bot: Arc<FakeBotPlatform>,
    pub storage: Arc<FakeStorage>,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            classifier: FakeGenerator::replying(
                r#"{"isValid": true, "score": 0.95, "issues": [], "feedback": "Looks good"}"#,
            ),
            generator: FakeGenerator::replying(
                r#"{"enhancedTitle": "Better", "enhancedContent": "Much better content", "improvements": ["Clearer wording"]}"#,
            ),
            bot: FakeBotPlatform::new(),
            storage: FakeStorage::with_buckets(&[]),
        }
    }

    pub fn integrations(&self) -> Integrations {
        Integrations {
            classifier: self.classifier.clone(),
            generator: self.generator.clone(),
            bot_platform: self.bot.clone(),
            storage: self.storage.clone(),
        }
    }

    pub fn context(&self, pool: SqlitePool, settings: &Settings) -> Arc<ServiceContext> {
        Arc::new(ServiceContext::new(pool, self.integrations(), settings))
    }
}
