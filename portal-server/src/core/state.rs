use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use shared::event::EventKind;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::UserRepository;
use crate::services::EventHub;
use crate::utils::time;
use shared::models::UserCreate;

/// 分组报名锁
///
/// 每个分组一把异步互斥锁：重名检查、名额检查与写入在同一临界区内完成，
/// 同一分组的并发报名因此不会超出 max_companies。
#[derive(Debug, Default)]
pub struct GroupLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl GroupLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取 (必要时创建) 指定分组的锁
    pub fn lock_for(&self, group_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(group_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// 分组删除后释放其锁
    pub fn remove(&self, group_id: &str) {
        self.locks.remove(group_id);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / 句柄实现浅拷贝，每个请求 clone 一份成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | events | EventHub | 数据变更推送 |
/// | group_locks | Arc<GroupLocks> | 分组报名锁 |
/// | shutdown | CancellationToken | 进程关闭信号 (结束 SSE 连接) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub events: EventHub,
    pub group_locks: Arc<GroupLocks>,
    pub shutdown: CancellationToken,
    started_at: Instant,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 基于已打开的数据库构造状态
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            events: EventHub::new(config.event_channel_capacity),
            group_locks: Arc::new(GroupLocks::new()),
            shutdown: CancellationToken::new(),
            started_at: Instant::now(),
            config,
            db,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/portal.db)
    /// 3. 初始管理员账号
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("portal.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let state = Self::with_db(config.clone(), db_service.db);
        state
            .bootstrap_admin()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(state)
    }

    /// user 表为空时创建初始管理员
    pub async fn bootstrap_admin(&self) -> std::result::Result<(), crate::AppError> {
        let repo = UserRepository::new(self.get_db());
        if repo.count().await? > 0 {
            return Ok(());
        }

        if self.config.admin_password == "admin" {
            tracing::warn!(
                "⚠️  ADMIN_PASSWORD not set, bootstrap admin uses the default password"
            );
        }

        repo.create(UserCreate {
            username: self.config.admin_username.clone(),
            password: self.config.admin_password.clone(),
            display_name: Some("Administrator".to_string()),
            role: "admin".to_string(),
        })
        .await?;
        tracing::info!(username = %self.config.admin_username, "Bootstrap admin created");
        Ok(())
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 业务时区
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    /// 业务时区的当前本地时间
    pub fn business_now(&self) -> NaiveDateTime {
        time::business_now(self.config.timezone)
    }

    /// 业务时区的今天
    pub fn business_today(&self) -> NaiveDate {
        time::business_today(self.config.timezone)
    }

    /// 广播数据变更
    pub fn notify(&self, kind: EventKind) {
        self.events.publish(kind);
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_locks_are_shared_per_group() {
        let locks = GroupLocks::new();
        let a1 = locks.lock_for("company_group:a");
        let a2 = locks.lock_for("company_group:a");
        let b = locks.lock_for("company_group:b");
        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
        assert_eq!(locks.len(), 2);

        locks.remove("company_group:a");
        assert_eq!(locks.len(), 1);
    }
}
