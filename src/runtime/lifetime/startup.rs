use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{ObjectCache, create_object_cache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UserListQuery};
use crate::storage::{Storage, create_storage};

/// 默认管理员账号的用户名
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 没有任何管理员时创建一个，之后由身份服务为其签发令牌
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let admins = storage
        .list_users_with_pagination(UserListQuery {
            page: 1,
            size: 1,
            role: Some(UserRole::Admin),
            search: None,
        })
        .await?;
    if !admins.items.is_empty() {
        debug!("Administrator account present, skipping bootstrap");
        return Ok(());
    }

    let admin = storage
        .create_user(CreateUserRequest {
            username: BOOTSTRAP_ADMIN_USERNAME.to_string(),
            role: UserRole::Admin,
            first_name: "School".to_string(),
            last_name: "Administrator".to_string(),
            email: None,
            phone_number: None,
        })
        .await?;
    warn!(
        "No administrator found, created '{}' with user id {}",
        admin.username, admin.id
    );
    Ok(())
}

/// 准备服务器启动的上下文：存储（含迁移）、默认管理员与缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // redis 的 TLS 连接需要进程级的 crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let config = AppConfig::get();

    let storage = create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await?;

    let cache = create_object_cache(&config.cache).await;
    info!("{} cache backend initialized", config.cache.cache_type);

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::testing::memory_storage;

    #[tokio::test]
    async fn test_seed_admin_runs_once() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        seed_admin(&storage).await.unwrap();
        seed_admin(&storage).await.unwrap();

        let admins = storage
            .list_users_with_pagination(UserListQuery {
                page: 1,
                size: 10,
                role: Some(UserRole::Admin),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(admins.items.len(), 1);
        assert_eq!(admins.items[0].username, BOOTSTRAP_ADMIN_USERNAME);
    }
}
