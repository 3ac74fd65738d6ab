//! 对象缓存
//!
//! 目前只用于缓存 JWT 对应的用户记录。后端可选 moka（进程内）或 redis，
//! redis 不可用时回退到 moka。

pub mod object_cache;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::CacheConfig;
use object_cache::{moka::MokaCacheWrapper, redis::RedisObjectCache};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，无法判断是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 为 0 时使用后端默认值
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化，反序列化失败视为未命中
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    debug!("Discarding undecodable cache entry '{}': {}", key, e);
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => warn!("Failed to serialize cache entry '{}': {}", key, e),
        }
    }
}

/// 按配置创建缓存后端
pub async fn create_object_cache(config: &CacheConfig) -> Arc<dyn ObjectCache> {
    match config.cache_type.as_str() {
        "redis" => match RedisObjectCache::connect(config).await {
            Ok(cache) => Arc::new(cache),
            Err(e) => {
                warn!("Redis cache unavailable ({}), falling back to moka", e);
                Arc::new(MokaCacheWrapper::new(config))
            }
        },
        "moka" => Arc::new(MokaCacheWrapper::new(config)),
        other => {
            warn!("Unknown cache type '{}', using moka", other);
            Arc::new(MokaCacheWrapper::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemoryConfig, RedisConfig};

    fn memory_config() -> CacheConfig {
        CacheConfig {
            cache_type: "moka".to_string(),
            default_ttl: 60,
            redis: RedisConfig {
                url: String::new(),
                key_prefix: "test:".to_string(),
            },
            memory: MemoryConfig { max_capacity: 100 },
        }
    }

    #[tokio::test]
    async fn test_typed_roundtrip_through_moka() {
        let cache = create_object_cache(&memory_config()).await;
        cache
            .insert("user:abc".to_string(), &vec![1_i64, 2, 3], 0)
            .await;
        assert_eq!(
            cache.get::<Vec<i64>>("user:abc").await,
            CacheResult::Found(vec![1, 2, 3])
        );

        cache.remove("user:abc").await;
        assert_eq!(cache.get::<Vec<i64>>("user:abc").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let cache = create_object_cache(&memory_config()).await;
        cache
            .insert_raw("user:bad".to_string(), "not json".to_string(), 0)
            .await;
        assert_eq!(cache.get::<i64>("user:bad").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_type_falls_back_to_moka() {
        let mut config = memory_config();
        config.cache_type = "memcached".to_string();
        let cache = create_object_cache(&config).await;
        cache.insert_raw("k".to_string(), "\"v\"".to_string(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("\"v\"".to_string()));
    }
}
