// src/store.rs

//! Remote collection store
//!
//! Holds the last full list fetched for one resource. The server is the only
//! source of truth: a store is never patched locally, every mutation is
//! followed by [`RemoteCollectionStore::invalidate_and_refetch`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::api::{BannersApi, BestProductsApi, BlogApi, CategoriesApi, OrdersApi, ProductsApi};
use crate::error::Result;
use crate::models::{Banner, BlogPost, Category, Identified, Order, OrderStatus, Product};
use crate::types::EntityId;
use crate::notify::Notifier;

/// Anything that can fetch the complete list of one resource in one call
#[async_trait]
pub trait CollectionSource<T>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<T>>;
}

/// What a failed load does to the snapshot already held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    KeepPrevious,
    Clear,
}

#[derive(Debug)]
pub struct RemoteCollectionStore<T> {
    name: String,
    items: RwLock<Vec<T>>,
    loading: AtomicBool,
    generation: AtomicU64,
    loaded_at: RwLock<Option<DateTime<Utc>>>,
    policy: FailurePolicy,
    notifier: Notifier,
}

impl<T> RemoteCollectionStore<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(name: impl Into<String>, notifier: Notifier) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(Vec::new()),
            loading: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            loaded_at: RwLock::new(None),
            policy: FailurePolicy::KeepPrevious,
            notifier,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the snapshot with a full fetch from `source`.
    ///
    /// On failure the snapshot follows the store's [`FailurePolicy`], the
    /// failure is published on the notifier and returned.
    pub async fn load<S>(&self, source: &S) -> Result<Vec<T>>
    where
        S: CollectionSource<T> + ?Sized,
    {
        let result = {
            let _loading = LoadingGuard::begin(&self.loading);
            source.fetch_all().await
        };

        match result {
            Ok(items) => {
                tracing::debug!(store = %self.name, count = items.len(), "collection loaded");
                *self.items.write().await = items.clone();
                *self.loaded_at.write().await = Some(Utc::now());
                self.generation.fetch_add(1, Ordering::SeqCst);
                Ok(items)
            }
            Err(e) => {
                tracing::error!(store = %self.name, error = %e, "failed to load collection");
                if self.policy == FailurePolicy::Clear {
                    self.items.write().await.clear();
                }
                self.notifier
                    .failure(&self.name, format!("Failed to load {}", self.name), &e);
                Err(e)
            }
        }
    }

    /// Reload after a mutation; same contract as [`Self::load`]
    pub async fn invalidate_and_refetch<S>(&self, source: &S) -> Result<Vec<T>>
    where
        S: CollectionSource<T> + ?Sized,
    {
        tracing::debug!(store = %self.name, "invalidated");
        self.load(source).await
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    /// Looks an entity up in the current snapshot
    pub async fn find(&self, id: EntityId) -> Option<T>
    where
        T: Identified,
    {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.entity_id() == Some(id))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Number of successful loads so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        *self.loaded_at.read().await
    }
}

/// Holds the loading flag up while a fetch is pending, including when the
/// fetch future is dropped before it completes
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn begin(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl CollectionSource<Product> for ProductsApi {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        self.list().await
    }
}

#[async_trait]
impl CollectionSource<Category> for CategoriesApi {
    async fn fetch_all(&self) -> Result<Vec<Category>> {
        self.list().await
    }
}

#[async_trait]
impl CollectionSource<Banner> for BannersApi {
    async fn fetch_all(&self) -> Result<Vec<Banner>> {
        self.list().await
    }
}

#[async_trait]
impl CollectionSource<BlogPost> for BlogApi {
    async fn fetch_all(&self) -> Result<Vec<BlogPost>> {
        self.list().await
    }
}

#[async_trait]
impl CollectionSource<Product> for BestProductsApi {
    async fn fetch_all(&self) -> Result<Vec<Product>> {
        self.list().await
    }
}

/// Orders are only ever listed for one status at a time
#[derive(Debug, Clone)]
pub struct OrdersWithStatus {
    pub api: OrdersApi,
    pub status: OrderStatus,
}

#[async_trait]
impl CollectionSource<Order> for OrdersWithStatus {
    async fn fetch_all(&self) -> Result<Vec<Order>> {
        self.api.list_by_status(self.status).await
    }
}
