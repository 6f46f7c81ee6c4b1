use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::Recipe;

/// Durable mirror of the catalog.
///
/// `load` is called once when a session starts and `save` after every
/// committed catalog mutation, with the full recipe list.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn load(&self) -> anyhow::Result<Vec<Recipe>>;

    async fn save(&self, recipes: &[Recipe]) -> anyhow::Result<()>;
}

/// In-process store, used by tests and by one-shot CLI commands.
#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
    recipes: Arc<Mutex<Vec<Recipe>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryCatalogStore {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Arc::new(Mutex::new(recipes)),
            saves: Arc::default(),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Recipe> {
        self.recipes
            .lock()
            .map(|recipes| recipes.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn load(&self) -> anyhow::Result<Vec<Recipe>> {
        let recipes = self
            .recipes
            .lock()
            .map_err(|_| anyhow::anyhow!("catalog store lock poisoned"))?;

        Ok(recipes.clone())
    }

    async fn save(&self, recipes: &[Recipe]) -> anyhow::Result<()> {
        let mut stored = self
            .recipes
            .lock()
            .map_err(|_| anyhow::anyhow!("catalog store lock poisoned"))?;

        *stored = recipes.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
