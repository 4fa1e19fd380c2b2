use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use matplan_recipe::{Catalog, Recipe, RecipeFilter};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Runs only the last of a burst of computations, `delay` after it was pushed.
///
/// A push aborts the pending task and bumps a generation counter. A task
/// publishes only while its generation is still the current one, so a task
/// that already woke up can never overwrite a newer input.
pub struct Debouncer<T> {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    tx: watch::Sender<Option<T>>,
}

impl<T: Send + Sync + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, _) = watch::channel(None);

        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.tx.subscribe()
    }

    /// Must be called from within a tokio runtime.
    pub fn push<F>(&mut self, compute: F)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let generation = self.invalidate();
        let current = self.generation.clone();
        let tx = self.tx.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if current.load(Ordering::SeqCst) != generation {
                return;
            }

            let value = compute();
            tx.send_if_modified(|slot| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }

                *slot = Some(value);
                true
            });
        }));
    }

    /// Drops the pending computation, if any.
    pub fn cancel(&mut self) {
        self.invalidate();
    }

    fn invalidate(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl<T: Clone> Debouncer<T> {
    pub fn latest(&self) -> Option<T> {
        self.tx.borrow().clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub filter: RecipeFilter,
    pub recipes: Vec<Arc<Recipe>>,
}

/// Search-as-you-type over the catalog.
pub struct CatalogSearch {
    catalog: Catalog,
    debouncer: Debouncer<SearchResult>,
}

impl CatalogSearch {
    pub fn new(catalog: Catalog, delay: Duration) -> Self {
        Self {
            catalog,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Schedules a search; any search still waiting is dropped.
    pub fn input(&mut self, filter: RecipeFilter) {
        let catalog = self.catalog.clone();

        self.debouncer.push(move || {
            let recipes = catalog.search(&filter);
            tracing::debug!(matches = recipes.len(), "catalog searched");

            SearchResult { filter, recipes }
        });
    }

    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SearchResult>> {
        self.debouncer.subscribe()
    }

    pub fn latest(&self) -> Option<SearchResult> {
        self.debouncer.latest()
    }

    /// Same result as a settled [`Self::input`], without waiting.
    pub fn search_now(&self, filter: &RecipeFilter) -> Vec<Arc<Recipe>> {
        self.catalog.search(filter)
    }
}
