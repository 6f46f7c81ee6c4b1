use std::sync::Arc;

use comedor_menu::{OrderLine, WeeklyMenu, compute_order};
use comedor_monthly::{LogField, MonthlyLog, MonthlyTotals, compute_monthly_totals};
use comedor_recipe::{Catalog, CatalogStore, Recipe, merge_preloaded};
use comedor_report::{ReportError, monthly_workbook, order_workbook, to_buffer};
use comedor_shared::{DayFilter, MealSlot, Weekday};
use tokio::sync::RwLock;

/// Everything one planning session works on.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub catalog: Catalog,
    pub menu: WeeklyMenu,
    pub log: MonthlyLog,
    pub last_order: Vec<OrderLine>,
}

/// The shared session plus the store the catalog is mirrored to.
///
/// Catalog mutations hold the write lock until the store has been written,
/// so saves land in the order the mutations were made.
#[derive(Clone)]
pub struct Planner {
    session: Arc<RwLock<Session>>,
    store: Arc<dyn CatalogStore>,
}

impl Planner {
    /// Merge the stored catalog with `preloaded` and write the result back.
    ///
    /// A store that cannot be read starts the session from the preload only.
    pub async fn start(store: Arc<dyn CatalogStore>, preloaded: Vec<Recipe>) -> Self {
        let stored = match store.load().await {
            Ok(recipes) => recipes,
            Err(e) => {
                tracing::warn!("Stored catalog unavailable, starting without it: {e}");
                Vec::new()
            }
        };

        tracing::info!(
            preloaded = preloaded.len(),
            stored = stored.len(),
            "Merging recipe catalog"
        );

        let session = Session {
            catalog: Catalog::new(merge_preloaded(preloaded, stored)),
            ..Session::default()
        };

        let planner = Self {
            session: Arc::new(RwLock::new(session)),
            store,
        };
        planner.persist(&planner.session.read().await.catalog).await;
        planner
    }

    async fn persist(&self, catalog: &Catalog) {
        if let Err(e) = self.store.save(catalog.recipes()).await {
            tracing::warn!("Catalog not saved: {e}");
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn catalog(&self) -> Catalog {
        self.session.read().await.catalog.clone()
    }

    pub async fn add_or_update(&self, recipe: Recipe) -> (usize, Catalog) {
        let mut session = self.session.write().await;
        let index = session.catalog.add_or_update(recipe);
        self.persist(&session.catalog).await;
        (index, session.catalog.clone())
    }

    pub async fn begin_edit(&self, index: usize) -> Option<Recipe> {
        let mut session = self.session.write().await;
        session.catalog.begin_edit(index).cloned()
    }

    pub async fn cancel_edit(&self) -> Catalog {
        let mut session = self.session.write().await;
        session.catalog.cancel_edit();
        session.catalog.clone()
    }

    /// Menu and log slots naming the recipe are left as they are.
    pub async fn delete(&self, name: &str) -> (usize, Catalog) {
        let mut session = self.session.write().await;
        let removed = session.catalog.delete(name);
        if removed > 0 {
            self.persist(&session.catalog).await;
        }
        (removed, session.catalog.clone())
    }

    pub async fn set_menu_slot(
        &self,
        day: Weekday,
        slot: MealSlot,
        recipe: Option<String>,
    ) -> WeeklyMenu {
        let mut session = self.session.write().await;
        session.menu = session.menu.with_slot(day, slot, recipe);
        session.menu.clone()
    }

    /// Compute the order and keep it for the next export.
    pub async fn order(&self, headcount: u32, filter: DayFilter) -> Vec<OrderLine> {
        let mut session = self.session.write().await;
        let lines = compute_order(&session.menu, &session.catalog, headcount, filter);
        tracing::info!(headcount, day = %filter, lines = lines.len(), "Order computed");
        session.last_order = lines.clone();
        lines
    }

    pub async fn set_log_field(&self, week: usize, day: Weekday, field: &LogField) -> MonthlyLog {
        let mut session = self.session.write().await;
        session.log = session.log.with_field(week, day, field);
        session.log.clone()
    }

    pub async fn set_usage(
        &self,
        week: usize,
        day: Weekday,
        ingredient: &str,
        raw: &str,
    ) -> MonthlyLog {
        let mut session = self.session.write().await;
        session.log = session.log.with_usage(week, day, ingredient, raw);
        session.log.clone()
    }

    pub async fn monthly_totals(&self) -> MonthlyTotals {
        let session = self.session.read().await;
        compute_monthly_totals(&session.log, &session.catalog)
    }

    /// Spreadsheet bytes of the last computed order.
    pub async fn export_order(&self) -> Result<Vec<u8>, ReportError> {
        let session = self.session.read().await;
        to_buffer(order_workbook(&session.last_order)?)
    }

    pub async fn export_monthly_log(&self) -> Result<Vec<u8>, ReportError> {
        let session = self.session.read().await;
        let totals = compute_monthly_totals(&session.log, &session.catalog);
        to_buffer(monthly_workbook(&session.log, &session.catalog, &totals)?)
    }
}
