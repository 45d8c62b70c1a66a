//! Page session: the command handlers a front end calls into.

use std::time::Instant;

use turbo_cache::Store;

use crate::cart::{CartStore, CartSummary};
use crate::catalog::ItemCatalog;
use crate::config::AisleConfig;
use crate::error::AisleError;
use crate::search::{
    Debouncer, FilterCriteria, FilterEngine, ListingView, SortEngine, SortMode,
};

/// All engine state for one page, built once at page load.
///
/// The session has no event loop. The front end forwards each control
/// event to the matching `on_*` handler and calls [`PageSession::on_tick`]
/// when the search debounce deadline passes. Filter handlers recompute
/// immediately and return the fresh [`ListingView`].
#[derive(Debug)]
pub struct PageSession<S> {
    catalog: ItemCatalog,
    filters: FilterEngine,
    sort: SortEngine,
    search: Debouncer<()>,
    cart: CartStore<S>,
    config: AisleConfig,
    view: ListingView,
}

impl<S: Store> PageSession<S> {
    /// Start a session with default configuration.
    pub fn new(catalog: ItemCatalog, store: S) -> Self {
        Self::with_config(catalog, store, AisleConfig::default())
    }

    /// Start a session, loading the cart from `store` and running the
    /// initial recompute.
    pub fn with_config(catalog: ItemCatalog, store: S, config: AisleConfig) -> Self {
        let cart = CartStore::from_config(store, &config);
        tracing::debug!(
            items = catalog.len(),
            cart_lines = cart.len(),
            "page session started"
        );
        let mut session = Self {
            catalog,
            filters: FilterEngine::default(),
            sort: SortEngine::default(),
            search: Debouncer::new(config.debounce()),
            cart,
            config,
            view: ListingView::default(),
        };
        session.refresh();
        session
    }

    /// Filter, then sort, then rebuild the listing view.
    ///
    /// Any pending debounced recompute is dropped, since this one already
    /// sees the latest query.
    pub fn refresh(&mut self) -> &ListingView {
        self.search.cancel();
        let outcome = self.filters.evaluate(&mut self.catalog);
        let order = self.sort.order(&self.catalog);
        self.view = ListingView::new(&outcome, &self.filters.criteria().query, order);
        &self.view
    }

    /// Search box keystroke. Takes the query right away and schedules a
    /// recompute one debounce window from `now`, replacing any pending one.
    pub fn on_search_input(&mut self, raw: &str, now: Instant) {
        self.filters.criteria_mut().set_query(raw);
        if self.search.schedule((), now) {
            tracing::debug!("search recompute rescheduled");
        }
    }

    /// Advance the clock. Recomputes if the search debounce window has
    /// elapsed; returns whether it did.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(()) => {
                tracing::debug!(query = %self.filters.criteria().query, "debounced search fired");
                self.refresh();
                true
            }
            None => false,
        }
    }

    /// When [`PageSession::on_tick`] next has work to do, if ever.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Search form submitted. Applies the query now and drops any pending
    /// debounced recompute.
    pub fn on_search_submit(&mut self, raw: &str) -> &ListingView {
        self.filters.criteria_mut().set_query(raw);
        self.refresh()
    }

    /// Department dropdown changed.
    pub fn on_department_selected(&mut self, raw: &str) -> &ListingView {
        self.filters.criteria_mut().select_department(raw);
        self.refresh()
    }

    /// Sidebar department checkbox changed.
    pub fn on_department_toggled(&mut self, value: &str, checked: bool) -> &ListingView {
        self.filters.criteria_mut().toggle_department(value, checked);
        self.refresh()
    }

    /// Flag checkbox changed.
    pub fn on_flag_toggled(&mut self, value: &str, checked: bool) -> &ListingView {
        self.filters.criteria_mut().toggle_flag(value, checked);
        self.refresh()
    }

    /// Minimum rating control changed.
    pub fn on_rating_selected(&mut self, raw: &str) -> &ListingView {
        self.filters.criteria_mut().set_rating_input(raw);
        self.refresh()
    }

    /// Price range applied.
    pub fn on_price_applied(&mut self, min_raw: &str, max_raw: &str) -> &ListingView {
        self.filters.criteria_mut().set_price_inputs(min_raw, max_raw);
        self.refresh()
    }

    /// Reset the sidebar facets. The search bar is left as it is.
    pub fn on_clear_filters(&mut self) -> &ListingView {
        self.filters.criteria_mut().clear_facets();
        self.refresh()
    }

    /// Sort control changed. Reorders without re-filtering.
    pub fn on_sort_changed(&mut self, raw: &str) -> &ListingView {
        self.sort.set_mode(SortMode::from_value(raw));
        self.view.order = self.sort.order(&self.catalog);
        &self.view
    }

    /// "Add to cart" pressed.
    pub fn on_cart_add(&mut self, id: &str, name: &str, price: f64) -> Result<bool, AisleError> {
        self.cart.add_item(id, name, price)
    }

    /// Quantity typed into a cart line.
    pub fn on_cart_set_quantity(&mut self, id: &str, quantity: i64) -> Result<bool, AisleError> {
        self.cart.set_quantity(id, quantity)
    }

    /// Cart line +/- button.
    pub fn on_cart_step(&mut self, id: &str, delta: i64) -> Result<bool, AisleError> {
        self.cart.increment_quantity(id, delta)
    }

    /// Cart line remove button.
    pub fn on_cart_remove(&mut self, id: &str) -> Result<bool, AisleError> {
        self.cart.remove_item(id)
    }

    /// The listing as of the last recompute or sort change.
    pub fn view(&self) -> &ListingView {
        &self.view
    }

    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary()
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.filters.criteria()
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort.mode()
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn config(&self) -> &AisleConfig {
        &self.config
    }
}
