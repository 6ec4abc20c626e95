//! Filter and selection state behind a "pick one" list.
//!
//! ## Lifecycle
//!
//! ```text
//! new()        items held back, is_loading = true
//! initialize() items published, pending selection resolved, is_loading = false
//! initialize() again: no-op
//! ```
//!
//! ## Selection Resolution
//!
//! The selection passed to [`BrowseCollection::new`] is matched against the
//! published items, first rule that applies wins:
//!
//! 1. the candidate has an entity id: the item with the same id, or nothing
//! 2. an item with [`Browsable::same_value`] against the candidate
//! 3. the very same `Rc` as the candidate
//!
//! ## Filtering
//!
//! A blank search text shows everything. Otherwise an item is visible when the
//! lowercased search text occurs in the lowercased text of any of its fields.
//! Filtering never changes the selection; it only decides whether the
//! selection can be confirmed.

use super::notify::{BrowseProperty, Notifier, SubscriptionId};
use super::Browsable;
use crate::model::BrowserColumn;
use std::rc::Rc;

pub struct BrowseCollection<T> {
    pending_items: Option<Vec<Rc<T>>>,
    pending_selection: Option<Rc<T>>,
    items: Vec<Rc<T>>,
    visible: Vec<Rc<T>>,
    columns: Option<Vec<BrowserColumn>>,
    search_text: String,
    selection: Option<Rc<T>>,
    dialog_result: Option<bool>,
    loading: bool,
    notifier: Notifier,
}

impl<T: Browsable> BrowseCollection<T> {
    /// Hold `items` and `current` until [`initialize`](Self::initialize).
    /// Absent items browse as an empty list.
    pub fn new(items: Option<Vec<Rc<T>>>, current: Option<Rc<T>>) -> Self {
        Self {
            pending_items: Some(items.unwrap_or_default()),
            pending_selection: current,
            items: Vec::new(),
            visible: Vec::new(),
            columns: None,
            search_text: String::new(),
            selection: None,
            dialog_result: None,
            loading: true,
            notifier: Notifier::new(),
        }
    }

    pub fn with_columns(mut self, columns: Option<Vec<BrowserColumn>>) -> Self {
        self.columns = columns;
        self
    }

    /// Publish the items and resolve the pending selection. Runs once.
    pub fn initialize(&mut self) {
        let Some(items) = self.pending_items.take() else {
            return;
        };

        self.items = items;
        self.visible = self.filtered();
        self.notifier.emit(BrowseProperty::VisibleCount);

        if let Some(candidate) = self.pending_selection.take() {
            let resolved = self.resolve(&candidate);
            if resolved.is_none() {
                tracing::debug!("initial selection is not among the items");
            }
            self.set_selection(resolved);
        }

        self.loading = false;
        self.notifier.emit(BrowseProperty::IsLoading);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every published item, filter ignored.
    pub fn items(&self) -> &[Rc<T>] {
        &self.items
    }

    pub fn visible_items(&self) -> &[Rc<T>] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn has_search_text(&self) -> bool {
        !self.search_text.trim().is_empty()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.search_text {
            return;
        }
        self.search_text = text;
        self.notifier.emit(BrowseProperty::SearchText);
        self.refresh_filter();
    }

    pub fn clear_filter(&mut self) {
        self.set_search_text(String::new());
    }

    pub fn selection(&self) -> Option<&Rc<T>> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, item: Option<Rc<T>>) {
        self.set_selection(item);
    }

    /// True when something is selected and it is currently visible.
    pub fn can_confirm(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selected| self.is_visible(selected))
    }

    /// Accept the selection. Does nothing and returns false when it can't be confirmed.
    pub fn confirm(&mut self) -> bool {
        if !self.can_confirm() {
            return false;
        }
        self.set_dialog_result(true);
        true
    }

    pub fn cancel(&mut self) {
        self.set_dialog_result(false);
    }

    /// `None` while undecided, then `Some(true)` for confirm, `Some(false)` for cancel.
    pub fn dialog_result(&self) -> Option<bool> {
        self.dialog_result
    }

    pub fn columns(&self) -> Option<&[BrowserColumn]> {
        self.columns.as_deref()
    }

    pub fn has_custom_columns(&self) -> bool {
        self.columns.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Text for `item` under `column`, or `None` if the column's field doesn't exist.
    pub fn cell_text(&self, item: &T, column: &BrowserColumn) -> Option<String> {
        item.field_text(&column.data_field)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(BrowseProperty) + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn refresh_filter(&mut self) {
        self.visible = self.filtered();
        self.notifier.emit(BrowseProperty::VisibleCount);
        self.notifier.emit(BrowseProperty::HasSearchText);

        // Re-affirm a still-visible selection so views restore highlight and scroll
        if let Some(selected) = &self.selection {
            if self.is_visible(selected) {
                self.notifier.emit(BrowseProperty::Selection);
            }
        }

        self.notifier.emit(BrowseProperty::CanConfirm);
    }

    fn filtered(&self) -> Vec<Rc<T>> {
        if !self.has_search_text() {
            return self.items.clone();
        }

        let needle = self.search_text.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.field_texts()
                    .iter()
                    .any(|text| text.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    fn is_visible(&self, item: &Rc<T>) -> bool {
        self.visible.iter().any(|v| Rc::ptr_eq(v, item))
    }

    fn resolve(&self, candidate: &Rc<T>) -> Option<Rc<T>> {
        if let Some(id) = candidate.entity_id() {
            return self
                .items
                .iter()
                .find(|item| item.entity_id() == Some(id))
                .cloned();
        }

        self.items
            .iter()
            .find(|item| item.same_value(candidate))
            .or_else(|| self.items.iter().find(|item| Rc::ptr_eq(item, candidate)))
            .cloned()
    }

    fn set_selection(&mut self, item: Option<Rc<T>>) {
        let unchanged = match (&self.selection, &item) {
            (Some(current), Some(new)) => Rc::ptr_eq(current, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        self.selection = item;
        self.notifier.emit(BrowseProperty::Selection);
        self.notifier.emit(BrowseProperty::CanConfirm);
    }

    fn set_dialog_result(&mut self, result: bool) {
        if self.dialog_result == Some(result) {
            return;
        }
        self.dialog_result = Some(result);
        self.notifier.emit(BrowseProperty::DialogResult);
    }
}
