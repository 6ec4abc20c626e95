use std::fmt;

/// Named logical properties of a browse collection that observers can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowseProperty {
    SearchText,
    VisibleCount,
    HasSearchText,
    Selection,
    CanConfirm,
    IsLoading,
    DialogResult,
}

impl fmt::Display for BrowseProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BrowseProperty::SearchText => "search_text",
            BrowseProperty::VisibleCount => "visible_count",
            BrowseProperty::HasSearchText => "has_search_text",
            BrowseProperty::Selection => "selection",
            BrowseProperty::CanConfirm => "can_confirm",
            BrowseProperty::IsLoading => "is_loading",
            BrowseProperty::DialogResult => "dialog_result",
        };
        f.write_str(name)
    }
}

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(BrowseProperty)>;

/// Single-threaded property-change emitter.
///
/// Listeners run synchronously, in subscription order, on every emit.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(BrowseProperty) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < before
    }

    pub fn emit(&self, property: BrowseProperty) {
        for (_, listener) in &self.listeners {
            listener(property);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emits_to_every_listener_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();

        let first = Rc::clone(&log);
        notifier.subscribe(move |p| first.borrow_mut().push(format!("a:{}", p)));
        let second = Rc::clone(&log);
        notifier.subscribe(move |p| second.borrow_mut().push(format!("b:{}", p)));

        notifier.emit(BrowseProperty::VisibleCount);
        assert_eq!(*log.borrow(), vec!["a:visible_count", "b:visible_count"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hits = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();

        let counter = Rc::clone(&hits);
        let id = notifier.subscribe(move |_| *counter.borrow_mut() += 1);
        notifier.emit(BrowseProperty::Selection);

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.emit(BrowseProperty::Selection);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(notifier.listener_count(), 0);
    }
}
