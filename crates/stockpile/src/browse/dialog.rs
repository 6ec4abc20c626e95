use super::collection::BrowseCollection;
use super::Browsable;
use crate::model::BrowserColumn;
use std::rc::Rc;

/// A view layer able to run a modal "pick one" interaction.
///
/// `show` receives an uninitialized collection. The host calls
/// [`BrowseCollection::initialize`] once its view is ready, lets the user
/// filter and select, and returns after the collection was confirmed,
/// cancelled or simply closed.
pub trait DialogHost<T> {
    fn show(&mut self, title: &str, browser: &mut BrowseCollection<T>);
}

/// Let the user pick one of `items`.
///
/// Returns the confirmed selection. Returns `current` unchanged when the
/// dialog is cancelled or closed without confirming, and when there are no
/// items to show at all.
pub fn pick<T, H>(
    host: &mut H,
    items: Option<Vec<Rc<T>>>,
    title: &str,
    current: Option<Rc<T>>,
    columns: Option<Vec<BrowserColumn>>,
) -> Option<Rc<T>>
where
    T: Browsable,
    H: DialogHost<T> + ?Sized,
{
    let Some(items) = items else {
        return current;
    };

    let mut browser = BrowseCollection::new(Some(items), current.clone()).with_columns(columns);
    host.show(title, &mut browser);

    match browser.dialog_result() {
        Some(true) => {
            tracing::info!(title, "selection confirmed");
            browser.selection().cloned().or(current)
        }
        _ => {
            tracing::info!(title, "selection cancelled");
            current
        }
    }
}
