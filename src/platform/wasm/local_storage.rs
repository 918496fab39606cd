//! [Window.localStorage][1] of a browser.
//!
//! [1]: https://html.spec.whatwg.org/#dom-localstorage

use tracerr::Traced;

use crate::platform::{Error, KeyValueStorage};

use super::window;

/// [`KeyValueStorage`] backed by the origin's [localStorage][1].
///
/// [1]: https://html.spec.whatwg.org/#dom-localstorage
#[derive(Clone, Debug)]
pub struct LocalStorage(web_sys::Storage);

impl LocalStorage {
    /// Opens the [localStorage][1] of the current origin.
    ///
    /// # Errors
    ///
    /// If there is no `window`, or the user agent denies access to the
    /// storage (e.g. it's disabled for the origin).
    ///
    /// [1]: https://html.spec.whatwg.org/#dom-localstorage
    pub fn open() -> Result<Self, Traced<Error>> {
        window()
            .map_err(tracerr::wrap!())?
            .local_storage()
            .map_err(Error::from)
            .map_err(tracerr::wrap!())?
            .map(Self)
            .ok_or_else(|| {
                tracerr::new!(Error::new(
                    "NoLocalStorage",
                    "`window.localStorage` is unavailable",
                ))
            })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Traced<Error>> {
        self.0
            .get_item(key)
            .map_err(Error::from)
            .map_err(tracerr::wrap!())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Traced<Error>> {
        self.0
            .set_item(key, value)
            .map_err(Error::from)
            .map_err(tracerr::wrap!())
    }

    fn remove(&self, key: &str) -> Result<(), Traced<Error>> {
        self.0
            .remove_item(key)
            .map_err(Error::from)
            .map_err(tracerr::wrap!())
    }
}
