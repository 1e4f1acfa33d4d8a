//! Live configuration handle shared by the panel and the frame driver.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::Result;
use crate::weather::WeatherConfig;

/// Shared, single-threaded handle to the current [`WeatherConfig`].
///
/// Clones share the same config. Readers always see the latest edit, so an
/// action holding a clone (e.g. export) never works from a stale copy.
#[derive(Clone, Debug, Default)]
pub struct LiveConfig {
    inner: Rc<RefCell<WeatherConfig>>,
}

impl LiveConfig {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(config.clamped())),
        }
    }

    /// Copy of the current config, taken once per frame by the driver.
    pub fn snapshot(&self) -> WeatherConfig {
        self.inner.borrow().clone()
    }

    /// Edit the config; the result is clamped to panel ranges. The edit
    /// runs on a copy, so it may read other handles.
    pub fn update<F: FnOnce(&mut WeatherConfig)>(&self, edit: F) {
        let mut config = self.snapshot();
        edit(&mut config);
        *self.inner.borrow_mut() = config.clamped();
    }

    /// Replace the whole config.
    pub fn replace(&self, config: WeatherConfig) {
        *self.inner.borrow_mut() = config.clamped();
    }

    /// Current config as pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        self.inner.borrow().to_json()
    }

    /// Whether two handles share the same config.
    pub fn same_as(&self, other: &LiveConfig) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
