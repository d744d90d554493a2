use crate::config::AppConfig;
use crate::sys::launch::CommandApp;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub const MAIN: SlotIndex = SlotIndex(0);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    pub fn plugin_id(&self) -> PluginId {
        PluginId::new(format!("app_{}", self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct PluginId(String);

crate::impl_string_newtype!(PluginId);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No app registered as '{0}'")]
    NotFound(PluginId),
}

/// A launchable app. `run` blocks the home loop until the app is done.
pub trait App<S: ?Sized> {
    fn run(&self, surface: &S);
}

/// The screen an app is launched from. External programs need it out of the
/// way while they run, since the home loop cannot redraw until they exit.
pub trait LaunchSurface {
    fn suspend(&self) {}
    fn resume(&self) {}
}

impl LaunchSurface for () {}

impl<S: ?Sized, F: Fn(&S)> App<S> for F {
    fn run(&self, surface: &S) {
        self(surface)
    }
}

pub struct Registry<S: ?Sized> {
    apps: HashMap<SlotIndex, Box<dyn App<S>>>,
}

impl<S: ?Sized> Default for Registry<S> {
    fn default() -> Self {
        Self {
            apps: HashMap::new(),
        }
    }
}

impl<S: ?Sized> Registry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any app already bound to `slot`.
    pub fn register(&mut self, slot: SlotIndex, app: impl App<S> + 'static) {
        if self.apps.insert(slot, Box::new(app)).is_some() {
            log::warn!("Replacing app bound to {}", slot.plugin_id());
        }
    }

    pub fn resolve(&self, slot: SlotIndex) -> Result<&dyn App<S>, DispatchError> {
        self.apps
            .get(&slot)
            .map(|app| app.as_ref())
            .ok_or_else(|| DispatchError::NotFound(slot.plugin_id()))
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl<S: LaunchSurface + ?Sized> Registry<S> {
    pub fn from_config(apps: &[AppConfig], satellites: usize) -> Self {
        let mut registry = Self::new();

        for cfg in apps {
            let index = cfg.slot.get();
            if index == 0 || index > satellites {
                log::warn!(
                    "Ignoring app '{}': slot {} is not on the ring (1..={})",
                    cfg.display_name(),
                    index,
                    satellites
                );
                continue;
            }
            registry.register(
                cfg.slot,
                CommandApp::new(cfg.display_name(), cfg.exec.clone()),
            );
        }

        registry
    }
}
