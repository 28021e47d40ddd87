//! Registry of live panels, keyed by view type and resource

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use podlog_core::prelude::*;

/// Lifecycle hooks the registry drives on its panels
pub trait ManagedPanel {
    /// Replace the panel's content and resource label
    fn set_info(&mut self, content: String, resource: String);

    /// Recompute the hosted document
    fn update(&mut self);

    /// Bring the panel to the front
    fn reveal(&mut self);

    /// Tear the panel down. Called once, before removal from the registry.
    fn dispose(&mut self);
}

/// Identity of a panel: one per view type and resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PanelKey {
    pub view_type: &'static str,
    pub resource: String,
}

impl PanelKey {
    pub fn new(view_type: &'static str, resource: impl Into<String>) -> Self {
        Self {
            view_type,
            resource: resource.into(),
        }
    }
}

/// Live panels owned by the application.
///
/// Passed by reference to whatever creates panels; there is no global map.
#[derive(Debug)]
pub struct PanelRegistry<P> {
    panels: HashMap<PanelKey, P>,
}

impl<P> Default for PanelRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PanelRegistry<P> {
    pub fn new() -> Self {
        Self {
            panels: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn contains(&self, key: &PanelKey) -> bool {
        self.panels.contains_key(key)
    }

    pub fn get(&self, key: &PanelKey) -> Option<&P> {
        self.panels.get(key)
    }

    pub fn get_mut(&mut self, key: &PanelKey) -> Option<&mut P> {
        self.panels.get_mut(key)
    }
}

impl<P: ManagedPanel> PanelRegistry<P> {
    /// Return the panel for `(view_type, resource)`, creating it if needed.
    ///
    /// An existing panel is reused: its content is replaced, its document is
    /// recomputed and it is revealed. `create` only runs for a new panel.
    pub fn create_or_show<F>(
        &mut self,
        view_type: &'static str,
        content: String,
        resource: String,
        create: F,
    ) -> &mut P
    where
        F: FnOnce(String, String) -> P,
    {
        match self.panels.entry(PanelKey::new(view_type, resource.clone())) {
            Entry::Occupied(entry) => {
                debug!("Reusing {} panel for {}", view_type, resource);
                let panel = entry.into_mut();
                panel.set_info(content, resource);
                panel.update();
                panel.reveal();
                panel
            }
            Entry::Vacant(entry) => {
                info!("Creating {} panel for {}", view_type, resource);
                entry.insert(create(content, resource))
            }
        }
    }

    /// Dispose and remove one panel. Returns `false` if it was not registered.
    pub fn dispose(&mut self, key: &PanelKey) -> bool {
        match self.panels.remove(key) {
            Some(mut panel) => {
                panel.dispose();
                true
            }
            None => false,
        }
    }

    /// Dispose every panel. Returns how many were torn down.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.panels.len();
        for (_, mut panel) in self.panels.drain() {
            panel.dispose();
        }
        count
    }
}
