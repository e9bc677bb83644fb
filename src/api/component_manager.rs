use std::fmt;

use tracing::debug;

use crate::core::PlotOptions;
use crate::error::{PlotError, PlotResult};
use crate::extensions::{ComponentKind, PlotComponent};
use crate::render::EngineView;

/// Where a component came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentOrigin {
    /// Created by the chart type's component hook; rebuilt on every
    /// full re-render.
    Builtin,
    /// Attached by the caller; survives re-renders.
    User,
}

struct ComponentEntry {
    component: Box<dyn PlotComponent>,
    origin: ComponentOrigin,
    attached: bool,
}

/// Owns the components of one plot layer, keyed by unique id.
#[derive(Default)]
pub struct ComponentManager {
    entries: Vec<ComponentEntry>,
}

impl ComponentManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `component` to `view` and takes ownership of it.
    ///
    /// Ids must be non-empty and unique across the manager.
    pub fn attach(
        &mut self,
        mut component: Box<dyn PlotComponent>,
        origin: ComponentOrigin,
        view: &mut dyn EngineView,
        options: &PlotOptions,
    ) -> PlotResult<()> {
        let id = component.id().to_owned();
        if id.is_empty() {
            return Err(PlotError::InvalidData(
                "component id must not be empty".to_owned(),
            ));
        }
        if self.contains(&id) {
            return Err(PlotError::DuplicateComponent { id });
        }
        component.attach(view, options)?;
        debug!(component = %id, ?origin, "component attached");
        self.entries.push(ComponentEntry {
            component,
            origin,
            attached: true,
        });
        Ok(())
    }

    /// Detaches every component. Built-in components are dropped, user
    /// components are kept for `reattach`.
    pub fn detach_all(&mut self, view: &mut dyn EngineView) {
        for entry in &mut self.entries {
            if entry.attached {
                entry.component.detach(view);
                entry.attached = false;
            }
        }
        self.entries
            .retain(|entry| entry.origin == ComponentOrigin::User);
    }

    /// Detaches every component in attachment order and drops them all.
    pub fn destroy_all(&mut self, view: &mut dyn EngineView) {
        for mut entry in self.entries.drain(..) {
            if entry.attached {
                entry.component.detach(view);
            }
        }
    }

    /// Re-attaches every detached component against the current view state.
    pub fn reattach(&mut self, view: &mut dyn EngineView, options: &PlotOptions) -> PlotResult<()> {
        for entry in &mut self.entries {
            if !entry.attached {
                entry.component.attach(view, options)?;
                entry.attached = true;
            }
        }
        Ok(())
    }

    /// Detaches and removes one component. Returns `true` when found.
    pub fn remove(&mut self, id: &str, view: &mut dyn EngineView) -> bool {
        let Some(position) = self
            .entries
            .iter()
            .position(|entry| entry.component.id() == id)
        else {
            return false;
        };
        let mut entry = self.entries.remove(position);
        if entry.attached {
            entry.component.detach(view);
        }
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.component.id() == id)
    }

    #[must_use]
    pub fn kind_of(&self, id: &str) -> Option<ComponentKind> {
        self.entries
            .iter()
            .find(|entry| entry.component.id() == id)
            .map(|entry| entry.component.kind())
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.component.id())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| {
                (entry.component.id(), entry.origin, entry.attached)
            }))
            .finish()
    }
}
