use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::{PlotOptions, Record};
use crate::error::{PlotError, PlotResult};
use crate::extensions::PlotComponent;
use crate::render::{EngineView, GeometryId};

use super::chart_kind::ChartKind;
use super::component_manager::{ComponentManager, ComponentOrigin};
use super::config_merger::merge_options;
use super::defaults::global_defaults;
use super::event_registry::EventParserRegistry;
use super::pipeline::{StageInput, run_stages};
use super::user_options::UserOptions;

/// Lifecycle state of a [`PlotLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerState {
    Constructed,
    Configured,
    Rendered,
    Destroyed,
}

/// One chart instance: merged options, the engine view it drives, and the
/// components attached to that view.
///
/// Lifecycle: `Constructed → Configured → Rendered → Destroyed`, with
/// `update`, `change_data` and `repaint` looping on `Rendered`. Nothing is
/// usable after `destroy`.
pub struct PlotLayer<V: EngineView> {
    kind: ChartKind,
    view: V,
    state: LayerState,
    user_options: UserOptions,
    options: Option<Arc<PlotOptions>>,
    registry: EventParserRegistry,
    components: ComponentManager,
    geometries: Vec<GeometryId>,
}

impl<V: EngineView> PlotLayer<V> {
    /// Creates a layer without touching `view`. Invalid options surface
    /// later, from `configure` or the stage that reads them.
    #[must_use]
    pub fn new(kind: ChartKind, view: V, options: impl Into<UserOptions>) -> Self {
        Self {
            kind,
            view,
            state: LayerState::Constructed,
            user_options: options.into(),
            options: None,
            registry: EventParserRegistry::builtin(),
            components: ComponentManager::new(),
            geometries: Vec::new(),
        }
    }

    /// Replaces the event registry consulted by the event-parsing stage.
    #[must_use]
    pub fn with_event_registry(mut self, registry: EventParserRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> LayerState {
        self.state
    }

    /// Merged options, available once configured.
    #[must_use]
    pub fn options(&self) -> Option<&Arc<PlotOptions>> {
        self.options.as_ref()
    }

    #[must_use]
    pub fn user_options(&self) -> &UserOptions {
        &self.user_options
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Plot geometries added by the last full pipeline run.
    #[must_use]
    pub fn geometry_ids(&self) -> &[GeometryId] {
        &self.geometries
    }

    #[must_use]
    pub fn component_ids(&self) -> Vec<&str> {
        self.components.ids()
    }

    /// Runs the three-layer merge and stores the typed result.
    pub fn configure(&mut self) -> PlotResult<()> {
        match self.state {
            LayerState::Constructed | LayerState::Configured => {}
            state => return Err(PlotError::Lifecycle { operation: "configure", state }),
        }
        self.options = Some(Arc::new(self.merge(&self.user_options)?));
        self.transition(LayerState::Configured);
        Ok(())
    }

    /// Runs the six configuration stages, renders the view and attaches
    /// components. Configures first when still `Constructed`.
    pub fn render(&mut self) -> PlotResult<()> {
        match self.state {
            LayerState::Constructed => self.configure()?,
            LayerState::Configured => {}
            state => return Err(PlotError::Lifecycle { operation: "render", state }),
        }
        self.full_pass()?;
        self.transition(LayerState::Rendered);
        Ok(())
    }

    /// Deep-merges `patch` into the user options and rebuilds the view from
    /// scratch. Before the first render only the merged options are updated.
    /// A patch that fails to merge leaves the stored options untouched.
    pub fn update(&mut self, patch: impl Into<UserOptions>) -> PlotResult<()> {
        if self.state == LayerState::Destroyed {
            return Err(PlotError::Lifecycle {
                operation: "update",
                state: self.state,
            });
        }
        let mut user_options = self.user_options.clone();
        user_options.overlay(patch.into());
        let options = self.merge(&user_options)?;
        self.user_options = user_options;
        self.options = Some(Arc::new(options));

        if self.state != LayerState::Rendered {
            self.transition(LayerState::Configured);
            return Ok(());
        }
        self.components.detach_all(&mut self.view);
        self.view.clear();
        self.full_pass()
    }

    /// Swaps the data source, keeping every other option.
    pub fn change_data(&mut self, data: Vec<Record>) -> PlotResult<()> {
        if self.state == LayerState::Destroyed {
            return Err(PlotError::Lifecycle {
                operation: "change_data",
                state: self.state,
            });
        }
        let value = serde_json::to_value(&data)
            .map_err(|e| PlotError::InvalidData(format!("failed to encode data: {e}")))?;
        match self.user_options.value.as_object_mut() {
            Some(map) => {
                map.insert("data".to_owned(), value);
            }
            None => {
                let mut map = Map::new();
                map.insert("data".to_owned(), value);
                self.user_options.value = Value::Object(map);
            }
        }

        if self.state == LayerState::Rendered {
            self.components.detach_all(&mut self.view);
            self.view.change_data(&data);
        }
        if let Some(options) = self.options.as_mut() {
            Arc::make_mut(options).data = data;
        }
        if self.state == LayerState::Rendered {
            debug!(chart = self.kind.spec().tag, "data changed; re-rendering");
            self.view.render()?;
            self.attach_components()?;
        }
        Ok(())
    }

    /// Re-renders the view without re-running any stage.
    pub fn repaint(&mut self) -> PlotResult<()> {
        if self.state != LayerState::Rendered {
            return Err(PlotError::Lifecycle {
                operation: "repaint",
                state: self.state,
            });
        }
        self.view.render()
    }

    /// Attaches a caller-owned component to the rendered view. It is
    /// re-attached after every `update` and `change_data`.
    pub fn attach_component(&mut self, component: Box<dyn PlotComponent>) -> PlotResult<()> {
        if self.state != LayerState::Rendered {
            return Err(PlotError::Lifecycle {
                operation: "attach_component",
                state: self.state,
            });
        }
        let options = self.current_options()?;
        self.components
            .attach(component, ComponentOrigin::User, &mut self.view, &options)
    }

    /// Detaches and drops a component. Returns `true` when it was attached.
    pub fn remove_component(&mut self, id: &str) -> bool {
        self.components.remove(id, &mut self.view)
    }

    /// Tears down components, then the view. Safe to call more than once;
    /// before the first render the view is left untouched.
    pub fn destroy(&mut self) {
        match self.state {
            LayerState::Destroyed => {
                debug!(chart = self.kind.spec().tag, "destroy on destroyed layer ignored");
                return;
            }
            LayerState::Rendered => {
                self.components.destroy_all(&mut self.view);
                self.view.destroy();
            }
            LayerState::Constructed | LayerState::Configured => {}
        }
        self.geometries.clear();
        self.transition(LayerState::Destroyed);
    }

    fn merge(&self, user: &UserOptions) -> PlotResult<PlotOptions> {
        let spec = self.kind.spec();
        let merged = merge_options(&global_defaults(), &(spec.defaults)(), &user.value);
        serde_json::from_value(merged).map_err(|e| {
            PlotError::InvalidOptions(format!("{} options: {e}", spec.tag))
        })
    }

    fn current_options(&self) -> PlotResult<Arc<PlotOptions>> {
        self.options.clone().ok_or(PlotError::Lifecycle {
            operation: "read options",
            state: self.state,
        })
    }

    fn full_pass(&mut self) -> PlotResult<()> {
        let options = self.current_options()?;
        let input = StageInput {
            spec: self.kind.spec(),
            options: &options,
            callbacks: &self.user_options.callbacks,
            events: self.registry.resolve(self.kind),
        };
        self.geometries = run_stages(&mut self.view, &input)?;
        self.view.render()?;
        self.attach_components()
    }

    /// Re-attaches user components and rebuilds built-in ones. The view is
    /// rendered once more when any component added elements.
    fn attach_components(&mut self) -> PlotResult<()> {
        let options = self.current_options()?;
        self.components.reattach(&mut self.view, &options)?;
        for component in (self.kind.spec().component_hook)(&options) {
            if self.components.contains(component.id()) {
                warn!(
                    component = component.id(),
                    "component id already attached by caller; skipping built-in"
                );
                continue;
            }
            self.components
                .attach(component, ComponentOrigin::Builtin, &mut self.view, &options)?;
        }
        if !self.components.is_empty() {
            self.view.render()?;
        }
        Ok(())
    }

    fn transition(&mut self, next: LayerState) {
        if self.state != next {
            debug!(
                chart = self.kind.spec().tag,
                from = ?self.state,
                to = ?next,
                "plot layer state transition"
            );
            self.state = next;
        }
    }
}
