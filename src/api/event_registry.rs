use indexmap::IndexMap;

use super::chart_kind::ChartKind;

/// Static table from semantic event names (`onBarClick`) to engine event
/// names (`interval:click`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventMapping {
    entries: IndexMap<String, String>,
}

impl EventMapping {
    #[must_use]
    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        Self::default().extend(entries)
    }

    /// Starts from another chart type's mapping instead of duplicating it.
    #[must_use]
    pub fn inherit(parent: &EventMapping) -> Self {
        parent.clone()
    }

    /// Adds or overrides entries.
    #[must_use]
    pub fn extend(mut self, entries: &[(&str, &str)]) -> Self {
        for (semantic, engine) in entries {
            self.entries
                .insert((*semantic).to_owned(), (*engine).to_owned());
        }
        self
    }

    #[must_use]
    pub fn engine_event(&self, semantic: &str) -> Option<&str> {
        self.entries.get(semantic).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(semantic, engine)| (semantic.as_str(), engine.as_str()))
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

/// Per-chart-type event mappings, resolved during the event-parsing stage.
#[derive(Debug, Clone, Default)]
pub struct EventParserRegistry {
    mappings: IndexMap<ChartKind, EventMapping>,
}

impl EventParserRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with every built-in chart type's mapping.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in ChartKind::ALL {
            registry.register(kind, (kind.spec().event_mapping)());
        }
        registry
    }

    /// Registers (or replaces) the mapping of a chart type. Returns the
    /// previous mapping, if any.
    pub fn register(&mut self, kind: ChartKind, mapping: EventMapping) -> Option<EventMapping> {
        self.mappings.insert(kind, mapping)
    }

    #[must_use]
    pub fn resolve(&self, kind: ChartKind) -> Option<&EventMapping> {
        self.mappings.get(&kind)
    }
}

/// Events every plot understands, independent of its geometry.
#[must_use]
pub fn base_event_mapping() -> EventMapping {
    EventMapping::from_entries(&[
        ("onPlotClick", "plotclick"),
        ("onPlotDblClick", "plotdblclick"),
        ("onPlotMousemove", "plotmousemove"),
        ("onPlotMouseenter", "plotenter"),
        ("onPlotMouseleave", "plotleave"),
        ("onPlotContextmenu", "plotcontextmenu"),
        ("onTitleClick", "title:click"),
        ("onDescriptionClick", "description:click"),
        ("onAxisClick", "axis-label:click"),
        ("onAxisTitleClick", "axis-title:click"),
        ("onLegendClick", "legend-item:click"),
        ("onLegendMouseenter", "legend-item:mouseenter"),
        ("onTooltipChange", "tooltip:change"),
    ])
}

#[must_use]
pub fn bar_event_mapping() -> EventMapping {
    EventMapping::inherit(&base_event_mapping()).extend(&[
        ("onBarClick", "interval:click"),
        ("onBarDblClick", "interval:dblclick"),
        ("onBarMousemove", "interval:mousemove"),
        ("onBarContextmenu", "interval:contextmenu"),
    ])
}

#[must_use]
pub fn column_event_mapping() -> EventMapping {
    EventMapping::inherit(&base_event_mapping()).extend(&[
        ("onColumnClick", "interval:click"),
        ("onColumnDblClick", "interval:dblclick"),
        ("onColumnMousemove", "interval:mousemove"),
        ("onColumnContextmenu", "interval:contextmenu"),
    ])
}

#[must_use]
pub fn bubble_event_mapping() -> EventMapping {
    EventMapping::inherit(&base_event_mapping()).extend(&[
        ("onPointClick", "point:click"),
        ("onPointDblClick", "point:dblclick"),
        ("onPointMousemove", "point:mousemove"),
        ("onPointContextmenu", "point:contextmenu"),
    ])
}

/// Scatter reuses the bubble mapping and adds its overlay components.
#[must_use]
pub fn scatter_event_mapping() -> EventMapping {
    EventMapping::inherit(&bubble_event_mapping()).extend(&[
        ("onQuadrantClick", "quadrant:click"),
        ("onTrendlineClick", "trendline:click"),
    ])
}

/// Line charts add their own geometry events on top of point markers.
#[must_use]
pub fn line_event_mapping() -> EventMapping {
    EventMapping::inherit(&bubble_event_mapping()).extend(&[
        ("onLineClick", "line:click"),
        ("onLineDblClick", "line:dblclick"),
        ("onLineMousemove", "line:mousemove"),
        ("onLineContextmenu", "line:contextmenu"),
    ])
}
