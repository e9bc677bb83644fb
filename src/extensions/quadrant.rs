use tracing::debug;

use crate::core::{AnnotationAnchor, AnnotationOptions, PlotOptions, QuadrantOptions, ShapeStyle};
use crate::error::PlotResult;
use crate::render::{AnnotationId, AnnotationSpec, EngineView};

use super::{ComponentKind, PlotComponent};

const QUADRANT_ID: &str = "quadrant";
const DEFAULT_LINE_STROKE: &str = "#BFBFBF";
const DEFAULT_REGION_FILLS: [&str; 4] = ["#F7F7F7", "#FFFFFF", "#FFFFFF", "#F7F7F7"];

/// Splits the plotting region at `(xBaseline, yBaseline)` into four
/// quadrants: two divider lines, four background regions and optional
/// per-quadrant labels.
#[derive(Debug, Clone)]
pub struct Quadrant {
    options: QuadrantOptions,
    annotations: Vec<AnnotationId>,
}

impl Quadrant {
    #[must_use]
    pub fn new(options: QuadrantOptions) -> Self {
        Self {
            options,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.annotations.is_empty()
    }

    fn line_style(&self) -> ShapeStyle {
        ShapeStyle::stroke(DEFAULT_LINE_STROKE)
            .with_line_width(1.0)
            .overlay(&self.options.line_style)
    }

    fn region_style(&self, index: usize) -> ShapeStyle {
        let base = ShapeStyle::fill(DEFAULT_REGION_FILLS[index]).with_opacity(0.4);
        match self.options.region_style.as_slice() {
            [] => base,
            styles => base.overlay(&styles[index % styles.len()]),
        }
    }

    /// Quadrant corners in order top-left, top-right, bottom-left, bottom-right.
    fn regions(&self) -> [([AnnotationAnchor; 2], [AnnotationAnchor; 2]); 4] {
        let x = self.options.x_baseline;
        let y = self.options.y_baseline;
        let min = || AnnotationAnchor::keyword("min");
        let max = || AnnotationAnchor::keyword("max");
        [
            ([min(), max()], [x.into(), y.into()]),
            ([x.into(), max()], [max(), y.into()]),
            ([min(), y.into()], [x.into(), min()]),
            ([x.into(), y.into()], [max(), min()]),
        ]
    }
}

impl PlotComponent for Quadrant {
    fn id(&self) -> &str {
        QUADRANT_ID
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Quadrant
    }

    fn attach(&mut self, view: &mut dyn EngineView, _options: &PlotOptions) -> PlotResult<()> {
        if self.is_attached() {
            return Ok(());
        }
        let x = self.options.x_baseline;
        let y = self.options.y_baseline;
        let mut annotations = Vec::new();

        for (index, (start, end)) in self.regions().into_iter().enumerate() {
            annotations.push(AnnotationOptions::Region {
                start,
                end,
                style: self.region_style(index),
            });
        }
        annotations.push(AnnotationOptions::Line {
            start: [x.into(), AnnotationAnchor::keyword("min")],
            end: [x.into(), AnnotationAnchor::keyword("max")],
            style: self.line_style(),
        });
        annotations.push(AnnotationOptions::Line {
            start: [AnnotationAnchor::keyword("min"), y.into()],
            end: [AnnotationAnchor::keyword("max"), y.into()],
            style: self.line_style(),
        });
        if let Some(label) = &self.options.label {
            for ((start, _), text) in self.regions().into_iter().zip(&label.text) {
                annotations.push(AnnotationOptions::Text {
                    position: start,
                    content: text.clone(),
                    style: label.style.clone(),
                });
            }
        }

        for annotation in annotations {
            let id = view.add_annotation(AnnotationSpec {
                annotation,
                owner: Some(QUADRANT_ID.to_owned()),
            });
            self.annotations.push(id);
        }
        debug!(
            annotations = self.annotations.len(),
            x_baseline = x,
            y_baseline = y,
            "quadrant attached"
        );
        Ok(())
    }

    fn detach(&mut self, view: &mut dyn EngineView) {
        for id in self.annotations.drain(..) {
            view.remove_annotation(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Quadrant;
    use crate::core::{PlotOptions, QuadrantLabelOptions, QuadrantOptions};
    use crate::extensions::PlotComponent;
    use crate::render::{Container, HeadlessView};

    #[test]
    fn attach_and_detach_leave_no_residue() {
        let mut view = HeadlessView::new(Container::new("c", 400, 300));
        let mut quadrant = Quadrant::new(QuadrantOptions {
            x_baseline: 5.0,
            y_baseline: 10.0,
            label: Some(QuadrantLabelOptions {
                text: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                ..QuadrantLabelOptions::default()
            }),
            ..QuadrantOptions::default()
        });

        quadrant
            .attach(&mut view, &PlotOptions::default())
            .expect("attach");
        assert_eq!(view.annotation_count(), 4 + 2 + 4);

        quadrant.detach(&mut view);
        assert_eq!(view.annotation_count(), 0);
        quadrant.detach(&mut view);
        assert_eq!(view.annotation_count(), 0);
    }
}
