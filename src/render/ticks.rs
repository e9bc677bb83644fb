use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::core::{DEFAULT_TICK_COUNT, FieldValue, LinearScale, ScaleDefinition, ScaleKind};

/// Infers the scale family of a field from its non-null values.
///
/// All numeric (or range) values give a linear scale, all times a time
/// scale; anything mixed or textual is categorical. A field with no values
/// is categorical with an empty domain.
#[must_use]
pub fn infer_scale_kind<'a>(values: impl IntoIterator<Item = &'a FieldValue>) -> ScaleKind {
    let mut seen_number = false;
    let mut seen_time = false;
    for value in values {
        match value {
            FieldValue::Null => {}
            FieldValue::Number(_) | FieldValue::Range(..) => seen_number = true,
            FieldValue::Time(_) => seen_time = true,
            FieldValue::Bool(_) | FieldValue::Text(_) => return ScaleKind::Category,
        }
    }
    match (seen_number, seen_time) {
        (true, false) => ScaleKind::Linear,
        (false, true) => ScaleKind::Time,
        _ => ScaleKind::Category,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DistinctKey {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl DistinctKey {
    fn of(value: &FieldValue) -> Self {
        match value {
            FieldValue::Number(number) => Self::Number(OrderedFloat(*number)),
            other => Self::Text(other.to_label()),
        }
    }
}

/// Distinct non-null values in first-seen order.
#[must_use]
pub(crate) fn distinct_values<'a>(
    values: impl IntoIterator<Item = &'a FieldValue>,
) -> Vec<FieldValue> {
    let mut seen = IndexSet::new();
    let mut distinct = Vec::new();
    for value in values {
        if value.is_null() {
            continue;
        }
        if seen.insert(DistinctKey::of(value)) {
            distinct.push(value.clone());
        }
    }
    distinct
}

/// Position of `value` among the distinct values of a categorical domain.
pub(crate) fn category_index(domain: &[FieldValue], value: &FieldValue) -> Option<usize> {
    let key = DistinctKey::of(value);
    domain.iter().position(|candidate| DistinctKey::of(candidate) == key)
}

/// Tick values of one scale over the given data values.
///
/// Categorical domains ignore `tick_count`. Linear domains honour
/// `min`/`max` overrides; `nice` rounds the domain outward to a 1/2/5 step,
/// otherwise ticks are spread evenly over the verbatim bounds. Time domains
/// are thinned to `tick_count` values.
#[must_use]
pub fn resolve_ticks(definition: &ScaleDefinition, values: &[FieldValue]) -> Vec<FieldValue> {
    let kind = definition
        .kind
        .unwrap_or_else(|| infer_scale_kind(values.iter()));
    match kind {
        ScaleKind::Category => distinct_values(values.iter()),
        ScaleKind::Linear => linear_ticks(definition, values)
            .into_iter()
            .map(FieldValue::Number)
            .collect(),
        ScaleKind::Time => time_ticks(definition, values),
    }
}

fn linear_ticks(definition: &ScaleDefinition, values: &[FieldValue]) -> Vec<f64> {
    let extent = values
        .iter()
        .filter_map(FieldValue::numeric_extent)
        .fold(None, |acc: Option<(f64, f64)>, (low, high)| match acc {
            Some((min, max)) => Some((min.min(low), max.max(high))),
            None => Some((low, high)),
        });

    let (mut start, mut end) = match (extent, definition.min, definition.max) {
        (_, Some(min), Some(max)) => (min, max),
        (Some((low, high)), min, max) => (min.unwrap_or(low), max.unwrap_or(high)),
        (None, Some(bound), None) | (None, None, Some(bound)) => (bound, bound),
        (None, None, None) => return Vec::new(),
    };
    if end < start {
        end = start;
    }

    let Ok(mut scale) = LinearScale::new(start, end) else {
        return Vec::new();
    };
    let tick_count = definition.tick_count.unwrap_or(DEFAULT_TICK_COUNT);

    if definition.nice {
        let niced = scale.nice(tick_count).domain();
        start = definition.min.unwrap_or(niced.0);
        end = definition.max.unwrap_or(niced.1).max(start);
        if let Ok(pinned) = LinearScale::new(start, end) {
            scale = pinned;
        }
        return match definition.tick_interval {
            Some(interval) => scale.ticks_with_interval(interval),
            None => scale.nice_ticks(tick_count),
        };
    }

    match definition.tick_interval {
        Some(interval) => scale.ticks_with_interval(interval),
        None => scale.even_ticks(tick_count),
    }
}

fn time_ticks(definition: &ScaleDefinition, values: &[FieldValue]) -> Vec<FieldValue> {
    let mut times: Vec<_> = values.iter().filter_map(FieldValue::as_time).collect();
    times.sort_unstable();
    times.dedup();

    let Some(limit) = definition.tick_count else {
        return times.into_iter().map(FieldValue::Time).collect();
    };
    if times.len() <= limit || limit < 2 {
        return times
            .into_iter()
            .take(limit.max(1))
            .map(FieldValue::Time)
            .collect();
    }

    let last = times.len() - 1;
    (0..limit)
        .map(|index| {
            let position = ((index * last) as f64 / (limit - 1) as f64).round() as usize;
            FieldValue::Time(times[position])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{infer_scale_kind, resolve_ticks};
    use crate::core::{FieldValue, MAX_TICKS, ScaleDefinition, ScaleKind};

    fn numbers(values: &[f64]) -> Vec<FieldValue> {
        values.iter().copied().map(FieldValue::Number).collect()
    }

    #[test]
    fn mixed_values_infer_category() {
        let values = vec![FieldValue::Number(1.0), FieldValue::from("a")];
        assert_eq!(infer_scale_kind(values.iter()), ScaleKind::Category);
        assert_eq!(infer_scale_kind(numbers(&[1.0]).iter()), ScaleKind::Linear);
    }

    #[test]
    fn category_ticks_ignore_tick_count() {
        let mut definition = ScaleDefinition::new("year");
        definition.tick_count = Some(2);
        let values: Vec<FieldValue> = ["1991", "1992", "1993", "1992"]
            .into_iter()
            .map(FieldValue::from)
            .collect();
        assert_eq!(resolve_ticks(&definition, &values).len(), 3);
    }

    #[test]
    fn nice_false_uses_verbatim_min() {
        let mut definition = ScaleDefinition::new("value");
        definition.min = Some(5.0);
        definition.nice = false;
        definition.tick_count = Some(5);
        let ticks = resolve_ticks(&definition, &numbers(&[31.0, 55.0, 15.0]));
        assert_eq!(ticks, numbers(&[5.0, 17.5, 30.0, 42.5, 55.0]));
    }

    #[test]
    fn tick_interval_steps_from_first_multiple() {
        let mut definition = ScaleDefinition::new("value");
        definition.nice = false;
        definition.tick_interval = Some(20.0);
        let ticks = resolve_ticks(&definition, &numbers(&[15.0, 31.0, 95.0]));
        assert_eq!(ticks, numbers(&[20.0, 40.0, 60.0, 80.0]));

        definition.nice = true;
        let ticks = resolve_ticks(&definition, &numbers(&[15.0, 31.0, 95.0]));
        assert_eq!(ticks, numbers(&[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]));
    }

    #[test]
    fn degenerate_tick_interval_falls_back_to_nice_ticks() {
        let values = numbers(&[0.0, 100.0]);
        let mut definition = ScaleDefinition::new("value");
        let expected = resolve_ticks(&definition, &values);
        assert_eq!(expected, numbers(&[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]));

        for interval in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            definition.tick_interval = Some(interval);
            assert_eq!(resolve_ticks(&definition, &values), expected);
        }
    }

    #[test]
    fn tiny_interval_on_wide_domain_is_capped() {
        let mut definition = ScaleDefinition::new("value");
        definition.tick_interval = Some(1e-13);
        let ticks = resolve_ticks(&definition, &numbers(&[0.0, 1e6]));
        assert_eq!(
            ticks,
            numbers(&[0.0, 200_000.0, 400_000.0, 600_000.0, 800_000.0, 1_000_000.0])
        );
    }

    #[test]
    fn huge_tick_count_is_clamped() {
        let mut definition = ScaleDefinition::new("value");
        definition.nice = false;
        definition.tick_count = Some(usize::MAX);
        let ticks = resolve_ticks(&definition, &numbers(&[0.0, 1.0]));
        assert_eq!(ticks.len(), MAX_TICKS);
        assert_eq!(ticks.first(), Some(&FieldValue::Number(0.0)));
        assert_eq!(ticks.last(), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn empty_field_yields_degenerate_scale() {
        let definition = ScaleDefinition::new("missing");
        assert!(resolve_ticks(&definition, &[]).is_empty());
    }
}
