//! Per-chart-type dataset style tables.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::util::is_unset;

/// Visual attribute name to a cyclic list of values, assigned to datasets
/// by index modulo list length.
pub type StyleTable = FxHashMap<Arc<str>, Vec<Value>>;

/// The built-in palette, keyed by chart type. Site configuration may extend
/// or replace it wholesale.
pub fn builtin_styles() -> FxHashMap<Arc<str>, StyleTable> {
    BUILTIN.clone()
}

static BUILTIN: Lazy<FxHashMap<Arc<str>, StyleTable>> = Lazy::new(|| {
    const FILL: &[&str] = &[
        "rgba(31, 119, 180, 0.5)",
        "rgba(255, 127, 14, 0.5)",
        "rgba(44, 160, 44, 0.5)",
        "rgba(214, 39, 40, 0.5)",
        "rgba(148, 103, 189, 0.5)",
    ];

    const STROKE: &[&str] = &[
        "rgb(31, 119, 180)",
        "rgb(255, 127, 14)",
        "rgb(44, 160, 44)",
        "rgb(214, 39, 40)",
        "rgb(148, 103, 189)",
    ];

    let values = |list: &[&str]| list.iter().copied().map(Value::from).collect::<Vec<_>>();

    let mut bar = StyleTable::default();
    bar.insert("backgroundColor".into(), values(FILL));
    bar.insert("borderColor".into(), values(STROKE));
    bar.insert("borderWidth".into(), vec![Value::from(1)]);

    let mut line = StyleTable::default();
    line.insert("borderColor".into(), values(STROKE));
    line.insert("backgroundColor".into(), values(FILL));
    line.insert("fill".into(), vec![Value::from(false)]);

    let mut pie = StyleTable::default();
    pie.insert("backgroundColor".into(), vec![Value::from(values(FILL))]);
    pie.insert("borderColor".into(), vec![Value::from("white")]);

    let mut styles = FxHashMap::default();
    styles.insert(Arc::from("bar"), bar);
    styles.insert(Arc::from("line"), line);
    styles.insert(Arc::from("pie"), pie);
    styles
});

/// Assigns every attribute in `table` that a dataset does not already set,
/// cycling through the attribute's value list by dataset index.
pub fn apply(table: &StyleTable, datasets: &mut [Value]) {
    for (index, dataset) in datasets.iter_mut().enumerate() {
        let Some(dataset) = dataset.as_object_mut() else { continue };
        for (attr, values) in table {
            if values.is_empty() || !is_unset(dataset.get(&**attr)) {
                continue;
            }

            dataset.insert(attr.to_string(), values[index % values.len()].clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    fn table(attr: &str, values: &[&str]) -> StyleTable {
        let mut table = StyleTable::default();
        table.insert(attr.into(), values.iter().copied().map(Value::from).collect());
        table
    }

    #[test]
    fn values_cycle_by_dataset_index() {
        let mut datasets = vec![json!({}), json!({}), json!({})];
        apply(&table("backgroundColor", &["red", "blue"]), &mut datasets);

        assert_eq!(datasets[0]["backgroundColor"], json!("red"));
        assert_eq!(datasets[1]["backgroundColor"], json!("blue"));
        assert_eq!(datasets[2]["backgroundColor"], json!("red"));
    }

    #[test]
    fn explicit_attributes_are_kept() {
        let mut datasets = vec![json!({ "backgroundColor": "gold" }), json!({})];
        apply(&table("backgroundColor", &["red", "blue"]), &mut datasets);

        assert_eq!(datasets[0]["backgroundColor"], json!("gold"));
        assert_eq!(datasets[1]["backgroundColor"], json!("blue"));
    }

    #[test]
    fn null_counts_as_unset() {
        let mut datasets = vec![json!({ "backgroundColor": null })];
        apply(&table("backgroundColor", &["red"]), &mut datasets);
        assert_eq!(datasets[0]["backgroundColor"], json!("red"));
    }

    #[test]
    fn builtin_palette_covers_common_types() {
        let styles = builtin_styles();
        for kind in ["bar", "line", "pie"] {
            assert!(styles.contains_key(kind), "missing builtin style for {kind}");
        }
    }
}
