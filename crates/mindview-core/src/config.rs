use crate::ingest::IngestOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance between neighbouring slots of a layer.
    pub x_spacing: f64,
    /// Vertical distance between layers.
    pub y_spacing: f64,
    /// Node box size, used for diagram bounds and pointer hit testing.
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_spacing: 220.0,
            y_spacing: 120.0,
            node_width: 180.0,
            node_height: 48.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    pub layout: LayoutConfig,
    /// Reject documents with duplicate node ids instead of keeping the first occurrence.
    pub strict: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            strict: true,
        }
    }
}

impl ViewerConfig {
    /// Builds a config from a (possibly partial) JSON object merged onto the defaults.
    pub fn from_value(overrides: &Value) -> Result<Self> {
        Self::default().with_overrides(overrides)
    }

    pub fn with_overrides(&self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        deep_merge_value(&mut base, overrides);
        let config: Self = serde_json::from_value(base)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets a single value addressed by a dotted camelCase path, e.g. `layout.xSpacing`.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) -> Result<()> {
        let mut overrides = Value::Object(Map::new());
        set_dotted(&mut overrides, dotted_path, value);
        *self = self.with_overrides(&overrides)?;
        Ok(())
    }

    pub fn ingest_options(&self) -> IngestOptions {
        if self.strict {
            IngestOptions::strict()
        } else {
            IngestOptions::lenient()
        }
    }

    fn validate(&self) -> Result<()> {
        let l = &self.layout;
        for (name, v) in [
            ("layout.xSpacing", l.x_spacing),
            ("layout.ySpacing", l.y_spacing),
            ("layout.nodeWidth", l.node_width),
            ("layout.nodeHeight", l.node_height),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be a finite, non-negative number (got {v})"),
                });
            }
        }
        Ok(())
    }
}

fn set_dotted(root: &mut Value, dotted_path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let Value::Object(root) = root else {
        return;
    };
    let mut cur: &mut Map<String, Value> = root;
    let mut segments = dotted_path.split('.').peekable();
    while let Some(seg) = segments.next() {
        if segments.peek().is_none() {
            cur.insert(seg.to_string(), value);
            return;
        }
        let slot = cur
            .entry(seg)
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Some(next) = slot.as_object_mut() else {
            return;
        };
        cur = next;
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = ViewerConfig::from_value(&json!({"layout": {"xSpacing": 300}})).unwrap();
        assert_eq!(config.layout.x_spacing, 300.0);
        assert_eq!(config.layout.y_spacing, 120.0);
        assert!(config.strict);
    }

    #[test]
    fn dotted_paths_set_nested_values() {
        let mut config = ViewerConfig::default();
        config.set_value("layout.ySpacing", json!(80)).unwrap();
        config.set_value("strict", json!(false)).unwrap();
        assert_eq!(config.layout.y_spacing, 80.0);
        assert_eq!(config.ingest_options(), IngestOptions::lenient());
    }

    #[test]
    fn negative_spacing_is_rejected() {
        let err = ViewerConfig::from_value(&json!({"layout": {"xSpacing": -1}})).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn wrong_types_are_json_errors() {
        let err = ViewerConfig::from_value(&json!({"layout": {"xSpacing": "wide"}})).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
