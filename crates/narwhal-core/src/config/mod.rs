use crate::{Error, Result};
use serde_json::{Map, Value, json};

/// JSON-object backed configuration shared by the parser, the layout engine and the router.
///
/// Values are addressed with dotted paths (`"layout.force.iterations"`). Overrides are applied
/// with [`StoryConfig::deep_merge`], so a partial object only replaces the keys it names.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryConfig(Value);

impl Default for StoryConfig {
    fn default() -> Self {
        Self(default_config_value())
    }
}

impl StoryConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a JSON document and merges it onto the defaults.
    pub fn from_json_overrides(text: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(text)?;
        if !overrides.is_object() {
            return Err(Error::InvalidConfig {
                message: "top-level config must be a JSON object".to_string(),
            });
        }
        let mut cfg = Self::default();
        cfg.deep_merge(&overrides);
        Ok(cfg)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.lookup(dotted_path)?
            .as_f64()
            .filter(|v| v.is_finite())
    }

    pub fn get_usize(&self, dotted_path: &str) -> Option<usize> {
        let v = self.lookup(dotted_path)?.as_u64()?;
        usize::try_from(v).ok()
    }

    pub fn get_str_list(&self, dotted_path: &str) -> Option<Vec<String>> {
        let arr = self.lookup(dotted_path)?.as_array()?;
        let out = arr
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect::<Vec<_>>();
        (!out.is_empty()).then_some(out)
    }

    pub fn f64_or(&self, dotted_path: &str, fallback: f64) -> f64 {
        self.get_f64(dotted_path).unwrap_or(fallback)
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    pub fn default_domain_title(&self) -> &str {
        self.get_str("story.defaultDomainTitle")
            .unwrap_or(DEFAULT_DOMAIN_TITLE)
    }

    /// Colour assigned to the domain at `index`, cycling through `palette.domains`.
    pub fn domain_color(&self, index: usize) -> String {
        let palette = self.get_str_list("palette.domains").unwrap_or_default();
        cycle_color(&palette, index, DOMAIN_COLORS)
    }
}

pub const DEFAULT_DOMAIN_TITLE: &str = "Domain Story";

pub const DOMAIN_COLORS: &[&str] = &[
    "#6366f1", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899",
];

pub const FLOW_COLORS: &[&str] = &[
    "#6366f1", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

/// Picks `palette[index % len]`, or cycles through `fallback` when `palette` is empty.
pub fn cycle_color<S: AsRef<str>>(palette: &[S], index: usize, fallback: &[&str]) -> String {
    match palette {
        [] => fallback[index % fallback.len()].to_string(),
        colors => colors[index % colors.len()].as_ref().to_string(),
    }
}

fn default_config_value() -> Value {
    json!({
        "canvas": { "width": 1600.0, "height": 1200.0 },
        "layout": {
            "padding": 150.0,
            "seedRadiusFactor": 0.6,
            "force": {
                "iterations": 80,
                "repulsion": 18000.0,
                "attraction": 0.04,
                "damping": 0.85
            }
        },
        "actor": {
            "defaultWidth": 90.0,
            "defaultHeight": 70.0,
            "edgeClearance": 6.0
        },
        "routing": { "fanSpacing": 50.0 },
        "viewport": {
            "logicalPadding": 100.0,
            "screenPadding": 40.0,
            "maxFitZoom": 1.5,
            "minZoom": 0.2,
            "maxZoom": 2.0
        },
        "palette": {
            "domains": DOMAIN_COLORS,
            "flows": FLOW_COLORS
        },
        "story": { "defaultDomainTitle": DEFAULT_DOMAIN_TITLE }
    })
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
