use serde_json::{Map, Value};

/// Free-form JSON configuration (labels, print thresholds, preview options).
///
/// Values are addressed with dotted paths such as `labels.noPhotos` or
/// `render.lowResolutionThresholdPx`. Later layers override earlier ones key by key
/// (see [`MemoirConfig::merge`]).
#[derive(Debug, Clone, PartialEq)]
pub struct MemoirConfig(Value);

impl Default for MemoirConfig {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

/// `labels.noPhotos` -> `/labels/noPhotos`, escaped per RFC 6901.
fn pointer(dotted_path: &str) -> String {
    let mut out = String::with_capacity(dotted_path.len() + 1);
    for segment in dotted_path.split('.') {
        out.push('/');
        out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
    }
    out
}

impl MemoirConfig {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        self.0.pointer(&pointer(dotted_path))
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path).and_then(Value::as_str)
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path).and_then(Value::as_bool)
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path).and_then(Value::as_f64)
    }

    /// Sets a leaf, creating (or replacing non-object) intermediate tables on the way.
    pub fn set(&mut self, dotted_path: &str, value: Value) {
        let segments: Vec<&str> = dotted_path.split('.').collect();
        insert_at(&mut self.0, &segments, value);
    }

    /// Overlays `other` onto this config. Objects merge recursively; any other value
    /// replaces what was there.
    pub fn merge(&mut self, other: &MemoirConfig) {
        overlay(&mut self.0, &other.0);
    }
}

fn insert_at(slot: &mut Value, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(table) = slot {
        let child = table.entry(*head).or_insert(Value::Null);
        insert_at(child, rest, value);
    }
}

fn overlay(base: &mut Value, top: &Value) {
    if let (Value::Object(base), Value::Object(top)) = (&mut *base, top) {
        for (key, value) in top {
            match base.get_mut(key) {
                Some(existing) => overlay(existing, value),
                None => {
                    base.insert(key.clone(), value.clone());
                }
            }
        }
        return;
    }
    *base = top.clone();
}
