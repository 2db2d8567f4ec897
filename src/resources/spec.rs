use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{JobError, Result};

/// Named resource options, in the order the caller supplied them
///
/// Options this backend doesn't know about are kept as-is, so a spec written for another backend
/// can pass through without losing anything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ResourceSpec {
    options: Map<String, Value>,
}

impl ResourceSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a spec from an untyped JSON document, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(options) => Ok(Self { options }),
            other => Err(JobError::InvalidResource(format!(
                "resources must be a JSON object, got {other}"
            ))),
        }
    }

    /// Set an option, replacing any previous value
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl From<Map<String, Value>> for ResourceSpec {
    fn from(options: Map<String, Value>) -> Self {
        Self { options }
    }
}

/// Every option the shell backend recognises, with its default
fn defaults() -> [(&'static str, Value); 8] {
    [
        ("task_per_node", json!(1)),
        ("module_list", json!([])),
        ("module_unload_list", json!([])),
        ("source_list", json!([])),
        ("envs", json!({})),
        ("with_mpi", json!(false)),
        ("cuda_multi_tasks", json!(false)),
        ("allow_failure", json!(false)),
    ]
}

/// Fill in every recognised option the caller left out
///
/// Works on a copy: the caller's spec is never touched, and values the caller supplied are never
/// replaced, even when they are malformed (that is reported later, when the script is composed).
/// `None` is the same as an empty spec.
pub fn default_resources(partial: Option<&ResourceSpec>) -> ResourceSpec {
    let mut res = partial.cloned().unwrap_or_default();
    for (key, value) in defaults() {
        res.options.entry(key).or_insert(value);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_spec_gets_every_default() {
        let res = default_resources(None);
        assert_eq!(res.len(), 8);
        assert_eq!(res.get("task_per_node"), Some(&json!(1)));
        assert_eq!(res.get("module_list"), Some(&json!([])));
        assert_eq!(res.get("module_unload_list"), Some(&json!([])));
        assert_eq!(res.get("source_list"), Some(&json!([])));
        assert_eq!(res.get("envs"), Some(&json!({})));
        assert_eq!(res.get("with_mpi"), Some(&json!(false)));
        assert_eq!(res.get("cuda_multi_tasks"), Some(&json!(false)));
        assert_eq!(res.get("allow_failure"), Some(&json!(false)));
    }

    #[test]
    fn caller_values_win() {
        let partial = ResourceSpec::new()
            .with("task_per_node", 8)
            .with("with_mpi", true)
            .with("queue", "debug");
        let res = default_resources(Some(&partial));

        assert_eq!(res.get("task_per_node"), Some(&json!(8)));
        assert_eq!(res.get("with_mpi"), Some(&json!(true)));
        assert_eq!(res.get("queue"), Some(&json!("debug")));
        // the caller's copy is left alone
        assert_eq!(partial.len(), 3);
    }

    #[test]
    fn malformed_values_are_not_replaced() {
        let partial = ResourceSpec::new().with("task_per_node", "many");
        let res = default_resources(Some(&partial));
        assert_eq!(res.get("task_per_node"), Some(&json!("many")));
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(ResourceSpec::from_value(json!([1, 2])).is_err());
        let spec = ResourceSpec::from_value(json!({"with_mpi": true})).unwrap();
        assert!(spec.contains("with_mpi"));
    }
}
