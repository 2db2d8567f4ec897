use serde_json::Value;

use crate::error::{JobError, Result};
use crate::resources::spec::{default_resources, ResourceSpec};

/// A complete, typed resource configuration
///
/// `envs` keeps the caller's insertion order: later exports may refer to earlier ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    pub task_per_node: u64,
    pub module_list: Vec<String>,
    pub module_unload_list: Vec<String>,
    pub source_list: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub with_mpi: bool,
    /// Accepted for compatibility, no effect on a shell script
    pub cuda_multi_tasks: bool,
    /// Enforced by the orchestration layer, not here
    pub allow_failure: bool,
}

impl Resources {
    /// Fill in defaults, then read every recognised option into its typed form
    pub fn resolve(partial: Option<&ResourceSpec>) -> Result<Resources> {
        let spec = default_resources(partial);
        Resources::try_from(&spec)
    }
}

impl Default for Resources {
    fn default() -> Self {
        Resources {
            task_per_node: 1,
            module_list: Vec::new(),
            module_unload_list: Vec::new(),
            source_list: Vec::new(),
            envs: Vec::new(),
            with_mpi: false,
            cuda_multi_tasks: false,
            allow_failure: false,
        }
    }
}

impl TryFrom<&ResourceSpec> for Resources {
    type Error = JobError;

    /// Expects a filled-in spec; a missing option is reported like a malformed one
    fn try_from(spec: &ResourceSpec) -> Result<Self> {
        Ok(Resources {
            task_per_node: task_per_node(spec)?,
            module_list: string_list(spec, "module_list")?,
            module_unload_list: string_list(spec, "module_unload_list")?,
            source_list: string_list(spec, "source_list")?,
            envs: envs(spec)?,
            with_mpi: flag(spec, "with_mpi")?,
            cuda_multi_tasks: flag(spec, "cuda_multi_tasks")?,
            allow_failure: flag(spec, "allow_failure")?,
        })
    }
}

fn required<'a>(spec: &'a ResourceSpec, key: &str) -> Result<&'a Value> {
    spec.get(key)
        .ok_or_else(|| JobError::InvalidResource(format!("{key} is missing")))
}

fn task_per_node(spec: &ResourceSpec) -> Result<u64> {
    let value = required(spec, "task_per_node")?;
    match value.as_u64() {
        Some(n) if n > 0 => Ok(n),
        _ => Err(JobError::InvalidResource(format!(
            "task_per_node must be a positive integer, got {value}"
        ))),
    }
}

fn string_list(spec: &ResourceSpec, key: &str) -> Result<Vec<String>> {
    let value = required(spec, key)?;
    let items = value.as_array().ok_or_else(|| {
        JobError::InvalidResource(format!("{key} must be a list of strings, got {value}"))
    })?;

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(JobError::InvalidResource(format!(
                "{key} entries must be strings, got {other}"
            ))),
        })
        .collect()
}

fn envs(spec: &ResourceSpec) -> Result<Vec<(String, String)>> {
    let value = required(spec, "envs")?;
    let map = value.as_object().ok_or_else(|| {
        JobError::InvalidResource(format!("envs must be a mapping, got {value}"))
    })?;

    map.iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(JobError::InvalidResource(format!(
                        "envs.{name} must be a string, number or boolean, got {other}"
                    )))
                }
            };
            Ok((name.clone(), rendered))
        })
        .collect()
}

fn flag(spec: &ResourceSpec, key: &str) -> Result<bool> {
    let value = required(spec, key)?;
    value.as_bool().ok_or_else(|| {
        JobError::InvalidResource(format!("{key} must be true or false, got {value}"))
    })
}
