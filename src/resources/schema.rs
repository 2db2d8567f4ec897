use jsonschema::JSONSchema;
use log::{info, warn};
use serde_json::Value;

use crate::error::{JobError, Result};

/// included resource document schema
static SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/schema/resources.json"));

/// Check a resource document read from disk before it becomes a [crate::resources::ResourceSpec]
///
/// All schema violations are joined into one [JobError::InvalidResource] message.
pub fn validate_resource_file(document: &Value) -> Result<()> {
    info!("Validating resource document against JSON schema");
    let schema: Value = serde_json::from_str(SCHEMA)
        .map_err(|err| JobError::InvalidResource(format!("bundled schema is not JSON: {err}")))?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| JobError::InvalidResource(format!("bundled schema doesn't compile: {err}")))?;

    let messages: Vec<String> = match compiled.validate(document) {
        Ok(_) => Vec::new(),
        Err(errors) => errors
            .map(|err| err.to_string())
            .collect(),
    };

    if messages.is_empty() {
        Ok(())
    } else {
        warn!("Resource document fails validation");
        Err(JobError::InvalidResource(messages.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_a_complete_document() {
        let doc = json!({
            "task_per_node": 4,
            "module_list": ["gcc/12", "openmpi"],
            "envs": {"OMP_NUM_THREADS": 1},
            "with_mpi": true,
            "partition": "ignored by the shell backend"
        });
        assert!(validate_resource_file(&doc).is_ok());
    }

    #[test]
    fn rejects_wrong_types() {
        let doc = json!({"task_per_node": "four", "source_list": [1]});
        let err = validate_resource_file(&doc).unwrap_err();
        assert!(matches!(err, JobError::InvalidResource(_)));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(validate_resource_file(&json!(["gcc"])).is_err());
    }
}
