use anyhow::{Result, anyhow};
use jsonschema::error::ValidationError;
use serde_json::Value;

use crate::interfaces::queries::QueryRequest;

/// Validates an outgoing query request against the bundled JSON schema.
/// Called from the builder in debug builds; strongly-typed construction
/// makes failures unlikely, but a schema drift should be loud.
pub fn validate(request: &QueryRequest) -> Result<()> {
    let schema = precompiled()?;
    let validator = jsonschema::options().build(&schema)?;
    let instance = serde_json::to_value(request)?;

    // check for validation errors
    let errors: Vec<ValidationError> = validator.iter_errors(&instance).collect();
    if !errors.is_empty() {
        let mut error = String::new();
        for e in errors {
            error.push_str(&format!("\n - {e} at {}", e.instance_path));
        }
        return Err(anyhow!("validation failed for query request: {error}"));
    }

    Ok(())
}

/// Precompiled JSON schema for the query request body.
fn precompiled() -> Result<Value> {
    let schema = include_bytes!("../schemas/query-request.json");
    Ok(serde_json::from_slice(schema)?)
}

#[cfg(test)]
mod test {
    use chrono::DateTime;

    use super::*;
    use crate::QueryKind;
    use crate::catalog::DeviceCategory;
    use crate::interfaces::queries::SerializedFilter;

    #[test]
    fn built_request_passes_schema() {
        let request = QueryRequest {
            query_kind: QueryKind::Count,
            target_field: None,
            filters: vec![SerializedFilter::category(DeviceCategory::Wearable)],
            start_time: DateTime::UNIX_EPOCH,
            end_time: DateTime::UNIX_EPOCH,
        };
        validate(&request).expect("should pass schema");
    }
}
