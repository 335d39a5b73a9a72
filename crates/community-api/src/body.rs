use serde_json::Value;

use crate::error::ApiError;
use crate::validate::Fields;

/// Parse a create request body into a field map.
///
/// An empty body counts as `{}`. Anything that is not a JSON object is
/// rejected, so validators only ever see a mapping.
pub fn parse_fields(raw: &[u8]) -> Result<Fields, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::new());
    }

    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => Err(ApiError::BadRequest("Invalid JSON body".into())),
    }
}
