use crate::models::BatchResult;

/// Encodes a batch as the output JSON payload.
///
/// Field order is fixed by the struct definitions and no map types are
/// serialized, so the same batch always produces the same bytes.
pub fn serialize(batch: &BatchResult) -> Result<Vec<u8>, serde_json::Error> {
    let mut payload = serde_json::to_vec_pretty(batch)?;
    payload.push(b'\n');
    Ok(payload)
}
