pub const RAW_PREFIX: &str = "raw-data/";
pub const PROCESSED_PREFIX: &str = "processed-data/";

const INPUT_EXTENSION: &str = ".csv";
const OUTPUT_EXTENSION: &str = ".json";

/// Maps an input key to the key its processed output is written to.
///
/// `raw-data/year=2024/month=07/day=26/transactions-20240726.csv` becomes
/// `processed-data/year=2024/month=07/day=26/transactions-20240726.json`.
/// Keys outside `raw-data/` have no output and return `None`.
pub fn processed_key(raw_key: &str) -> Option<String> {
    let partition = raw_key.strip_prefix(RAW_PREFIX)?;

    if partition.is_empty() || partition.ends_with('/') {
        return None;
    }

    let stem = match partition.len().checked_sub(INPUT_EXTENSION.len()) {
        Some(split) if partition.is_char_boundary(split) && partition[split..].eq_ignore_ascii_case(INPUT_EXTENSION) => &partition[..split],
        _ => partition
    };

    Some(format!("{PROCESSED_PREFIX}{stem}{OUTPUT_EXTENSION}"))
}
