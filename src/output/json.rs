//! JSON export of crawl results
//!
//! The result is a JSON array of `{"url": ..., "assets": [...]}` objects in
//! visit order.

use crate::crawler::VisitRecord;
use crate::CrawlerError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serializes visit records to a JSON string
///
/// # Arguments
///
/// * `records` - Visit records in visit order
/// * `pretty` - Indent the output
pub fn to_json(records: &[VisitRecord], pretty: bool) -> Result<String, CrawlerError> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    Ok(json)
}

/// Writes visit records as JSON to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the results
/// * `Err(CrawlerError)` - Failed to serialize or write
pub fn save_results(
    output_path: &Path,
    records: &[VisitRecord],
    pretty: bool,
) -> Result<(), CrawlerError> {
    let json = to_json(records, pretty)?;

    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    tracing::debug!(
        "Wrote {} records to {}",
        records.len(),
        output_path.display()
    );
    Ok(())
}
