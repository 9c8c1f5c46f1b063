use crate::domain::model::LookupResult;

/// Four labelled lines and a blank separator; used for both console and results file.
pub fn render_result(result: &LookupResult) -> String {
    format!(
        "Phone Number: {}\nTime Zones: {}\nCarrier: {}\nRegion: {}\n\n",
        result.international(),
        result.time_zones.join(", "),
        result.carrier,
        result.region
    )
}
