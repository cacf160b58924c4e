use emokarta_shared::{MapPayload, RegionDetail, SourceCollection};

const GEOMETRY_URL: &str = "/urss.geojson";

fn map_data_url(year: i32) -> String {
    format!("/api/map/{year}")
}

/// Fetch per-region statistics for one year.
pub async fn fetch_map_data(year: i32) -> Result<MapPayload, String> {
    let resp = gloo_net::http::Request::get(&map_data_url(year))
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<MapPayload>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Fetch the region geometry file. Any failure here is not an error for the
/// caller's purposes — it just means "geometry unavailable" and the fusion
/// engine synthesizes placeholders instead.
pub async fn fetch_geometry() -> Result<SourceCollection, String> {
    let resp = gloo_net::http::Request::get(GEOMETRY_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<SourceCollection>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

/// Fetch diary entries and population stats for one (year, region) pair.
/// Region names are user-visible Cyrillic strings and must be URI-encoded.
pub async fn fetch_region_detail(year: i32, name: &str) -> Result<RegionDetail, String> {
    let encoded: String = js_sys::encode_uri_component(name).into();
    let url = format!("/api/region/{year}/{encoded}");
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<RegionDetail>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}
