use serde::Deserialize;

/// Visit report sent by the public site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitInput {
    pub ip_address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewVisit {
    pub ip_address: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub visit_time: chrono::DateTime<chrono::Utc>,
}
