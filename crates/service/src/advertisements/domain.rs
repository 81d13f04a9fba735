use serde::Deserialize;

/// Caller-supplied advertisement fields. Absent fields are `None`; `image`
/// carries an already hosted URL when no file accompanies the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Validated fields for a new row.
#[derive(Debug, Clone)]
pub struct NewAdvertisement {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Fields to overwrite; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct AdvertisementPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}
