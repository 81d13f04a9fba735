use serde::Deserialize;

/// Contact-form payload; every field is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub subject: Option<String>,
    pub address: Option<String>,
    pub message: Option<String>,
}

/// Validated submission keyed by `(name, email)`.
#[derive(Debug, Clone)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub subject: String,
    pub address: String,
    pub message: String,
}
