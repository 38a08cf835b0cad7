use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration the admin server hands to the client on boot.
///
/// Served by `GET /admin/client-config`; the client reads the section entries
/// to find which schema URL each form loader should fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// `major.minor` of the framework, or the raw version for non-release builds.
    pub version: String,
    #[serde(default)]
    pub help_links: Vec<HelpLink>,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLink {
    pub title: String,
    pub url: String,
}

/// One admin section (e.g. `pages`) and the form it edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub url: String,
    pub form_schema_url: String,
}
