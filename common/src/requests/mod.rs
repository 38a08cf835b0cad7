use serde::{Deserialize, Serialize};

use crate::model::schema::FormValues;

/// Payload posted by the client when a form is submitted as JSON.
///
/// `action` is the name of the clicked form action (`action_save`,
/// `action_publish`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub values: FormValues,
    pub action: String,
}
