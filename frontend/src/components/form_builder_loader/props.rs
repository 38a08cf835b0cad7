//! Properties of the `FormBuilderLoader` component.

use admin_common::form::LoaderProps;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FormBuilderLoaderProps {
    /// Prefix of the form identifier; the schema name is appended once known.
    pub identifier: String,

    /// URL the schema is fetched from.
    pub schema_url: String,

    /// Fetch again when mounted even if the schema is already in the store.
    #[prop_or_default]
    pub refetch_schema_on_mount: bool,

    /// Registry context: renderers registered as `Name.<context>` win over
    /// the base registrations.
    #[prop_or_default]
    pub context: Option<String>,
}

impl FormBuilderLoaderProps {
    pub fn loader_props(&self) -> LoaderProps {
        LoaderProps {
            identifier: self.identifier.clone(),
            schema_url: self.schema_url.clone(),
            refetch_schema_on_mount: self.refetch_schema_on_mount,
        }
    }
}
