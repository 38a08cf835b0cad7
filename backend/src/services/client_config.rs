//! `GET /admin/client-config`: boot configuration for the admin client.

use crate::config::AdminConfig;
use crate::services::pages;
use crate::services::responses::json_ok;
use actix_web::{web, HttpResponse};
use admin_common::model::config::{ClientConfig, HelpLink, SectionConfig};
use regex::Regex;
use std::collections::BTreeMap;

pub async fn process(config: web::Data<AdminConfig>) -> HttpResponse {
    json_ok(&client_config(&config))
}

pub fn client_config(config: &AdminConfig) -> ClientConfig {
    let mut sections = BTreeMap::new();
    sections.insert(
        "pages".to_string(),
        SectionConfig {
            url: pages::SECTION_URL.to_string(),
            form_schema_url: pages::SCHEMA_URL.to_string(),
        },
    );
    ClientConfig {
        version: cms_version_number(&config.framework_version),
        help_links: help_links(config),
        sections,
    }
}

/// `major.minor` of a release version (`4.9.1` and `4.9.x-dev` give `4.9`);
/// anything else is returned as is.
pub fn cms_version_number(framework_version: &str) -> String {
    Regex::new(r"^(\d+\.\d+)\.")
        .ok()
        .and_then(|re| re.captures(framework_version))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| framework_version.to_string())
}

/// Configured help links, in order. Empty when disabled.
pub fn help_links(config: &AdminConfig) -> Vec<HelpLink> {
    config
        .help_links
        .iter()
        .filter(|link| !link.title.is_empty() && !link.url.is_empty())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    #[test]
    fn version_number_keeps_major_minor() {
        assert_eq!(cms_version_number("4.9.1"), "4.9");
        assert_eq!(cms_version_number("4.9.x-dev"), "4.9");
        assert_eq!(cms_version_number("10.12.0-rc1"), "10.12");
        assert_eq!(cms_version_number("4.9"), "4.9");
        assert_eq!(cms_version_number("myfork"), "myfork");
        assert_eq!(cms_version_number(""), "");
    }

    #[test]
    fn help_links_follow_configuration() {
        let mut config = AdminConfig::default();
        config.help_links = vec![
            HelpLink {
                title: "Guide".to_string(),
                url: "https://example.com".to_string(),
            },
            HelpLink {
                title: "".to_string(),
                url: "https://example.com/blank".to_string(),
            },
        ];
        assert_eq!(help_links(&config).len(), 1);

        config.help_links.clear();
        assert!(help_links(&config).is_empty());
    }

    #[actix_web::test]
    async fn endpoint_serves_config() {
        let config = AdminConfig {
            framework_version: "4.13.2".to_string(),
            help_links: vec![HelpLink {
                title: "Guide".to_string(),
                url: "https://example.com".to_string(),
            }],
            ..Default::default()
        };
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .route("/admin/client-config", web::get().to(process)),
        )
        .await;

        let request = actix_test::TestRequest::get()
            .uri("/admin/client-config")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body,
            json!({
                "version": "4.13",
                "helpLinks": [{ "title": "Guide", "url": "https://example.com" }],
                "sections": {
                    "pages": {
                        "url": "/admin/pages",
                        "form_schema_url": "/admin/pages/schema/EditForm"
                    }
                }
            })
        );
    }
}
