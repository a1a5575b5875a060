use serde::{Deserialize, Serialize};

/// Installable web app metadata served as `/manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub scope: String,
    pub display: Display,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<Icon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Fullscreen,
    Standalone,
    MinimalUi,
    Browser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl Icon {
    fn png(size: u32) -> Self {
        Self {
            src: format!("/icons/icon-{size}x{size}.png"),
            sizes: format!("{size}x{size}"),
            mime_type: "image/png".into(),
            purpose: None,
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        let mut maskable = Icon::png(512);
        maskable.purpose = Some("maskable".into());
        Self {
            name: "CampusCompass".into(),
            short_name: "CampusCompass".into(),
            description: "Find buildings, contacts and walking directions on campus".into(),
            start_url: "/app".into(),
            scope: "/".into(),
            display: Display::Standalone,
            background_color: "#ffffff".into(),
            theme_color: "#2563eb".into(),
            icons: vec![Icon::png(192), Icon::png(512), maskable],
        }
    }
}

#[test]
fn manifest_serializes_web_app_fields() {
    let value = serde_json::to_value(Manifest::default()).unwrap();
    assert_eq!(value["display"], "standalone");
    assert_eq!(value["start_url"], "/app");
    assert_eq!(value["icons"][0]["type"], "image/png");
    assert!(value["icons"][0].get("purpose").is_none());
    assert_eq!(value["icons"][2]["purpose"], "maskable");
}
