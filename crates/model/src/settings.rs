//! App settings singleton

use serde::{Deserialize, Serialize};

use crate::Entity;

/// The singleton `settings/app` document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// App display name
    #[serde(default)]
    pub app_name: String,
    /// App logo URL
    #[serde(default)]
    pub logo_url: String,
    /// Home-screen banners
    #[serde(default)]
    pub banners: Vec<Banner>,
}

impl AppSettings {
    /// Banners sorted by `sort_order` ascending; ties keep stored order
    pub fn sorted_banners(&self) -> Vec<Banner> {
        let mut banners = self.banners.clone();
        banners.sort_by_key(|b| b.sort_order);
        banners
    }
}

impl Entity for AppSettings {
    const COLLECTION: &'static str = "settings";

    fn id(&self) -> &str {
        // Singleton document, fixed key
        "app"
    }
}

/// A home-screen banner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    /// Identifier, unique within the settings document
    #[serde(default)]
    pub id: String,
    /// Banner image URL
    #[serde(default)]
    pub image_url: String,
    /// Alt text
    #[serde(default)]
    pub alt: String,
    /// Optional tap-through link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Display order, ascending
    #[serde(default)]
    pub sort_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner(id: &str, sort_order: i64) -> Banner {
        Banner {
            id: id.to_string(),
            image_url: String::new(),
            alt: String::new(),
            link_url: None,
            sort_order,
        }
    }

    #[test]
    fn test_banners_sort_stably() {
        let settings = AppSettings {
            app_name: "وفر".to_string(),
            logo_url: String::new(),
            banners: vec![banner("b", 2), banner("a", 1), banner("c", 2)],
        };
        let sorted = settings.sorted_banners();
        let ids: Vec<&str> = sorted.iter().map(|b| b.id.as_str()).collect();
        // sort_order 2 ties keep stored order: b before c
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
