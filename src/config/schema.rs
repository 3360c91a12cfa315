use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// store:
///   url: "https://example.supabase.co"
///   api_key: "service-key"
/// inventory:
///   scale: 4
///   page_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hosted data service the questionnaire reads items from and writes
    /// responses and results to.
    pub store: StoreConfig,

    /// Inventory presentation settings. Defaults apply when omitted.
    #[serde(default)]
    pub inventory: Option<InventoryConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL of the data service (PostgREST-style API).
    pub url: String,

    /// API key. May also come from the ENNEAMIND_API_KEY environment
    /// variable or the key file under the config directory.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InventoryConfig {
    /// Highest answer value: 4 for the original inventory, 5 for the
    /// extended revision (default: 4).
    #[serde(default)]
    pub scale: Option<u8>,

    /// Items shown per page (default: 10).
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            scale: Some(4),
            page_size: Some(10),
        }
    }
}

impl InventoryConfig {
    pub fn effective_scale(&self) -> u8 {
        self.scale.unwrap_or(4)
    }

    pub fn effective_page_size(&self) -> usize {
        self.page_size.unwrap_or(10)
    }
}
