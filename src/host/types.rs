use ahash::AHashMap;
use serde::Deserialize;

/// GraphQL-style connection wrapper (`{ edges: [{ node }] }`)
#[derive(Debug, Deserialize, Clone)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

/// Single edge of a connection
#[derive(Debug, Deserialize, Clone)]
pub struct Edge<T> {
    pub node: T,
}

/// Metafield node as delivered by the host
#[derive(Debug, Deserialize, Clone)]
pub struct MetafieldNode {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

/// Product image node
#[derive(Debug, Deserialize, Clone)]
pub struct ImageNode {
    pub id: String,
    pub url: String,
    #[serde(alias = "altText")]
    pub alt_text: Option<String>,
}

/// The product the panel is rendered for
#[derive(Debug, Deserialize, Clone)]
pub struct HostProduct {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub metafields: Connection<MetafieldNode>,
    #[serde(default)]
    pub images: Connection<ImageNode>,
}

impl HostProduct {
    /// Collects the metafields of one namespace into a key/value map.
    /// Later duplicates of a key win.
    pub fn bundle_metafields(&self, namespace: &str) -> AHashMap<String, String> {
        self.metafields
            .nodes()
            .filter(|node| node.namespace == namespace)
            .map(|node| (node.key.clone(), node.value.clone()))
            .collect()
    }

    /// The first `limit` product images, for the preview strip.
    pub fn preview_images(&self, limit: usize) -> Vec<&ImageNode> {
        self.images.nodes().take(limit).collect()
    }
}

/// Top-level data object the host hands to the extension
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HostProductData {
    pub product: Option<HostProduct>,
}

impl HostProductData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
