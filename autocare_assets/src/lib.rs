//! Static files of the landing page, embedded at compile time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// Request path, e.g. `/css/style.css`.
    pub path: &'static str,
    pub content_type: &'static str,
    pub content: &'static [u8],
}

include!(env!("ASSETS"));

pub const INDEX_PATH: &str = "/index.html";

pub fn get(path: &str) -> Option<&'static Asset> {
    ASSETS.iter().find(|asset| asset.path == path)
}

pub fn index() -> &'static Asset {
    get(INDEX_PATH).unwrap_or_else(|| unreachable!("index.html is part of the assets"))
}
