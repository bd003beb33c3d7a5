use serde::{Deserialize, Serialize};

/// A public image from `/images/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatImage {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub breeds: Vec<CatBreed>,
    #[serde(default)]
    pub categories: Vec<CatCategory>,
}

impl CatImage {
    pub fn primary_breed(&self) -> Option<&CatBreed> {
        self.breeds.first()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatBreed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub temperament: Option<String>,
    #[serde(default)]
    pub life_span: Option<String>,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatCategory {
    pub id: u32,
    pub name: String,
}
