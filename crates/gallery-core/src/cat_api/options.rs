use crate::error::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size class of the returned image URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Full,
    #[default]
    Med,
    Small,
    Thumb,
}

impl ImageSize {
    pub fn as_query(self) -> &'static str {
        match self {
            ImageSize::Full => "full",
            ImageSize::Med => "med",
            ImageSize::Small => "small",
            ImageSize::Thumb => "thumb",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOrder {
    Asc,
    Desc,
    #[default]
    Random,
}

impl ImageOrder {
    /// The API spells orders in upper case.
    pub fn as_query(self) -> &'static str {
        match self {
            ImageOrder::Asc => "ASC",
            ImageOrder::Desc => "DESC",
            ImageOrder::Random => "RANDOM",
        }
    }

    /// Random order ignores `page`; the others need it to move forward.
    pub fn is_paged(self) -> bool {
        !matches!(self, ImageOrder::Random)
    }
}

impl fmt::Display for ImageOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub size: ImageSize,
    pub order: ImageOrder,
    pub limit: u32,
    pub page: Option<u32>,
}

impl FetchOptions {
    pub fn new(size: ImageSize, order: ImageOrder, limit: u32) -> Self {
        FetchOptions {
            size,
            order,
            limit,
            page: None,
        }
    }

    /// Sets `page` for paged orders so the batch starts at item `offset`.
    ///
    /// The API counts pages in units of `limit`, so a paged offset that is not
    /// a multiple of it cannot be expressed and is rejected.
    pub fn after(mut self, offset: u32) -> Result<Self> {
        if !self.order.is_paged() {
            self.page = None;
            return Ok(self);
        }
        if self.limit == 0 || offset % self.limit != 0 {
            return Err(GalleryError::InvalidArgument(format!(
                "offset {offset} is not on a page boundary for limit {}",
                self.limit
            )));
        }
        self.page = Some(offset / self.limit);
        Ok(self)
    }

    /// First item the request covers, for paged orders.
    pub fn first_item(&self) -> Option<u32> {
        self.page.map(|page| page.saturating_mul(self.limit))
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("size", self.size.as_query().to_string()),
            ("order", self.order.as_query().to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}
