//! # Channel Catalog
//!
//! Each player fetches the channel list and the favorites list once, at
//! setup, and derives its **source list**: the ordered channel names a user
//! may select. A channel is a source iff
//!
//! - it is `enabled`, and
//! - in favorites mode, its id is among the favorites, and
//! - when name filters are configured, its name contains at least one of
//!   them (case-insensitive).
//!
//! The source list keeps catalog order and is never mutated afterwards.

use std::collections::HashSet;

use crate::client::NowoClient;
use crate::error::{NowoError, NowoResult};
use crate::protocol::channels::{ChannelInfo, FavoriteChannel};

/// Source list filtering preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFilter {
    /// Only keep channels that are marked as favorites.
    pub favorites_only: bool,

    /// Case-insensitive name substrings; empty means "no name filtering".
    pub name_terms: Vec<String>,
}

impl SourceFilter {
    pub fn new(favorites_only: bool, name_terms: Vec<String>) -> Self {
        Self {
            favorites_only,
            name_terms,
        }
    }

    /// Whether `name` passes the name filter.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        if self.name_terms.is_empty() {
            return true;
        }
        let name = name.to_uppercase();
        self.name_terms
            .iter()
            .any(|term| name.contains(&term.to_uppercase()))
    }
}

/// Derive the source list from a channel list.
///
/// Favorites are only consulted when `filter.favorites_only` is set.
pub fn build_source_list(
    channels: &[ChannelInfo],
    favorites: &[FavoriteChannel],
    filter: &SourceFilter,
) -> Vec<String> {
    let favorite_ids: HashSet<&str> = favorites.iter().map(|f| f.id.as_str()).collect();

    channels
        .iter()
        .filter(|channel| channel.enabled)
        .filter(|channel| !filter.favorites_only || favorite_ids.contains(channel.id.as_str()))
        .filter(|channel| filter.matches_name(&channel.name))
        .map(|channel| channel.name.clone())
        .collect()
}

/// Channels known to one player plus its derived source list.
#[derive(Debug, Clone, Default)]
pub struct ChannelCatalog {
    channels: Vec<ChannelInfo>,
    sources: Vec<String>,
}

impl ChannelCatalog {
    /// Build a catalog from already fetched lists.
    pub fn new(
        channels: Vec<ChannelInfo>,
        favorites: &[FavoriteChannel],
        filter: &SourceFilter,
    ) -> Self {
        let sources = build_source_list(&channels, favorites, filter);
        Self { channels, sources }
    }

    /// Fetch the channel and favorites lists and build the catalog.
    ///
    /// Both lists are always fetched. Any failure is reported as
    /// [`NowoError::CatalogFetch`] for `device`.
    pub async fn fetch(
        client: &NowoClient,
        token: &str,
        device: &str,
        filter: &SourceFilter,
    ) -> NowoResult<Self> {
        let wrap = |e: NowoError| NowoError::CatalogFetch {
            device: device.to_string(),
            reason: e.to_string(),
        };

        let channels = client.channels(token).await.map_err(wrap)?;
        let favorites = client.favorites(token).await.map_err(wrap)?;

        let catalog = Self::new(channels, &favorites, filter);
        tracing::info!(
            device,
            channels = catalog.channels.len(),
            sources = catalog.sources.len(),
            "Channel catalog ready"
        );
        Ok(catalog)
    }

    /// Selectable channel names, in catalog order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Every channel of the catalog, including filtered-out ones.
    pub fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    /// First channel named `name`, in catalog order.
    pub fn channel_by_name(&self, name: &str) -> Option<&ChannelInfo> {
        self.channels.iter().find(|channel| channel.name == name)
    }

    /// Index of `name` in the source list.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.sources.iter().position(|source| source == name)
    }

    pub fn source_at(&self, index: usize) -> Option<&str> {
        self.sources.get(index).map(String::as_str)
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
