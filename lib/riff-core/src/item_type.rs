//! Catalog item types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, convert_name};

/// Kind of catalog object, as used by search filters and `type` fields.
///
/// The wire form is the `snake_case` of the variant name (`"playlist"`).
/// Unknown wire strings fail to parse; there is no fallback variant for them,
/// `Unknown` only matches the literal `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    /// A track.
    Track,
    /// An album.
    Album,
    /// An artist.
    Artist,
    /// A playlist.
    Playlist,
    /// A user profile.
    User,
    /// A podcast episode.
    Episode,
    /// A podcast show.
    Show,
    /// An audiobook.
    Audiobook,
    /// An audiobook chapter.
    Chapter,
    /// A genre.
    Genre,
    /// The literal `unknown` item type.
    Unknown,
}

impl ItemType {
    /// Every item type, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Track,
        Self::Album,
        Self::Artist,
        Self::Playlist,
        Self::User,
        Self::Episode,
        Self::Show,
        Self::Audiobook,
        Self::Chapter,
        Self::Genre,
        Self::Unknown,
    ];

    /// Host-case name of the variant.
    #[must_use]
    pub const fn host_name(self) -> &'static str {
        match self {
            Self::Track => "Track",
            Self::Album => "Album",
            Self::Artist => "Artist",
            Self::Playlist => "Playlist",
            Self::User => "User",
            Self::Episode => "Episode",
            Self::Show => "Show",
            Self::Audiobook => "Audiobook",
            Self::Chapter => "Chapter",
            Self::Genre => "Genre",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&convert_name(self.host_name()))
    }
}

impl FromStr for ItemType {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        // Only wire-case tokens convert to a host name
        let host = match token.chars().next() {
            Some(c) if c.is_ascii_lowercase() => convert_name(token),
            _ => return Err(Error::UnknownItemType(token.to_string())),
        };

        Self::ALL
            .into_iter()
            .find(|item| item.host_name() == host)
            .ok_or_else(|| Error::UnknownItemType(token.to_string()))
    }
}

impl Serialize for ItemType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
