use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// User-assignable working status of a renewal line item.
///
/// This is the only mutable field on a record: it is edited after ingestion,
/// persisted separately from the source workbook, and restored onto freshly
/// normalized items by row index on the next load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    /// No status assigned yet; renders as an empty label.
    #[default]
    Unset,
    InProgress,
    Quoted,
    Won,
    Lost,
    NoBid,
}

impl ItemStatus {
    pub const ALL: [Self; 6] = [
        Self::Unset,
        Self::InProgress,
        Self::Quoted,
        Self::Won,
        Self::Lost,
        Self::NoBid,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::InProgress => "In Progress",
            Self::Quoted => "Quoted",
            Self::Won => "Won",
            Self::Lost => "Lost",
            Self::NoBid => "No Bid",
        }
    }

    /// Parse a stored or user-entered label. Unknown labels degrade to
    /// [`ItemStatus::Unset`] rather than failing, so a status file written by
    /// a newer build still loads.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let canon = label.trim().to_lowercase().replace(['_', '-'], " ");
        match canon.as_str() {
            "in progress" => Self::InProgress,
            "quoted" => Self::Quoted,
            "won" => Self::Won,
            "lost" => Self::Lost,
            "no bid" => Self::NoBid,
            _ => Self::Unset,
        }
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Persisted as the display label so status files stay readable and tolerant
// of labels this build does not know.
impl Serialize for ItemStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_round_trip_through_parse() {
        for status in ItemStatus::ALL {
            assert_eq!(ItemStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn parse_is_forgiving_about_shape() {
        assert_eq!(ItemStatus::parse("in_progress"), ItemStatus::InProgress);
        assert_eq!(ItemStatus::parse("  NO BID "), ItemStatus::NoBid);
        assert_eq!(ItemStatus::parse("won"), ItemStatus::Won);
    }

    #[test]
    fn unknown_labels_degrade_to_unset() {
        assert_eq!(ItemStatus::parse("Escalated"), ItemStatus::Unset);
        assert_eq!(ItemStatus::parse(""), ItemStatus::Unset);
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&ItemStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: ItemStatus = serde_json::from_str("\"mystery label\"").unwrap();
        assert_eq!(back, ItemStatus::Unset);
    }
}
