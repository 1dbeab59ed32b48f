//! # Canonical Range Model
//!
//! Every provider feed, whatever its original format, is normalized into a [`RangeSet`]:
//! two ordered lists of address-prefix strings, one per address family.
//!
//! Entries are kept as the provider published them. They are not validated here;
//! a malformed entry only matters when a query is matched against it.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSet {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ipv4: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ipv6: Vec<String>,
}

impl RangeSet {
    pub fn new(ipv4: Vec<String>, ipv6: Vec<String>) -> Self {
        Self { ipv4, ipv6 }
    }

    /// Total number of entries across both families.
    pub fn len(&self) -> usize {
        self.ipv4.len() + self.ipv6.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// Reads a JSON list, taking an explicit `null` as an empty one.
///
/// Older records were written with `null` for an empty family, and provider feeds do
/// the same for sections they have nothing to publish in.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RangeSet {
        RangeSet::new(
            vec!["203.0.113.0/24".into(), "198.51.100.7".into(), "203.0.113.0/24".into()],
            vec!["2001:db8::/32".into()],
        )
    }

    #[test]
    fn serializes_as_flat_two_field_object() {
        let json = String::from_utf8(RangeSet::default().to_json().unwrap()).unwrap();
        assert_eq!(json, r#"{"ipv4":[],"ipv6":[]}"#);
    }

    #[test]
    fn json_round_trip_keeps_order_and_duplicates() {
        let original = sample();
        let bytes = original.to_json().unwrap();
        assert_eq!(RangeSet::from_json(&bytes).unwrap(), original);
    }

    #[test]
    fn null_or_missing_family_reads_as_empty() {
        let set = RangeSet::from_json(br#"{"ipv4":["10.0.0.0/8"],"ipv6":null}"#).unwrap();
        assert_eq!(set.ipv4, vec!["10.0.0.0/8"]);
        assert!(set.ipv6.is_empty());

        let set = RangeSet::from_json(br#"{"ipv6":["::1/128"]}"#).unwrap();
        assert!(set.ipv4.is_empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn wrong_schema_is_rejected() {
        assert!(RangeSet::from_json(br#"{"ipv4":"10.0.0.0/8"}"#).is_err());
        assert!(RangeSet::from_json(b"[1,2,3]").is_err());
        assert!(RangeSet::from_json(b"").is_err());
    }
}
