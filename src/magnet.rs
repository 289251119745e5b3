use crate::bencode::Value;
use crate::torrent::{self, InfoHash};
use crate::Result;
use std::collections::BTreeSet;
use url::form_urlencoded;

/// Public trackers appended to every magnet to aid discoverability; private
/// sites strip their passkey-bound announce from shared links, so a magnet
/// built only from the torrent's own trackers can be unfindable.
pub const SUPPLEMENTAL_TRACKERS: &[&str] = &[
    "udp://tracker.opentrackr.org:1337/announce",
    "udp://open.tracker.cl:1337/announce",
    "udp://tracker.openbittorrent.com:6969/announce",
    "udp://opentracker.i2p.rocks:6969/announce",
    "udp://tracker.torrent.eu.org:451/announce",
];

/// A magnet link before serialization. The tracker set is deduplicated and
/// iterates in a stable order, so one descriptor always serializes to the
/// same URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetDescriptor {
    pub info_hash: InfoHash,
    pub display_name: String,
    pub trackers: BTreeSet<String>,
}

impl MagnetDescriptor {
    /// Builds a descriptor from a decoded torrent: info-hash over the
    /// canonical `info` encoding, `info.name` as display name, trackers from
    /// `announce`/`announce-list` plus the supplemental list.
    pub fn from_torrent(torrent: &Value) -> Result<Self> {
        let info_hash = torrent::info_hash(torrent)?;
        let display_name = torrent::display_name(torrent);

        let mut trackers: BTreeSet<String> = torrent::announce_urls(torrent).into_iter().collect();
        trackers.extend(SUPPLEMENTAL_TRACKERS.iter().map(|s| s.to_string()));

        Ok(Self {
            info_hash,
            display_name,
            trackers,
        })
    }

    /// `magnet:?xt=urn:btih:<hash>&dn=<name>` followed by one `&tr=` per
    /// unique tracker.
    pub fn to_uri(&self) -> String {
        let mut uri = format!(
            "magnet:?xt=urn:btih:{}&dn={}",
            self.info_hash.hex(),
            url_encode(&self.display_name)
        );
        for tracker in &self.trackers {
            uri.push_str("&tr=");
            uri.push_str(&url_encode(tracker));
        }
        uri
    }
}

fn url_encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_torrent(announce: &str) -> Value {
        [
            ("announce", Value::from(announce)),
            (
                "info",
                [
                    ("length", Value::Integer(1)),
                    ("name", Value::from("Sample Movie 1080p")),
                ]
                .into_iter()
                .collect(),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn uri_shape() {
        let descriptor =
            MagnetDescriptor::from_torrent(&sample_torrent("udp://a.example/announce")).unwrap();
        let uri = descriptor.to_uri();
        assert!(uri.starts_with(&format!(
            "magnet:?xt=urn:btih:{}&dn=Sample+Movie+1080p",
            descriptor.info_hash.hex()
        )));
        assert!(uri.contains("&tr=udp%3A%2F%2Fa.example%2Fannounce"));
    }

    #[test]
    fn supplemental_trackers_always_present() {
        let descriptor =
            MagnetDescriptor::from_torrent(&sample_torrent("udp://a.example/announce")).unwrap();
        for tracker in SUPPLEMENTAL_TRACKERS {
            assert!(descriptor.trackers.contains(*tracker));
        }
        // announce + 5 supplemental, no overlap
        assert_eq!(descriptor.trackers.len(), SUPPLEMENTAL_TRACKERS.len() + 1);
    }

    #[test]
    fn announce_overlapping_supplemental_is_deduplicated() {
        let descriptor =
            MagnetDescriptor::from_torrent(&sample_torrent(SUPPLEMENTAL_TRACKERS[0])).unwrap();
        assert_eq!(descriptor.trackers.len(), SUPPLEMENTAL_TRACKERS.len());

        let uri = descriptor.to_uri();
        let encoded = url_encode(SUPPLEMENTAL_TRACKERS[0]);
        let occurrences = uri.matches(&format!("&tr={encoded}")).count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn serialization_is_stable() {
        let descriptor =
            MagnetDescriptor::from_torrent(&sample_torrent("udp://a.example/announce")).unwrap();
        assert_eq!(descriptor.to_uri(), descriptor.to_uri());
    }

    #[test]
    fn missing_info_aborts_build() {
        let err =
            MagnetDescriptor::from_torrent(&[("announce", Value::from("x"))].into_iter().collect())
                .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidTorrent));
    }
}
