use crate::bencode::{self, Value};
use crate::{Error, Result};
use std::fmt::{Debug, Display};

/// BitTorrent v1 info-hash: SHA-1 over the canonically re-encoded `info`
/// dictionary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: impl AsRef<str>) -> Result<Self> {
        let data = hex::decode(s.as_ref()).map_err(|e| Error::Generic(e.to_string()))?;
        let id: [u8; 20] = data
            .as_slice()
            .try_into()
            .map_err(|_| Error::Generic("info hash must be 20 bytes".to_string()))?;
        Ok(Self(id))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl Display for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl Debug for InfoHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl From<[u8; 20]> for InfoHash {
    fn from(value: [u8; 20]) -> Self {
        Self(value)
    }
}

/// Computes the info-hash of a decoded torrent. The `info` sub-dictionary is
/// re-encoded canonically before hashing; hashing a raw sub-slice of the
/// source buffer would silently produce a wrong hash whenever the source key
/// order is not canonical.
pub fn info_hash(torrent: &Value) -> Result<InfoHash> {
    let info = info_dict(torrent)?;
    let buf = bencode::to_bytes(info)?;
    let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, &buf);
    let data: [u8; 20] = digest
        .as_ref()
        .try_into()
        .map_err(|_| Error::InvalidTorrent)?;
    Ok(data.into())
}

/// The torrent's display name: `info.name` as UTF-8, or the literal
/// `"torrent"` when absent.
pub fn display_name(torrent: &Value) -> String {
    torrent
        .dict_get("info")
        .and_then(|info| info.dict_get("name"))
        .and_then(|name| name.as_str())
        .unwrap_or("torrent")
        .to_string()
}

/// Every tracker the torrent itself names: the single `announce` entry plus
/// all entries of all `announce-list` tiers, in document order.
pub fn announce_urls(torrent: &Value) -> Vec<String> {
    let mut urls = vec![];
    if let Some(announce) = torrent.dict_get("announce").and_then(|v| v.as_str()) {
        urls.push(announce.to_string());
    }
    if let Some(tiers) = torrent.dict_get("announce-list").and_then(|v| v.as_list()) {
        for tier in tiers {
            for tracker in tier.as_list().unwrap_or(&[]) {
                if let Some(url) = tracker.as_str() {
                    urls.push(url.to_string());
                }
            }
        }
    }
    urls
}

fn info_dict(torrent: &Value) -> Result<&Value> {
    let info = match torrent {
        Value::Dictionary(_) => torrent.dict_get("info").ok_or(Error::InvalidTorrent)?,
        _ => return Err(Error::InvalidTorrent),
    };
    match info {
        Value::Dictionary(_) => Ok(info),
        _ => Err(Error::InvalidTorrent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> Value {
        [
            ("length", Value::Integer(12345)),
            ("name", Value::from("file.bin")),
            ("piece length", Value::Integer(16384)),
            ("pieces", Value::from(vec![b'a'; 20])),
        ]
        .into_iter()
        .collect()
    }

    fn sample_torrent() -> Value {
        [
            ("announce", Value::from("udp://tracker.example/announce")),
            ("info", sample_info()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn known_info_hash() {
        // sha1 of the canonical encoding of sample_info()
        let encoded = bencode::to_bytes(&sample_info()).unwrap();
        assert_eq!(
            encoded,
            b"d6:lengthi12345e4:name8:file.bin12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaae"
        );
        let hash = info_hash(&sample_torrent()).unwrap();
        assert_eq!(hash.hex(), "3359a3ebff76a775170c2cba3798cfbb3e5b8853");
        assert_eq!(hash.hex().len(), 40);
    }

    #[test]
    fn hash_ignores_fields_outside_info() {
        let a = info_hash(&sample_torrent()).unwrap();
        let b = info_hash(
            &[
                ("announce", Value::from("http://other.example/announce")),
                ("comment", Value::from("unrelated")),
                ("info", sample_info()),
            ]
            .into_iter()
            .collect(),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hash_changes_with_info_contents() {
        let mut other = sample_info();
        if let Value::Dictionary(m) = &mut other {
            m.insert(b"length".to_vec(), Value::Integer(12346));
        }
        let a = info_hash(&sample_torrent()).unwrap();
        let b = info_hash(&[("info", other)].into_iter().collect()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn missing_or_bad_info_rejected() {
        let err = info_hash(&[("announce", Value::from("x"))].into_iter().collect()).unwrap_err();
        assert!(matches!(err, Error::InvalidTorrent));

        let err = info_hash(&[("info", Value::Integer(1))].into_iter().collect()).unwrap_err();
        assert!(matches!(err, Error::InvalidTorrent));

        let err = info_hash(&Value::Integer(7)).unwrap_err();
        assert!(matches!(err, Error::InvalidTorrent));
    }

    #[test]
    fn name_defaults_to_torrent() {
        assert_eq!(display_name(&sample_torrent()), "file.bin");
        let nameless: Value = [("info", [("length", Value::Integer(1))].into_iter().collect())]
            .into_iter()
            .collect();
        assert_eq!(display_name(&nameless), "torrent");
    }

    #[test]
    fn announce_and_tiers_collected() {
        let torrent: Value = [
            ("announce", Value::from("udp://a.example/announce")),
            (
                "announce-list",
                Value::List(vec![
                    Value::List(vec![
                        Value::from("udp://a.example/announce"),
                        Value::from("udp://b.example/announce"),
                    ]),
                    Value::List(vec![Value::from("http://c.example/announce")]),
                ]),
            ),
            ("info", sample_info()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            announce_urls(&torrent),
            vec![
                "udp://a.example/announce",
                "udp://a.example/announce",
                "udp://b.example/announce",
                "http://c.example/announce",
            ]
        );
        assert!(announce_urls(&sample_info()).is_empty());
    }

    #[test]
    fn hex_round_trip() {
        let hash = info_hash(&sample_torrent()).unwrap();
        assert_eq!(InfoHash::from_hex(hash.hex()).unwrap(), hash);
        assert!(InfoHash::from_hex("zz").is_err());
        assert!(InfoHash::from_hex("aabb").is_err());
    }
}
