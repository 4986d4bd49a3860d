use serde::{Deserialize, Deserializer, Serialize};

pub mod api {
    use super::*;

    /// A source currently on the block list.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BlockEntry {
        pub ip: String,
        #[serde(default, deserialize_with = "unix_seconds")]
        pub timestamp: i64,
        /// 0 means the entry never expires.
        #[serde(default, deserialize_with = "unix_seconds")]
        pub expires: i64,
        #[serde(default, deserialize_with = "nullable_string")]
        pub reason: String,
        #[serde(default = "any_host")]
        pub host: String,
    }

    /// Allow-list entries share the block-list layout.
    pub type AllowEntry = BlockEntry;

    /// A live rule from the local firewall.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct IptablesEntry {
        pub source: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub hostname: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub chain: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub extensions: String,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct SearchResult {
        #[serde(default)]
        pub allow: Vec<AllowEntry>,
        #[serde(default)]
        pub block: Vec<BlockEntry>,
        #[serde(default)]
        pub iptables: Vec<IptablesEntry>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct ActivityFeed {
        #[serde(default)]
        pub block: Vec<BlockEntry>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SearchRequest {
        pub source: String,
    }
}

fn any_host() -> String {
    "*".to_string()
}

/// Accepts integer or float seconds (the backend stores `time() + ttl` as a float).
fn unix_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Number>::deserialize(deserializer)?;
    let seconds = match value {
        Some(n) => match n.as_i64() {
            Some(i) => i,
            None => n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0),
        },
        None => 0,
    };
    Ok(seconds.max(0))
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::api::*;

    #[test]
    fn block_entry_accepts_float_expiry_and_null_reason() {
        let entry: BlockEntry = serde_json::from_str(
            r#"{"ip": "192.0.2.1", "timestamp": 1700000000, "expires": 1700086400.75, "reason": null}"#,
        )
        .unwrap();

        assert_eq!(entry.timestamp, 1_700_000_000);
        assert_eq!(entry.expires, 1_700_086_400);
        assert_eq!(entry.reason, "");
        assert_eq!(entry.host, "*");
    }

    #[test]
    fn negative_timestamps_are_clamped() {
        let entry: BlockEntry =
            serde_json::from_str(r#"{"ip": "192.0.2.1", "timestamp": -5, "expires": 0}"#).unwrap();
        assert_eq!(entry.timestamp, 0);
        assert_eq!(entry.expires, 0);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let result: SearchResult = serde_json::from_str(r#"{"block": []}"#).unwrap();
        assert!(result.allow.is_empty());
        assert!(result.iptables.is_empty());

        let feed: ActivityFeed = serde_json::from_str("{}").unwrap();
        assert!(feed.block.is_empty());
    }

    #[test]
    fn iptables_entry_parses() {
        let entry: IptablesEntry = serde_json::from_str(
            r#"{"source": "198.51.100.7", "hostname": "gw1", "chain": "INPUT", "extensions": "/* spam */"}"#,
        )
        .unwrap();
        assert_eq!(entry.chain, "INPUT");
        assert_eq!(entry.extensions, "/* spam */");
    }
}
