use serde::{Deserialize, Deserializer};

/// Legacy datasets stored enabled/paused flags as booleans, `0`/`1` integers
/// or the string forms of either. The coercion happens here, at the
/// deserialization boundary, so the records themselves carry strict `bool`s.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n == 1,
        Flag::Str(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true"),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Flagged {
        #[serde(default, deserialize_with = "super::lenient_bool")]
        enabled: bool,
    }

    fn parse(json: &str) -> bool {
        serde_json::from_str::<Flagged>(json).unwrap().enabled
    }

    #[test]
    fn coerces_all_legacy_shapes() {
        assert!(parse(r#"{ "enabled": true }"#));
        assert!(parse(r#"{ "enabled": 1 }"#));
        assert!(parse(r#"{ "enabled": "1" }"#));
        assert!(parse(r#"{ "enabled": "true" }"#));
        assert!(parse(r#"{ "enabled": "TRUE" }"#));
    }

    #[test]
    fn everything_else_is_false() {
        assert!(!parse(r#"{ "enabled": false }"#));
        assert!(!parse(r#"{ "enabled": 0 }"#));
        assert!(!parse(r#"{ "enabled": 2 }"#));
        assert!(!parse(r#"{ "enabled": "yes" }"#));
        assert!(!parse(r#"{}"#));
    }
}
