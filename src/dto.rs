use serde::Serialize;

/// `{"msg": "..."}` body used for confirmations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Request timestamps: RFC 3339, or a plain `YYYY-MM-DD` read as midnight UTC.
pub mod datetime {
    use serde::{de, Deserialize, Deserializer};
    use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

    pub fn parse(raw: &str) -> Option<OffsetDateTime> {
        let raw = raw.trim();
        if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(ts);
        }
        Date::parse(raw, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|d| d.midnight().assume_utc())
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw).map(Some).ok_or_else(|| {
                de::Error::custom(format!(
                    "invalid date `{}`, expected RFC 3339 or YYYY-MM-DD",
                    raw
                ))
            }),
        }
    }

    #[cfg(test)]
    mod tests {
        use time::macros::datetime;

        use super::parse;

        #[test]
        fn accepts_rfc3339_and_plain_dates() {
            assert_eq!(parse("2026-11-02T09:30:00+02:00"), Some(datetime!(2026-11-02 07:30 UTC)));
            assert_eq!(parse("2026-11-02"), Some(datetime!(2026-11-02 0:00 UTC)));
            assert_eq!(parse("02/11/2026"), None);
            assert_eq!(parse("2026-13-40"), None);
        }
    }
}
