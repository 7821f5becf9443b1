use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Name used for sources configured without one.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// One configured external feed.
///
/// `feed_url` may be empty when the configuration omitted it; such a source
/// is skipped as `invalid_url` rather than rejected at load time.
///
/// Field values are read leniently: a mistyped scalar never drops the source.
/// Numbers and booleans are stringified for names and URLs. `limit` accepts
/// integers, floats and numeric strings; a negative or non-numeric limit
/// means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Source {
    #[serde(default = "default_name", deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, alias = "rss_url", deserialize_with = "lenient_url")]
    pub feed_url: String,
    /// Maximum number of entries to take; `None` or `Some(0)` takes all.
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<usize>,
}

fn default_name() -> String {
    UNKNOWN_SOURCE.to_string()
}

/// Any config value, narrowed to the scalars a source field can use.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Other(IgnoredAny),
}

impl Scalar {
    fn into_text(self) -> Option<String> {
        match self {
            Scalar::Int(n) => Some(n.to_string()),
            Scalar::Float(f) => Some(f.to_string()),
            Scalar::Text(s) => Some(s),
            Scalar::Bool(b) => Some(b.to_string()),
            Scalar::Other(_) => None,
        }
    }

    fn into_limit(self) -> Option<usize> {
        let n = match self {
            Scalar::Int(n) => n,
            Scalar::Float(f) if f.is_finite() => f.trunc() as i64,
            Scalar::Text(s) => leading_integer(&s),
            _ => 0,
        };
        usize::try_from(n).ok().filter(|&n| n > 0)
    }
}

/// Parses the optional sign and digits at the start of `s`, ignoring
/// leading whitespace and anything after the digits. Yields 0 when there
/// are no digits.
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?
        .into_text()
        .unwrap_or_else(default_name))
}

fn lenient_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_text().unwrap_or_default())
}

fn lenient_limit<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_limit())
}

impl Source {
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The entry cap to apply, if any. A zero limit means unbounded.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&l| l > 0)
    }
}
