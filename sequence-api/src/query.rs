use std::borrow::Cow;

pub const DEFAULT_CURSOR: u64 = 0;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query parameter `{name}` is not a number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("query parameter `{name}` must not be negative")]
    Negative { name: &'static str },
    #[error("query parameter `limit` must be greater than zero")]
    ZeroLimit,
}

/// The `cursor`/`limit` pair of a numbers request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumbersQuery {
    pub cursor: u64,
    pub limit: u32,
}

impl Default for NumbersQuery {
    fn default() -> Self {
        Self {
            cursor: DEFAULT_CURSOR,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl NumbersQuery {
    pub fn new(cursor: u64, limit: u32) -> Self {
        Self { cursor, limit }
    }

    /// Parses a query string the forgiving way.
    ///
    /// Missing or empty parameters take their defaults. Values are read like a leading-digits
    /// integer parse: surrounding whitespace and a `+` sign are accepted and anything after the
    /// digits is ignored (`"12abc"` is 12). Values that do not start with a digit, negative
    /// values fall back to the defaults. Oversized values saturate. `limit=0` is a valid number
    /// but also takes the default limit, so a lenient request never yields an empty page.
    pub fn parse(query: &str) -> Self {
        let mut out = Self::default();
        if let Some(raw) = param(query, "cursor") {
            out.cursor = leading_u64(&raw).unwrap_or(DEFAULT_CURSOR);
        }
        if let Some(raw) = param(query, "limit") {
            out.limit = leading_u64(&raw)
                .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_LIMIT);
        }
        out
    }

    /// Parses a query string, rejecting anything [`NumbersQuery::parse`] would silently repair.
    ///
    /// Missing or empty parameters still take their defaults.
    pub fn parse_strict(query: &str) -> Result<Self, QueryError> {
        let mut out = Self::default();
        if let Some(raw) = param(query, "cursor") {
            out.cursor = strict_u64("cursor", &raw)?.unwrap_or(DEFAULT_CURSOR);
        }
        if let Some(raw) = param(query, "limit") {
            if let Some(n) = strict_u64("limit", &raw)? {
                let n = u32::try_from(n).map_err(|_| QueryError::InvalidNumber {
                    name: "limit",
                    value: raw.to_string(),
                })?;
                if n == 0 {
                    return Err(QueryError::ZeroLimit);
                }
                out.limit = n;
            }
        }
        Ok(out)
    }

    /// Renders the query back into `cursor=..&limit=..` form.
    pub fn to_query_string(&self) -> String {
        format!("cursor={}&limit={}", self.cursor, self.limit)
    }
}

/// The first value of `name` in an `application/x-www-form-urlencoded` query, decoded.
fn param<'a>(query: &'a str, name: &str) -> Option<Cow<'a, str>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| decode(key) == name)
        .map(|(_, value)| decode(value))
        .filter(|value| !value.is_empty())
}

fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }

    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn leading_u64(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let n = s[..digits].bytes().fold(0u64, |acc, d| {
        acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
    });
    Some(n)
}

fn strict_u64(name: &'static str, raw: &str) -> Result<Option<u64>, QueryError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Some(rest) = s.strip_prefix('-') {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(QueryError::Negative { name });
        }
    }
    s.parse::<u64>()
        .map(Some)
        .map_err(|_| QueryError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
}
