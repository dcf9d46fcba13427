use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MAX_PAGE_SIZE: i64 = 100;

/// `page` / `size` query parameters. Numeric strings are accepted so the
/// struct can be flattened into query parameter structs.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

impl PaginationQuery {
    /// Page clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// Size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn size(&self) -> i64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// Optional id filter for flattened query structs, where every value
/// arrives as a string.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        Some(Raw::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: '{s}'"))),
    }
}

/// Optional boolean flag (`true`/`false`/`1`/`0`) for flattened query structs.
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(v)) => Ok(Some(v)),
        Some(Raw::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("invalid boolean: '{s}'"))),
        },
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        grade_level_id: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        low_stock: Option<bool>,
    }

    fn parse(query: &str) -> Result<Params, actix_web::error::QueryPayloadError> {
        actix_web::web::Query::<Params>::from_query(query).map(|q| q.into_inner())
    }

    #[test]
    fn test_query_strings_are_parsed() {
        let params = parse("page=2&size=25&grade_level_id=7&low_stock=true").expect("valid query");
        assert_eq!(params.pagination.page, 2);
        assert_eq!(params.pagination.size, 25);
        assert_eq!(params.grade_level_id, Some(7));
        assert_eq!(params.low_stock, Some(true));
    }

    #[test]
    fn test_defaults_when_missing() {
        let params = parse("").expect("valid query");
        assert_eq!(params.pagination.page, 1);
        assert_eq!(params.pagination.size, 10);
        assert_eq!(params.grade_level_id, None);
        assert_eq!(params.low_stock, None);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        assert!(parse("grade_level_id=abc").is_err());
        assert!(parse("page=x").is_err());
    }

    #[test]
    fn test_clamping() {
        let q = PaginationQuery { page: 0, size: 500 };
        assert_eq!(q.page(), 1);
        assert_eq!(q.size(), MAX_PAGE_SIZE);
        let q = PaginationQuery { page: 3, size: 0 };
        assert_eq!(q.size(), 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 0);
        assert_eq!(PaginationInfo::new(1, 10, 10).total_pages, 1);
        assert_eq!(PaginationInfo::new(1, 10, 11).total_pages, 2);
        assert_eq!(PaginationInfo::new(2, 3, 7).total_pages, 3);
    }
}
