use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// Query-string values arrive as strings; empty means unset.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, limit: i64, page: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            total,
            limit,
            page,
            total_pages,
            has_more: page < total_pages,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_clamped() {
        let params = PaginationParams {
            limit: Some(500),
            page: None,
        };
        assert_eq!(params.limit(), 100);

        let params = PaginationParams {
            limit: Some(0),
            page: None,
        };
        assert_eq!(params.limit(), 1);

        let params = PaginationParams {
            limit: Some(-3),
            page: None,
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn offset_follows_page() {
        let params = PaginationParams {
            limit: Some(20),
            page: Some(3),
        };
        assert_eq!(params.offset(), 40);

        let params = PaginationParams {
            limit: Some(20),
            page: Some(-1),
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn meta_total_pages_rounds_up() {
        let meta = PaginationMeta::new(25, 10, 1);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_more);

        let meta = PaginationMeta::new(30, 10, 3);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_more);
    }

    #[test]
    fn meta_empty_result_set() {
        let meta = PaginationMeta::new(0, 10, 1);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_more);
    }

    #[test]
    fn deserializes_from_query_strings() {
        let params: PaginationParams = serde_json::from_str(r#"{"limit":"25","page":"2"}"#).unwrap();
        assert_eq!(params.limit(), 25);
        assert_eq!(params.page(), 2);

        let params: PaginationParams = serde_json::from_str(r#"{"limit":"","page":""}"#).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.page(), 1);
    }
}
