use serde::{Deserialize, Serialize};

// 分页查询参数
#[derive(Debug, Clone, Deserialize)]
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

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 自定义反序列化函数，支持字符串到i64的转换
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

/// 单页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

/// 页码上限，保证 page * size 不溢出
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

impl PaginationQuery {
    /// 校验分页参数
    pub fn validate(&self) -> crate::errors::Result<()> {
        let mut errors = Vec::new();
        if !(1..=MAX_PAGE).contains(&self.page) {
            errors.push(format!("page must be between 1 and {MAX_PAGE}"));
        }
        if self.size < 1 || self.size > MAX_PAGE_SIZE {
            errors.push(format!("size must be between 1 and {MAX_PAGE_SIZE}"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(crate::errors::EduMatchError::Validation(errors))
        }
    }

    pub fn offset(&self) -> u64 {
        ((self.page - 1) * self.size) as u64
    }
}

impl PaginationInfo {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        Self {
            page,
            page_size,
            total,
            total_pages: (total + page_size - 1) / page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_accepts_string_numbers() {
        let query: PaginationQuery = serde_json::from_str(r#"{"page":"3","size":"20"}"#).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.size, 20);
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_query_defaults() {
        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_query_rejects_out_of_range() {
        let query = PaginationQuery { page: 0, size: 101 };
        match query.validate() {
            Err(crate::errors::EduMatchError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_query_rejects_huge_page() {
        let query = PaginationQuery {
            page: i64::MAX,
            size: MAX_PAGE_SIZE,
        };
        assert!(matches!(
            query.validate(),
            Err(crate::errors::EduMatchError::Validation(_))
        ));

        let last = PaginationQuery {
            page: MAX_PAGE,
            size: MAX_PAGE_SIZE,
        };
        assert!(last.validate().is_ok());
        assert_eq!(last.offset(), ((MAX_PAGE - 1) * MAX_PAGE_SIZE) as u64);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationInfo::new(1, 10, 21).total_pages, 3);
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 0);
    }
}
