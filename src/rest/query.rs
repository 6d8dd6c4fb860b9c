//! List query parameters: `page`, `per_page`, `select`, `omit` and `filter`.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::config::CONFIG;
use crate::constants::{CODE_INVALID_PARAMETER, DEFAULT_PAGE_NUMBER, ERR_INVALID_PARAMETER_TYPE};
use crate::errors::ApiError;
use crate::rest::filter::{parse_filters, Filter};
use crate::rest::projection::Projection;
use crate::rest::schema::Resource;

/// Parameters shared by list and detail endpoints.
///
/// Parsed by hand from the query string because `select`, `omit` and
/// `filter` may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u64,
    pub per_page: u64,
    pub select: Vec<String>,
    pub omit: Vec<String>,
    pub filters: Vec<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: CONFIG.default_items_per_page.min(CONFIG.max_items_per_page),
            select: Vec::new(),
            omit: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl ListQuery {
    /// Parse a raw query string.
    ///
    /// `page` below 1 is raised to 1 and `per_page` is capped at
    /// `max_per_page`. Non-numeric values are rejected.
    pub fn parse(
        query_string: &str,
        default_per_page: u64,
        max_per_page: u64,
    ) -> Result<Self, ApiError> {
        let mut page = DEFAULT_PAGE_NUMBER;
        let mut per_page = default_per_page;
        let mut select = Vec::new();
        let mut omit = Vec::new();
        let mut filters = Vec::new();

        for (key, value) in url::form_urlencoded::parse(query_string.as_bytes()) {
            match key.as_ref() {
                "page" => page = parse_number(&value)?,
                "per_page" => per_page = parse_number(&value)?,
                "select" => select.extend(split_names(&value)),
                "omit" => omit.extend(split_names(&value)),
                "filter" => filters.push(value.into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            page: page.max(1),
            per_page: per_page.min(max_per_page),
            select,
            omit,
            filters,
        })
    }

    pub fn parsed_filters(&self) -> Vec<Filter> {
        parse_filters(&self.filters)
    }

    pub fn projection<R: Resource>(&self) -> Projection {
        Projection::for_resource::<R, String>(&self.select, &self.omit)
    }
}

fn parse_number(value: &str) -> Result<u64, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(CODE_INVALID_PARAMETER, ERR_INVALID_PARAMETER_TYPE))
}

fn split_names(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl FromRequest for ListQuery {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(ListQuery::parse(
            req.query_string(),
            CONFIG.default_items_per_page,
            CONFIG.max_items_per_page,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(qs: &str) -> Result<ListQuery, ApiError> {
        ListQuery::parse(qs, 25, 100)
    }

    #[test]
    fn test_defaults() {
        let q = parse("").unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 25);
        assert!(q.select.is_empty());
        assert!(q.filters.is_empty());
    }

    #[test]
    fn test_page_and_per_page() {
        let q = parse("page=3&per_page=10").unwrap();
        assert_eq!(q.page, 3);
        assert_eq!(q.per_page, 10);
    }

    #[test]
    fn test_per_page_is_capped() {
        assert_eq!(parse("per_page=500").unwrap().per_page, 100);
    }

    #[test]
    fn test_page_zero_is_raised() {
        assert_eq!(parse("page=0").unwrap().page, 1);
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        assert!(matches!(parse("page=abc"), Err(ApiError::BadRequest { .. })));
        assert!(matches!(parse("per_page=-1"), Err(ApiError::BadRequest { .. })));
    }

    #[test]
    fn test_repeated_and_comma_separated_names() {
        let q = parse("select=name,cuit&select=bcra_code&omit=cuit").unwrap();
        assert_eq!(q.select, vec!["name", "cuit", "bcra_code"]);
        assert_eq!(q.omit, vec!["cuit"]);
    }

    #[test]
    fn test_repeated_filters_are_decoded() {
        let q = parse("filter=name%3Acontains%3Aacme&filter=number:gt:3").unwrap();
        assert_eq!(q.filters, vec!["name:contains:acme", "number:gt:3"]);
        assert_eq!(q.parsed_filters().len(), 2);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        assert!(parse("year=2015&month=3").is_ok());
    }
}
