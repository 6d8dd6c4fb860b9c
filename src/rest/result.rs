//! Assembly of list envelopes and single-item responses.

use std::future::Future;

use log::debug;
use mongodb::bson::Document;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::rest::filter::{apply_filters, create_filters};
use crate::rest::pagination::{offset, Pagination};
use crate::rest::projection::Projection;
use crate::rest::query::ListQuery;
use crate::rest::schema::Resource;

/// A filtered collection that can be counted and read one page at a time.
pub trait ListSource {
    type Item: Resource;

    fn count(&self, filter: Document) -> impl Future<Output = Result<u64, ApiError>>;

    fn fetch(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Self::Item>, ApiError>>;
}

/// Envelope returned by every list endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListEnvelope {
    /// Total number of matching records
    pub num_results: u64,
    /// Current page number
    pub page: u64,
    /// Total number of pages
    pub num_pages: u64,
    /// Serialized records of the current page
    #[schema(value_type = Vec<Object>)]
    pub objects: Vec<Value>,
}

impl ListEnvelope {
    fn from_pagination<T: Serialize>(
        result: Pagination<T>,
        projection: &Projection,
    ) -> Result<Self, ApiError> {
        let num_pages = result.pages();
        let objects = result
            .items
            .iter()
            .map(|item| serialize(item, projection))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            num_results: result.total,
            page: result.page,
            num_pages,
            objects,
        })
    }
}

/// Build the list envelope for a database-backed collection.
///
/// Request filters are combined with `base` before counting, so the total
/// reflects the filtered set.
pub async fn build_result<S: ListSource>(
    source: &S,
    base: Document,
    query: &ListQuery,
) -> Result<ListEnvelope, ApiError> {
    let projection = query.projection::<S::Item>();
    let predicates = create_filters(&query.parsed_filters(), S::Item::FIELDS);
    let filter = apply_filters(base, predicates);
    debug!("Building list result with filter: {:?}", filter);

    let total = source.count(filter.clone()).await?;
    let skip = offset(query.page, query.per_page);

    // A zero limit means "no limit" to the driver.
    let items = if query.per_page == 0 || skip >= total {
        Vec::new()
    } else {
        let limit = i64::try_from(query.per_page).unwrap_or(i64::MAX);
        source.fetch(filter, skip, limit).await?
    };

    ListEnvelope::from_pagination(
        Pagination::from_page(items, total, query.page, query.per_page),
        &projection,
    )
}

/// Build the list envelope for a collection computed in memory.
pub fn build_collection<T: Resource>(
    items: Vec<T>,
    query: &ListQuery,
) -> Result<ListEnvelope, ApiError> {
    let projection = query.projection::<T>();
    ListEnvelope::from_pagination(
        Pagination::from_items(items, query.page, query.per_page),
        &projection,
    )
}

/// Serialize a single record honouring `select`/`omit`.
pub fn build_item<T: Resource>(item: &T, query: &ListQuery) -> Result<Value, ApiError> {
    serialize(item, &query.projection::<T>())
}

fn serialize<T: Serialize>(item: &T, projection: &Projection) -> Result<Value, ApiError> {
    Ok(projection.apply(serde_json::to_value(item)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::schema::{FieldDescriptor, FieldKind};
    use mongodb::bson::doc;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Debug, Clone, Serialize)]
    struct Bank {
        id: u32,
        name: String,
        cuit: Option<String>,
    }

    impl Resource for Bank {
        const FIELDS: &'static [FieldDescriptor] = &[
            FieldDescriptor::stored_as("id", "_id", FieldKind::Integer),
            FieldDescriptor::new("name", FieldKind::String),
            FieldDescriptor::new("cuit", FieldKind::String),
        ];
    }

    /// Keeps the banks in memory and records the filters it was asked for.
    struct FakeBanks {
        banks: Vec<Bank>,
        seen: RefCell<Vec<Document>>,
        fetches: RefCell<u32>,
    }

    impl FakeBanks {
        fn new(names: &[&str]) -> Self {
            let banks = names
                .iter()
                .enumerate()
                .map(|(i, name)| Bank {
                    id: i as u32 + 1,
                    name: name.to_string(),
                    cuit: None,
                })
                .collect();
            Self {
                banks,
                seen: RefCell::new(Vec::new()),
                fetches: RefCell::new(0),
            }
        }

        fn matching(&self, filter: &Document) -> Vec<Bank> {
            match filter.get_str("name") {
                Ok(name) => self
                    .banks
                    .iter()
                    .filter(|b| b.name == name)
                    .cloned()
                    .collect(),
                Err(_) => self.banks.clone(),
            }
        }
    }

    impl ListSource for FakeBanks {
        type Item = Bank;

        async fn count(&self, filter: Document) -> Result<u64, ApiError> {
            self.seen.borrow_mut().push(filter.clone());
            Ok(self.matching(&filter).len() as u64)
        }

        async fn fetch(
            &self,
            filter: Document,
            skip: u64,
            limit: i64,
        ) -> Result<Vec<Bank>, ApiError> {
            *self.fetches.borrow_mut() += 1;
            Ok(self
                .matching(&filter)
                .into_iter()
                .skip(skip as usize)
                .take(limit as usize)
                .collect())
        }
    }

    fn query(qs: &str) -> ListQuery {
        ListQuery::parse(qs, 25, 100).unwrap()
    }

    #[actix_web::test]
    async fn test_envelope_for_full_collection() {
        let source = FakeBanks::new(&["bna1", "bna2", "bna3"]);
        let result = build_result(&source, doc! {}, &query("")).await.unwrap();
        assert_eq!(result.num_results, 3);
        assert_eq!(result.page, 1);
        assert_eq!(result.num_pages, 1);
        assert_eq!(
            result.objects,
            vec![
                json!({ "id": 1, "name": "bna1", "cuit": null }),
                json!({ "id": 2, "name": "bna2", "cuit": null }),
                json!({ "id": 3, "name": "bna3", "cuit": null }),
            ]
        );
    }

    #[actix_web::test]
    async fn test_out_of_range_page() {
        let source = FakeBanks::new(&["a", "b", "c"]);
        let result = build_result(&source, doc! {}, &query("page=100"))
            .await
            .unwrap();
        assert!(result.objects.is_empty());
        assert_eq!(result.num_results, 3);
        assert_eq!(*source.fetches.borrow(), 0);
    }

    #[actix_web::test]
    async fn test_zero_page_size_never_fetches() {
        let source = FakeBanks::new(&["a", "b", "c"]);
        let result = build_result(&source, doc! {}, &query("per_page=0"))
            .await
            .unwrap();
        assert!(result.objects.is_empty());
        assert_eq!(result.num_pages, 0);
        assert_eq!(*source.fetches.borrow(), 0);
    }

    #[actix_web::test]
    async fn test_second_page() {
        let source = FakeBanks::new(&["a", "b", "c"]);
        let result = build_result(&source, doc! {}, &query("page=2&per_page=2"))
            .await
            .unwrap();
        assert_eq!(result.num_pages, 2);
        assert_eq!(result.objects.len(), 1);
        assert_eq!(result.objects[0]["name"], "c");
    }

    #[actix_web::test]
    async fn test_filter_reaches_the_source() {
        let source = FakeBanks::new(&["a", "b", "c"]);
        let result = build_result(&source, doc! {}, &query("filter=name:b"))
            .await
            .unwrap();
        assert_eq!(source.seen.borrow()[0], doc! { "name": "b" });
        assert_eq!(result.num_results, 1);
        assert_eq!(result.objects[0]["name"], "b");
    }

    #[actix_web::test]
    async fn test_unknown_operator_leaves_result_unfiltered() {
        let source = FakeBanks::new(&["a", "b", "c"]);
        let result = build_result(&source, doc! {}, &query("filter=name:badop:x"))
            .await
            .unwrap();
        assert_eq!(source.seen.borrow()[0], doc! {});
        assert_eq!(result.num_results, 3);
    }

    #[actix_web::test]
    async fn test_base_filter_is_kept() {
        let source = FakeBanks::new(&["a"]);
        build_result(&source, doc! { "supplier_id": 7 }, &query("filter=name:a"))
            .await
            .unwrap();
        assert_eq!(
            source.seen.borrow()[0],
            doc! { "$and": [{ "supplier_id": 7 }, { "name": "a" }] }
        );
    }

    #[actix_web::test]
    async fn test_projection_on_list() {
        let source = FakeBanks::new(&["a", "b"]);
        let result = build_result(&source, doc! {}, &query("select=name"))
            .await
            .unwrap();
        assert_eq!(result.objects[0], json!({ "id": 1, "name": "a" }));
    }

    #[test]
    fn test_single_item_is_bare_object() {
        let bank = Bank {
            id: 9,
            name: "bna".to_string(),
            cuit: Some("30500010912".to_string()),
        };
        assert_eq!(
            build_item(&bank, &query("omit=name")).unwrap(),
            json!({ "id": 9, "cuit": "30500010912" })
        );
    }

    #[test]
    fn test_in_memory_collection() {
        let banks = FakeBanks::new(&["a", "b", "c", "d"]).banks;
        let result = build_collection(banks, &query("per_page=3&page=2")).unwrap();
        assert_eq!(result.num_results, 4);
        assert_eq!(result.num_pages, 2);
        assert_eq!(result.objects, vec![json!({ "id": 4, "name": "d", "cuit": null })]);
    }
}
