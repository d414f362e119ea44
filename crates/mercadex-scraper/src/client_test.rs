use super::*;

fn client(base: &str) -> CatalogClient {
    CatalogClient::new(base, "mercadex-test/0.1", None).expect("client should build")
}

#[test]
fn categories_url_includes_lang_and_region() {
    let url = client("http://localhost:3000/api/mercadona")
        .categories_url("08001")
        .unwrap();
    assert_eq!(
        url,
        "http://localhost:3000/api/mercadona/categories/?lang=es&wh=08001"
    );
}

#[test]
fn category_url_renders_numeric_id() {
    let url = client("http://localhost:3000/api/mercadona")
        .category_url(&CatalogId::Number(112), "28001")
        .unwrap();
    assert_eq!(
        url,
        "http://localhost:3000/api/mercadona/categories/112?lang=es&wh=28001"
    );
}

#[test]
fn base_url_trailing_slash_is_ignored() {
    let url = client("http://localhost:3000/api/mercadona/")
        .categories_url("08001")
        .unwrap();
    assert_eq!(
        url,
        "http://localhost:3000/api/mercadona/categories/?lang=es&wh=08001"
    );
}

#[test]
fn region_is_query_encoded() {
    let url = client("http://localhost:3000/api")
        .categories_url("08 001&x=1")
        .unwrap();
    assert_eq!(
        url,
        "http://localhost:3000/api/categories/?lang=es&wh=08+001%26x%3D1"
    );
}

#[test]
fn new_rejects_invalid_base_url() {
    let result = CatalogClient::new("not-a-url", "mercadex-test/0.1", None);
    assert!(
        matches!(result, Err(ScraperError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn decode_reports_context_on_bad_json() {
    let err = decode::<CategoriesResponse>("not json", "category listing").unwrap_err();
    assert!(
        matches!(err, ScraperError::Deserialize { ref context, .. } if context == "category listing"),
        "expected Deserialize error, got: {err:?}"
    );
}

#[test]
fn fetch_categories_error_message_is_user_facing() {
    let err = ScraperError::FetchCategories {
        status: 404,
        url: "http://localhost/categories/".to_owned(),
    };
    assert_eq!(
        err.to_string(),
        "could not retrieve categories; check the region code"
    );
}
