//! Category and Product API HTTP Handler Tests

use super::{
    build_test_router, delete_json, get_json, patch_json, post_json, TestAppState,
};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use shopcart_core::domain::{Category, Product};
use std::str::FromStr;

async fn signed_in() -> (TestAppState, String) {
    let state = TestAppState::new();
    let (_, token) = state.add_user("a@example.com", "alice", "pw").await;
    (state, token)
}

async fn add_product(state: &TestAppState, name: &str, category_id: i64) -> Product {
    state
        .store
        .add_product(Product {
            name: name.to_string(),
            price: Decimal::from_str("9.99").unwrap(),
            category_id,
            ..Default::default()
        })
        .await
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_create_category_returns_201() {
    let (state, token) = signed_in().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Category>) =
        post_json(&app, "/api/categories", &token, &json!({"name": "Books"})).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap().name, "Books");
}

#[tokio::test]
async fn test_create_duplicate_category_returns_409() {
    let (state, token) = signed_in().await;
    state.store.add_category("Books").await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app, "/api/categories", &token, &json!({"name": "Books"})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["message"], "Category 'Books' already exists");
}

#[tokio::test]
async fn test_list_categories_paginates() {
    let (state, token) = signed_in().await;
    for i in 1..=5 {
        state.store.add_category(&format!("Category {}", i)).await;
    }
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Vec<Category>>) =
        get_json(&app, "/api/categories?skip=1&limit=2", &token).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = body.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Category 2", "Category 3"]);
}

#[tokio::test]
async fn test_list_categories_default_limit_is_ten() {
    let (state, token) = signed_in().await;
    for i in 1..=12 {
        state.store.add_category(&format!("Category {}", i)).await;
    }
    let app = build_test_router(state);

    let (_, body): (StatusCode, Option<Vec<Category>>) =
        get_json(&app, "/api/categories", &token).await;

    assert_eq!(body.unwrap().len(), 10);
}

#[tokio::test]
async fn test_list_categories_rejects_out_of_range_pagination() {
    let (state, token) = signed_in().await;
    let app = build_test_router(state);

    for query in ["limit=0", "limit=51", "skip=-1", "limit=abc"] {
        let (status, _): (StatusCode, Option<Value>) =
            get_json(&app, &format!("/api/categories?{}", query), &token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {}", query);
    }
}

#[tokio::test]
async fn test_get_missing_category_returns_404() {
    let (state, token) = signed_in().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        get_json(&app, "/api/categories/404", &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Category 404 not found");
}

#[tokio::test]
async fn test_get_category_non_numeric_id_returns_400() {
    let (state, token) = signed_in().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/categories/abc", &token).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_category() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let app = build_test_router(state);

    let path = format!("/api/categories/{}", category.id);
    let (status, body): (StatusCode, Option<Category>) =
        patch_json(&app, &path, &token, &json!({"name": "Novels"})).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.id, category.id);
    assert_eq!(body.name, "Novels");
}

#[tokio::test]
async fn test_rename_category_to_existing_name_returns_409() {
    let (state, token) = signed_in().await;
    state.store.add_category("Books").await;
    let games = state.store.add_category("Games").await;
    let app = build_test_router(state);

    let path = format!("/api/categories/{}", games.id);
    let (status, _): (StatusCode, Option<Value>) =
        patch_json(&app, &path, &token, &json!({"name": "Books"})).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_empty_category() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let app = build_test_router(state);

    let path = format!("/api/categories/{}", category.id);
    let (status, body): (StatusCode, Option<Value>) = delete_json(&app, &path, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "Category deleted successfully");

    let (status, _): (StatusCode, Option<Value>) = get_json(&app, &path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_category_with_products_returns_409() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    add_product(&state, "Dune", category.id).await;
    let app = build_test_router(state);

    let path = format!("/api/categories/{}", category.id);
    let (status, body): (StatusCode, Option<Value>) = delete_json(&app, &path, &token).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body.unwrap()["message"],
        format!("Category {} still has products", category.id)
    );
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_create_product_returns_201() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/products",
        &token,
        &json!({
            "name": "Dune",
            "description": "Desert planet",
            "price": "9.99",
            "category_id": category.id
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body["name"], "Dune");
    assert_eq!(body["description"], "Desert planet");
    assert_eq!(body["price"], "9.99");
    assert_eq!(body["category_id"], category.id);
}

#[tokio::test]
async fn test_create_product_unknown_category_returns_404() {
    let (state, token) = signed_in().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/products",
        &token,
        &json!({"name": "Dune", "price": "9.99", "category_id": 777}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Category 777 not found");
}

#[tokio::test]
async fn test_create_product_negative_price_returns_422() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/products",
        &token,
        &json!({"name": "Dune", "price": "-1.00", "category_id": category.id}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_product_partial_fields() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let product = state
        .store
        .add_product(Product {
            name: "Dune".to_string(),
            description: Some("Desert planet".to_string()),
            price: Decimal::from_str("9.99").unwrap(),
            category_id: category.id,
            ..Default::default()
        })
        .await;
    let app = build_test_router(state);

    let path = format!("/api/products/{}", product.id);
    let (status, body): (StatusCode, Option<Value>) =
        patch_json(&app, &path, &token, &json!({"price": "12.50"})).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["name"], "Dune");
    assert_eq!(body["description"], "Desert planet");
    assert_eq!(body["price"], "12.50");
}

#[tokio::test]
async fn test_update_product_clears_description_with_null() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let product = state
        .store
        .add_product(Product {
            name: "Dune".to_string(),
            description: Some("Desert planet".to_string()),
            category_id: category.id,
            ..Default::default()
        })
        .await;
    let app = build_test_router(state);

    let path = format!("/api/products/{}", product.id);
    let (status, body): (StatusCode, Option<Value>) =
        patch_json(&app, &path, &token, &json!({"description": null})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap()["description"].is_null());
}

#[tokio::test]
async fn test_update_product_to_unknown_category_returns_404() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let product = add_product(&state, "Dune", category.id).await;
    let app = build_test_router(state);

    let path = format!("/api/products/{}", product.id);
    let (status, _): (StatusCode, Option<Value>) =
        patch_json(&app, &path, &token, &json!({"category_id": 4242})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    add_product(&state, "Dune", category.id).await;
    add_product(&state, "Emma", category.id).await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Vec<Product>>) =
        get_json(&app, "/api/products", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_product_removes_cart_lines() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let product = add_product(&state, "Dune", category.id).await;
    let cart = state.store.add_cart(1).await;
    state.store.add_cart_item(cart.id, product.id, 2).await;
    let app = build_test_router(state.clone());

    let path = format!("/api/products/{}", product.id);
    let (status, body): (StatusCode, Option<Value>) = delete_json(&app, &path, &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "Product deleted successfully");
    assert_eq!(state.store.cart_item_count().await, 0);
}

#[tokio::test]
async fn test_delete_missing_product_returns_404() {
    let (state, token) = signed_in().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/products/12345", &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product_with_stored_values_writes_nothing() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let product = add_product(&state, "Dune", category.id).await;
    let app = build_test_router(state.clone());

    let path = format!("/api/products/{}", product.id);
    let (status, body): (StatusCode, Option<Value>) = patch_json(
        &app,
        &path,
        &token,
        &json!({"name": "Dune", "price": "9.990", "category_id": category.id}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["name"], "Dune");
    assert_eq!(state.store.write_count(), 0);
}

#[tokio::test]
async fn test_update_product_price_out_of_range_returns_422() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let product = add_product(&state, "Dune", category.id).await;
    let app = build_test_router(state.clone());

    let path = format!("/api/products/{}", product.id);
    for price in ["100000000.00", "0.001"] {
        let (status, _): (StatusCode, Option<Value>) =
            patch_json(&app, &path, &token, &json!({"price": price})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "price {}", price);
    }
    assert_eq!(state.store.write_count(), 0);
}

#[tokio::test]
async fn test_rename_category_to_own_name_writes_nothing() {
    let (state, token) = signed_in().await;
    let category = state.store.add_category("Books").await;
    let app = build_test_router(state.clone());

    let path = format!("/api/categories/{}", category.id);
    let (status, body): (StatusCode, Option<Category>) =
        patch_json(&app, &path, &token, &json!({"name": "Books"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().name, "Books");
    assert_eq!(state.store.write_count(), 0);
}

#[tokio::test]
async fn test_delete_missing_category_returns_404() {
    let (state, token) = signed_in().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/categories/404", &token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Category 404 not found");
}
