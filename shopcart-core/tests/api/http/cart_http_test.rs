//! Cart and Cart Item API HTTP Handler Tests

use super::{
    build_test_router, delete_json, get_json, patch_json, post_json, TestAppState,
};
use axum::http::StatusCode;
use serde_json::{json, Value};
use shopcart_core::domain::{CartItem, CartWithItems, Product};

struct Fixture {
    state: TestAppState,
    user_id: i64,
    token: String,
    product: Product,
}

async fn fixture() -> Fixture {
    let state = TestAppState::new();
    let (user, token) = state.add_user("a@example.com", "alice", "pw").await;
    let category = state.store.add_category("Books").await;
    let product = state
        .store
        .add_product(Product {
            name: "Dune".to_string(),
            category_id: category.id,
            ..Default::default()
        })
        .await;
    Fixture {
        state,
        user_id: user.id,
        token,
        product,
    }
}

// ============================================================================
// Carts
// ============================================================================

#[tokio::test]
async fn test_create_cart_returns_201_with_no_items() {
    let f = fixture().await;
    let app = build_test_router(f.state);

    let (status, body): (StatusCode, Option<CartWithItems>) =
        post_json(&app, "/api/cart", &f.token, &json!({})).await;

    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body.cart.user_id, f.user_id);
    assert!(body.items.is_empty());
}

#[tokio::test]
async fn test_second_cart_returns_409() {
    let f = fixture().await;
    f.state.store.add_cart(f.user_id).await;
    let app = build_test_router(f.state.clone());

    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app, "/api/cart", &f.token, &json!({})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["message"], "User already has a cart");
    assert_eq!(f.state.store.cart_count().await, 1);
}

#[tokio::test]
async fn test_get_own_cart_includes_items() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    f.state.store.add_cart_item(cart.id, f.product.id, 3).await;
    let app = build_test_router(f.state);

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/api/cart", &f.token).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["id"], cart.id);
    assert_eq!(body["user_id"], f.user_id);
    assert_eq!(body["items"][0]["product_id"], f.product.id);
    assert_eq!(body["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_get_cart_without_cart_returns_404() {
    let f = fixture().await;
    let app = build_test_router(f.state);

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/api/cart", &f.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Cart not found");
}

#[tokio::test]
async fn test_delete_own_cart_removes_items() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    f.state.store.add_cart_item(cart.id, f.product.id, 1).await;
    let app = build_test_router(f.state.clone());

    let (status, body): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/cart", &f.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "Cart deleted successfully");
    assert_eq!(f.state.store.cart_count().await, 0);
    assert_eq!(f.state.store.cart_item_count().await, 0);
}

#[tokio::test]
async fn test_delete_cart_without_cart_returns_404() {
    let f = fixture().await;
    let app = build_test_router(f.state);

    let (status, _): (StatusCode, Option<Value>) = delete_json(&app, "/api/cart", &f.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_cart_items_paginates() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    for quantity in 1..=4 {
        f.state.store.add_cart_item(cart.id, f.product.id, quantity).await;
    }
    let app = build_test_router(f.state);

    let path = format!("/api/cart/items/{}?skip=1&limit=2", cart.id);
    let (status, body): (StatusCode, Option<Vec<CartItem>>) =
        get_json(&app, &path, &f.token).await;

    assert_eq!(status, StatusCode::OK);
    let quantities: Vec<i32> = body.unwrap().iter().map(|i| i.quantity).collect();
    assert_eq!(quantities, vec![2, 3]);
}

#[tokio::test]
async fn test_list_items_of_missing_cart_returns_404() {
    let f = fixture().await;
    let app = build_test_router(f.state);

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/cart/items/999", &f.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart items
// ============================================================================

#[tokio::test]
async fn test_create_cart_item_defaults_quantity_to_one() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    let app = build_test_router(f.state);

    let path = format!("/api/cartItems/{}", cart.id);
    let (status, body): (StatusCode, Option<CartItem>) =
        post_json(&app, &path, &f.token, &json!({"product_id": f.product.id})).await;

    assert_eq!(status, StatusCode::CREATED);
    let item = body.unwrap();
    assert_eq!(item.cart_id, cart.id);
    assert_eq!(item.product_id, f.product.id);
    assert_eq!(item.quantity, 1);
}

#[tokio::test]
async fn test_create_cart_item_in_foreign_cart_returns_404() {
    let f = fixture().await;
    let (other, _) = f.state.add_user("b@example.com", "bob", "pw").await;
    let foreign = f.state.store.add_cart(other.id).await;
    let app = build_test_router(f.state.clone());

    let path = format!("/api/cartItems/{}", foreign.id);
    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app, &path, &f.token, &json!({"product_id": f.product.id})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body.unwrap()["message"],
        "Cart not found or does not belong to user"
    );
    assert_eq!(f.state.store.cart_item_count().await, 0);
}

#[tokio::test]
async fn test_create_cart_item_unknown_product_returns_404() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    let app = build_test_router(f.state);

    let path = format!("/api/cartItems/{}", cart.id);
    let (status, body): (StatusCode, Option<Value>) =
        post_json(&app, &path, &f.token, &json!({"product_id": 31337})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Product not found");
}

#[tokio::test]
async fn test_create_cart_item_zero_quantity_returns_422() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    let app = build_test_router(f.state);

    let path = format!("/api/cartItems/{}", cart.id);
    let (status, _): (StatusCode, Option<Value>) = post_json(
        &app,
        &path,
        &f.token,
        &json!({"product_id": f.product.id, "quantity": 0}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_and_update_cart_item() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    let item = f.state.store.add_cart_item(cart.id, f.product.id, 1).await;
    let app = build_test_router(f.state);

    let path = format!("/api/cartItems/{}", item.id);
    let (status, body): (StatusCode, Option<CartItem>) =
        patch_json(&app, &path, &f.token, &json!({"quantity": 5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().quantity, 5);

    let (status, body): (StatusCode, Option<CartItem>) = get_json(&app, &path, &f.token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().quantity, 5);
}

#[tokio::test]
async fn test_update_missing_cart_item_returns_404() {
    let f = fixture().await;
    let app = build_test_router(f.state);

    let (status, body): (StatusCode, Option<Value>) =
        patch_json(&app, "/api/cartItems/999", &f.token, &json!({"quantity": 2})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Cart item not found");
}

#[tokio::test]
async fn test_delete_own_cart_item() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    let item = f.state.store.add_cart_item(cart.id, f.product.id, 1).await;
    let app = build_test_router(f.state.clone());

    let path = format!("/api/cartItems/{}", item.id);
    let (status, body): (StatusCode, Option<Value>) = delete_json(&app, &path, &f.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["message"], "Cart item deleted successfully");
    assert_eq!(f.state.store.cart_item_count().await, 0);
}

#[tokio::test]
async fn test_delete_foreign_cart_item_returns_404() {
    let f = fixture().await;
    let (other, _) = f.state.add_user("b@example.com", "bob", "pw").await;
    let foreign = f.state.store.add_cart(other.id).await;
    let item = f.state.store.add_cart_item(foreign.id, f.product.id, 1).await;
    let app = build_test_router(f.state.clone());

    let path = format!("/api/cartItems/{}", item.id);
    let (status, _): (StatusCode, Option<Value>) = delete_json(&app, &path, &f.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(f.state.store.cart_item_count().await, 1);
}

#[tokio::test]
async fn test_update_cart_item_same_quantity_writes_nothing() {
    let f = fixture().await;
    let cart = f.state.store.add_cart(f.user_id).await;
    let item = f.state.store.add_cart_item(cart.id, f.product.id, 3).await;
    let app = build_test_router(f.state.clone());

    let path = format!("/api/cartItems/{}", item.id);
    for _ in 0..2 {
        let (status, body): (StatusCode, Option<CartItem>) =
            patch_json(&app, &path, &f.token, &json!({"quantity": 3})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.unwrap().quantity, 3);
    }
    assert_eq!(f.state.store.write_count(), 0);
}

#[tokio::test]
async fn test_create_cart_item_in_missing_cart_returns_404() {
    let f = fixture().await;
    let app = build_test_router(f.state.clone());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/api/cartItems/4242",
        &f.token,
        &json!({"product_id": f.product.id}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body.unwrap()["message"],
        "Cart not found or does not belong to user"
    );
    assert_eq!(f.state.store.cart_item_count().await, 0);
}

#[tokio::test]
async fn test_delete_missing_cart_item_returns_404() {
    let f = fixture().await;
    let app = build_test_router(f.state);

    let (status, body): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/cartItems/999", &f.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap()["message"], "Cart item not found");
}
