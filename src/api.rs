#[cfg(feature = "ssr")]
use crate::db::Database;
#[cfg(feature = "ssr")]
use crate::models::review::Review;
#[cfg(feature = "ssr")]
use actix_web::{web, HttpResponse};
#[cfg(feature = "ssr")]
use leptos::logging::log;
#[cfg(feature = "ssr")]
use serde_json::json;
#[cfg(feature = "ssr")]
use std::sync::Arc;
#[cfg(feature = "ssr")]
use tokio::sync::Mutex;
#[cfg(feature = "ssr")]
use uuid::Uuid;

#[cfg(feature = "ssr")]
pub async fn get_reviews(db: web::Data<Arc<Mutex<Database>>>) -> HttpResponse {
    let db = db.lock().await;
    match db.get_reviews().await {
        Ok(reviews) => {
            log!("[API] Returning {} reviews", reviews.len());
            HttpResponse::Ok().json(reviews)
        }
        Err(err) => {
            leptos::logging::error!("[API] Failed to fetch reviews: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch reviews")
        }
    }
}

// The store does no re-validation of its own: the body is type-checked by
// serde and written as-is, the same trust the original placed in its hosted
// collection.
#[cfg(feature = "ssr")]
pub async fn create_review(
    db: web::Data<Arc<Mutex<Database>>>,
    review: web::Json<Review>,
) -> HttpResponse {
    let db = db.lock().await;
    let review = review.into_inner();
    let id = Uuid::new_v4().to_string();
    log!(
        "[API] Received review for workplace '{}' ({})",
        review.workplace_name,
        review.state.code()
    );

    match db.insert_review(&id, &review).await {
        Ok(_) => {
            log!("[API] Successfully saved review ID: {}", id);
            HttpResponse::Ok().json(json!({ "id": id }))
        }
        Err(e) => {
            leptos::logging::error!("[API] Database error: {:?}", e);
            HttpResponse::InternalServerError().body(format!("Database error: {}", e))
        }
    }
}
