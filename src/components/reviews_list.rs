use crate::components::review_card::ReviewCard;
use crate::models::review::Review;
use leptos::*;

/// The live feed: renders one card per review in the current snapshot. The
/// whole list re-renders when the snapshot signal is replaced; there is no
/// per-item diffing, matching the full-replacement delivery from the store.
#[component]
pub fn ReviewsList(reviews: ReadSignal<Vec<Review>>) -> impl IntoView {
    view! {
        <div class="review-card-container">
            {move || reviews.get().into_iter().map(|review| view! {
                <ReviewCard review=review />
            }).collect::<Vec<_>>() }
        </div>
    }
}
