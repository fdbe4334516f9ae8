/// Main application entry point for AUS Good Boss.
use crate::components::{review_form::ReviewForm, reviews_list::ReviewsList};
use crate::models::review::Review;
use crate::store::{HttpStore, ReviewStore};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/goodboss.css"/>
        <Title text="AUS Good Boss"/>
        <Router>
            <Routes>
                <Route path="" view=HomePage/>
            </Routes>
        </Router>
    }
}

/// The single page: owns the reviews snapshot signal and the store
/// subscription, and hosts the submission form inside a dismissible overlay.
#[component]
fn HomePage() -> impl IntoView {
    // Signal holding the current snapshot; fully replaced on every push.
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (show_form, set_show_form) = create_signal(false);

    let store: Rc<dyn ReviewStore> = Rc::new(HttpStore::new());

    // Effects only run in the browser, so the subscription never opens
    // during server rendering. Cleanup releases the live connection.
    let sub_store = store.clone();
    create_effect(move |_| {
        let subscription = sub_store.subscribe(Rc::new(move |snapshot| {
            set_reviews.set(snapshot);
        }));
        on_cleanup(move || subscription.unsubscribe());
    });

    let close_form = Callback::new(move |_| set_show_form.set(false));
    let form_store = store.clone();

    view! {
        <div class="page">
            <h1 class="page-title">{ "AUS Good Boss" }</h1>
            <button class="add-review-button" on:click=move |_| set_show_form.set(true)>
                { "Add a Review" }
            </button>
            { move || show_form.get().then(|| {
                let store = form_store.clone();
                view! {
                    <div class="modal-overlay">
                        <div class="modal">
                            <ReviewForm store=store on_close=close_form />
                            <button
                                class="modal-close"
                                on:click=move |_| set_show_form.set(false)
                            >
                                { "Close" }
                            </button>
                        </div>
                    </div>
                }
            }) }
            <ReviewsList reviews=reviews />
            <button class="floating-add-button" on:click=move |_| set_show_form.set(true)>
                { "+" }
            </button>
        </div>
    }
}
