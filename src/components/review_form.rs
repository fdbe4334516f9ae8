use crate::store::ReviewStore;
use crate::validation::{self, Field, ReviewDraft, ValidationErrors};
use leptos::ev::SubmitEvent;
use leptos::logging::{error, log};
use leptos::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

/// The review submission form: six controls, schema validation before any
/// write, exactly one create call per accepted submission. On success every
/// control resets to its default and the hosting overlay is asked to close;
/// on a store failure the entered values stay put so the user can retry.
#[component]
pub fn ReviewForm(
    store: Rc<dyn ReviewStore>,
    #[prop(optional, into)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    let year_now = validation::current_year();

    let (state_code, set_state_code) = create_signal(String::new());
    let (location, set_location) = create_signal(String::new());
    let (workplace_name, set_workplace_name) = create_signal(String::new());
    let (job_title, set_job_title) = create_signal(String::new());
    let (last_year_worked, set_last_year_worked) = create_signal(year_now.to_string());
    let (comment, set_comment) = create_signal(String::new());
    let (errors, set_errors) = create_signal(ValidationErrors::default());
    // serializes submissions per form instance: no second create while one
    // is in flight
    let (submitting, set_submitting) = create_signal(false);

    let field_error = move |field: Field| {
        errors.with(|e| e.message(field).map(|m| m.to_string()))
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }

        let draft = ReviewDraft {
            state: state_code.get(),
            location: location.get(),
            workplace_name: workplace_name.get(),
            job_title: job_title.get(),
            last_year_worked: last_year_worked.get(),
            comment: comment.get(),
        };

        let review = match validation::validate(&draft) {
            Ok(review) => review,
            Err(validation_errors) => {
                set_errors.set(validation_errors);
                return;
            }
        };

        set_errors.set(ValidationErrors::default());
        set_submitting.set(true);

        let store = store.clone();
        spawn_local(async move {
            match store.create_review(review).await {
                Ok(id) => {
                    log!("Review submitted with ID: {}", id);
                    // Reset values
                    set_state_code.set(String::new());
                    set_location.set(String::new());
                    set_workplace_name.set(String::new());
                    set_job_title.set(String::new());
                    set_last_year_worked.set(year_now.to_string());
                    set_comment.set(String::new());
                    set_submitting.set(false);
                    if let Some(on_close) = on_close {
                        on_close.call(());
                    }
                }
                Err(err) => {
                    // diagnostic channel only; entered values are kept
                    error!("Error adding review: {}", err);
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <label>
                { "State" }
                <select
                    prop:value=move || state_code.get()
                    on:change=move |e| set_state_code.set(event_target_value(&e))
                >
                    <option value="" disabled=true selected=true>{ "Select a state" }</option>
                    {crate::models::review::Jurisdiction::ALL.iter().map(|j| view! {
                        <option value={j.code()}>{ j.label() }</option>
                    }).collect::<Vec<_>>() }
                </select>
                { move || field_error(Field::State).map(|m| view! { <span class="field-error">{m}</span> }) }
            </label>
            <label>
                { "Location" }
                <input
                    type="text"
                    placeholder="e.g. Sydney CBD"
                    prop:value=move || location.get()
                    on:input=move |e| set_location.set(event_target_value(&e))
                />
                { move || field_error(Field::Location).map(|m| view! { <span class="field-error">{m}</span> }) }
            </label>
            <label>
                { "Workplace Name" }
                <input
                    type="text"
                    placeholder="e.g. ABC Company"
                    prop:value=move || workplace_name.get()
                    on:input=move |e| set_workplace_name.set(event_target_value(&e))
                />
                { move || field_error(Field::WorkplaceName).map(|m| view! { <span class="field-error">{m}</span> }) }
            </label>
            <label>
                { "Job Title" }
                <input
                    type="text"
                    placeholder="e.g. Software Engineer"
                    prop:value=move || job_title.get()
                    on:input=move |e| set_job_title.set(event_target_value(&e))
                />
                { move || field_error(Field::JobTitle).map(|m| view! { <span class="field-error">{m}</span> }) }
            </label>
            <label>
                { "Last Year Worked" }
                <input
                    type="number"
                    prop:value=move || last_year_worked.get()
                    on:input=move |e| set_last_year_worked.set(event_target_value(&e))
                />
                { move || field_error(Field::LastYearWorked).map(|m| view! { <span class="field-error">{m}</span> }) }
            </label>
            <label>
                { "Comment" }
                <textarea
                    placeholder="Share your experience..."
                    prop:value=move || comment.get()
                    on:input=move |e| set_comment.set(event_target_value(&e))
                />
                { move || field_error(Field::Comment).map(|m| view! { <span class="field-error">{m}</span> }) }
            </label>
            <button type="submit" disabled=move || submitting.get()>{ "Submit" }</button>
        </form>
    }
}
