use crate::models::review::Review;
use leptos::html::Div;
use leptos::*;

/// Rendered comment area taller than this is truncated behind the
/// disclosure control.
pub const CARD_MAX_HEIGHT_PX: i32 = 320;

/// Per-card view state for the truncated-comment toggle. Purely local: not
/// derived from the review, not persisted, reset when the card goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disclosure {
    #[default]
    Collapsed,
    Expanded,
}

impl Disclosure {
    pub fn toggle(self) -> Self {
        match self {
            Disclosure::Collapsed => Disclosure::Expanded,
            Disclosure::Expanded => Disclosure::Collapsed,
        }
    }

    pub fn control_label(self) -> &'static str {
        match self {
            Disclosure::Collapsed => "Read More",
            Disclosure::Expanded => "Collapse",
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Disclosure::Expanded
    }
}

/// One review as an independent card: all six fields, the state badge tinted
/// with its jurisdiction colour, and the collapse/expand control when the
/// content overflows the height threshold.
#[component]
pub fn ReviewCard(review: Review) -> impl IntoView {
    let (disclosure, set_disclosure) = create_signal(Disclosure::default());
    let (overflowing, set_overflowing) = create_signal(false);
    let content_ref = create_node_ref::<Div>();

    // measure once the content is in the DOM
    create_effect(move |_| {
        if let Some(node) = content_ref.get() {
            set_overflowing.set(node.scroll_height() > CARD_MAX_HEIGHT_PX);
        }
    });

    let content_style = move || {
        if disclosure.get().is_expanded() {
            "max-height: none; overflow: visible;".to_string()
        } else {
            format!("max-height: {}px; overflow: hidden;", CARD_MAX_HEIGHT_PX)
        }
    };

    view! {
        <div class="review-card">
            <div class="review-card-content" node_ref=content_ref style=content_style>
                <div class="review-card-header">
                    <span
                        class="state-badge"
                        style=format!("background-color: {};", review.state.color())
                    >
                        { review.state.code() }
                    </span>
                    <span class="review-location">{ review.location.clone() }</span>
                </div>
                <div class="review-last-year">
                    { format!("Last Year Worked: {}", review.last_year_worked) }
                </div>
                <div class="review-workplace">{ review.workplace_name.clone() }</div>
                <div class="review-job-title">{ review.job_title.clone() }</div>
                <div class="review-comment">{ review.comment.clone() }</div>
            </div>
            { move || overflowing.get().then(|| view! {
                <button
                    class="disclosure-toggle"
                    class:expanded=move || disclosure.get().is_expanded()
                    on:click=move |_| set_disclosure.update(|d| *d = d.toggle())
                >
                    { move || disclosure.get().control_label() }
                </button>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disclosure_starts_collapsed() {
        assert_eq!(Disclosure::default(), Disclosure::Collapsed);
        assert_eq!(Disclosure::default().control_label(), "Read More");
        assert!(!Disclosure::default().is_expanded());
    }

    #[test]
    fn toggle_walks_both_transitions() {
        let expanded = Disclosure::Collapsed.toggle();
        assert_eq!(expanded, Disclosure::Expanded);
        assert_eq!(expanded.control_label(), "Collapse");

        let collapsed = expanded.toggle();
        assert_eq!(collapsed, Disclosure::Collapsed);
        assert_eq!(collapsed.control_label(), "Read More");
    }
}
