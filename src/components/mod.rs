pub mod review_card;
pub mod review_form;
pub mod reviews_list;
