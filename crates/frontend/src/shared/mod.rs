pub mod search_form;
