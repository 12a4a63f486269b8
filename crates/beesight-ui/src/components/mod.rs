pub mod badge;
pub mod delete_button;
pub mod field;
pub mod header;
pub mod nav;
pub mod pagination;
pub mod search_bar;
pub mod toast;
