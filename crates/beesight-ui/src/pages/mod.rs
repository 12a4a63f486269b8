pub mod app_form;
pub mod app_list;
pub mod dashboard;
pub mod history;
pub mod license_form;
pub mod license_list;
pub mod login;
pub mod project_detail;
pub mod project_form;
pub mod project_list;
pub mod user_form;
pub mod user_list;
