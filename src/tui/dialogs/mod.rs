pub mod alert_form;
pub mod delete_confirmation;
pub mod help;
