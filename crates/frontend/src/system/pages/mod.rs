pub mod account_dialog;
pub mod login;
