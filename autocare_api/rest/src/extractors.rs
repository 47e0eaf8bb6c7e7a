pub mod json_or_form;
