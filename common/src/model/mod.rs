pub mod file_record;
pub mod network_function;
pub mod questionnaire;
