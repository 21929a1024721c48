pub mod layout;
pub mod notation;
pub mod parse_error;
pub mod parse_input;
pub mod parse_output;
