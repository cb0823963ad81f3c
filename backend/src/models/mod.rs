pub mod registration_payload;
pub mod registration_response;
