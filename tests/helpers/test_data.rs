//! Test data helpers for creating test objects
//!
//! Registration requests with generated but valid contact details.

use std::sync::atomic::{AtomicUsize, Ordering};
use fake::faker::lorem::en::Sentence;
use fake::Fake;

use EventHub::models::{CreateUserRequest, Role};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

static PHONE_SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// A valid registration request for `username` with the USER role
pub fn user_request(username: &str) -> CreateUserRequest {
    let sequence = PHONE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CreateUserRequest {
        username: username.to_string(),
        email: format!("{}@example.com", username.to_lowercase()),
        phone_number: format!("+420 {:09}", 600_000_000 + sequence),
        password: TEST_PASSWORD.to_string(),
        role: None,
    }
}

/// A registration request asking for a specific role
pub fn user_request_with_role(username: &str, role: Role) -> CreateUserRequest {
    CreateUserRequest {
        role: Some(role),
        ..user_request(username)
    }
}

/// Random comment text with visible content
pub fn comment_text() -> String {
    Sentence(3..8).fake()
}
