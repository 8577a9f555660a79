//! Authentication for TutorHub: password hashing, sessions, login and
//! registration, and the lazy-registration cache.

mod login;
mod password;
mod registration;
mod session;

pub use login::attempt_login;
pub use password::{
    generate_token, hash_for_registration, validate_password, verify, PasswordData, PasswordError,
};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use session::{
    LazyPayload, LazyRegistration, SessionError, SessionStore, Viewer,
    DEFAULT_SESSION_EXPIRY_SECS,
};
