mod client;
mod meetings;

pub use client::{ApiClient, HttpMethod};
pub use meetings::{Meeting, NewMeeting, User};
