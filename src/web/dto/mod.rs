//! Request and response DTOs for the web layer.

pub mod request;
pub mod response;

pub use request::{
    ContactLoginRequest, ContactMessageRequest, LoginRequest, MarkMessagesRequest,
    RegisterRequest, SearchQuery,
};
pub use response::{
    ApiResponse, CreatePostFormResponse, CreatePostResponse, DashboardResponse, ListingResponse,
    LoginResponse, MessageView, PostPrefill, RegisterFormResponse, RegisterResponse, TutorDetail,
    TutorPageResponse, UserInfo,
};
