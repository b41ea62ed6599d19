pub mod basic;
pub mod handlers;
pub mod interceptor;
pub mod middleware;
pub mod router;
