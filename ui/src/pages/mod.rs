//! Page components, one per route

pub mod book_service;
pub mod chat;
pub mod customer_dashboard;
pub mod helper_dashboard;
pub mod landing;
pub mod login;
pub mod register_customer;
pub mod register_helper;
