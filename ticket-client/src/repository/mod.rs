// src/repository/mod.rs

pub mod ticket_repository;

pub use ticket_repository::{AttachmentUpload, TicketApi, TicketRepository};
