// src/service/mod.rs

pub mod filter;
pub mod intake;
pub mod notifier;
pub mod ticket_service;

pub use intake::{IntakeForm, IntakeService};
pub use notifier::{BufferNotifier, LogNotifier, Notification, NotificationKind, Notifier};
pub use ticket_service::TicketService;
