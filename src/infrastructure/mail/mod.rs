//! Mail delivery adapters

mod smtp;

pub use smtp::SmtpMailer;
