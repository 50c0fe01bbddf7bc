//! Telegram front end for ozet.
//!
//! `config` loads credentials and the ticker allow-set; `telegram` talks to
//! the Bot API and feeds each message through `ozet::respond::Responder`.

pub mod config;
pub mod telegram;
