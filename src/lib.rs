//! JCDM Lead Webhook → Zoho CRM Bridge
//!
//! Receives lead submissions from the JCDM form provider on
//! `/webhook/jcdm`, deduplicates them against Zoho CRM by email and
//! creates a new contact, translating the intake schema into Zoho's
//! field schema along the way. Fire-and-forget per request: no retries,
//! no queuing, no event persistence.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `formation`: Formation name classification.
//! - `webhook_handler`: HTTP handlers and router.
//! - `webhook_models`: Intake and Zoho payload models.
//! - `zoho_client`: Zoho accounts + CRM API client.

pub mod config;
pub mod errors;
pub mod formation;
pub mod webhook_handler;
pub mod webhook_models;
pub mod zoho_client;
