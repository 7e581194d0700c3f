use std::path::PathBuf;

use clap::Parser;

use crate::domain::{ReservationAction, ReservationId};

/// Reservation desk: lists the reservations related to one reservation and
/// applies desk actions to them.
#[derive(Parser, Clone, Debug)]
#[command(version, about)]
pub struct Config {
    /// Base URL of the reservation backend.
    #[clap(env, long)]
    pub api_base_url: String,

    /// Bearer token sent with every backend request.
    #[clap(env, long, hide_env_values = true)]
    pub api_token: Option<String>,

    #[clap(env, long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Translation file (nested JSON) layered over the built-in English texts.
    #[clap(env, long)]
    pub translations: Option<PathBuf>,

    /// Default tracing filter when RUST_LOG is not set.
    #[clap(env, long, default_value = "info")]
    pub log_level: String,

    #[clap(long, default_value_t = 32)]
    pub mailbox_size: usize,

    /// The `id` route parameter. Non-numeric values leave the page empty.
    pub id: Option<String>,

    /// Action to apply once the page has loaded: cancel, pickup, return or a numeric code.
    #[clap(long, requires = "target")]
    pub action: Option<ReservationAction>,

    /// Reservation the action applies to.
    #[clap(long, allow_negative_numbers = true)]
    pub target: Option<ReservationId>,
}
