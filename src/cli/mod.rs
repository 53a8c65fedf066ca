//! Command-line interface handlers

pub mod commands;

pub use commands::{
    cmd_allowance, cmd_approve, cmd_balance, cmd_events, cmd_export, cmd_holders, cmd_import,
    cmd_info, cmd_init, cmd_mint, cmd_mint_status, cmd_restore, cmd_set_mint_amount,
    cmd_transfer, cmd_transfer_from, parse_address, AppState, CliResult,
};
