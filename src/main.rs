//! ProtoCoin CLI Application
//!
//! A command-line interface for operating a ProtoCoin ledger.

use clap::{Parser, Subcommand};
use protocoin::cli::{self, AppState};
use protocoin::token::SystemClock;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "protocoin")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "ProtoCoin fungible token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".protocoin_data")]
    data_dir: PathBuf,

    /// Read amounts as whole tokens (e.g. 1.5) instead of base units
    #[arg(long, global = true)]
    units: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger
    Init {
        /// Owner address receiving the genesis supply
        #[arg(short, long)]
        owner: String,

        /// Seconds between mints by one account
        #[arg(long)]
        cooldown: Option<u64>,

        /// Replace an existing ledger
        #[arg(long)]
        force: bool,
    },

    /// Display token information
    Info,

    /// Show an account balance
    Balance {
        /// Account address
        #[arg(short, long)]
        account: String,
    },

    /// Show a spender's allowance over an owner's balance
    Allowance {
        /// Owner address
        #[arg(short, long)]
        owner: String,

        /// Spender address
        #[arg(short, long)]
        spender: String,
    },

    /// Transfer tokens from the caller
    Transfer {
        /// Calling account
        #[arg(short, long)]
        caller: String,

        /// Recipient's address
        #[arg(short, long)]
        to: String,

        /// Amount to send
        #[arg(short, long)]
        amount: String,
    },

    /// Set a spender's allowance over the caller's balance
    Approve {
        /// Calling account
        #[arg(short, long)]
        caller: String,

        /// Spender address
        #[arg(short, long)]
        spender: String,

        /// Allowance to set (replaces the current value)
        #[arg(short, long)]
        amount: String,
    },

    /// Spend from another account using the caller's allowance
    TransferFrom {
        /// Calling account (the spender)
        #[arg(short, long)]
        caller: String,

        /// Account to debit
        #[arg(short, long)]
        from: String,

        /// Recipient's address
        #[arg(short, long)]
        to: String,

        /// Amount to send
        #[arg(short, long)]
        amount: String,
    },

    /// Set the amount credited per mint (owner only, 0 disables)
    SetMintAmount {
        /// Calling account
        #[arg(short, long)]
        caller: String,

        /// Amount per mint
        #[arg(short, long)]
        amount: String,
    },

    /// Mint the configured amount to the caller
    Mint {
        /// Calling account
        #[arg(short, long)]
        caller: String,
    },

    /// Show whether an account can mint now
    MintStatus {
        /// Account address
        #[arg(short, long)]
        account: String,
    },

    /// List accounts holding tokens
    Holders,

    /// Show the event log
    Events {
        /// Only events involving this account
        #[arg(short, long)]
        account: Option<String>,

        /// Number of most recent events to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Export ledger to file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import ledger from file
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List backups, or restore one over the current ledger
    Restore {
        /// Backup index (0 is the most recent)
        #[arg(short, long)]
        backup: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init command separately (doesn't need loaded state)
    if let Commands::Init {
        owner,
        cooldown,
        force,
    } = &cli.command
    {
        return cli::cmd_init(&cli.data_dir, owner, *cooldown, *force);
    }

    // Restore works even when the current ledger no longer loads
    if let Commands::Restore { backup } = &cli.command {
        return cli::cmd_restore(&cli.data_dir, *backup);
    }

    let mut state = AppState::new(cli.data_dir.clone(), cli.units)?;
    let clock = SystemClock;

    // Process commands
    match cli.command {
        Commands::Init { .. } | Commands::Restore { .. } => unreachable!(),

        Commands::Info => cli::cmd_info(&state)?,

        Commands::Balance { account } => cli::cmd_balance(&state, &account)?,

        Commands::Allowance { owner, spender } => cli::cmd_allowance(&state, &owner, &spender)?,

        Commands::Transfer { caller, to, amount } => {
            cli::cmd_transfer(&mut state, &caller, &to, &amount)?;
        }

        Commands::Approve {
            caller,
            spender,
            amount,
        } => {
            cli::cmd_approve(&mut state, &caller, &spender, &amount)?;
        }

        Commands::TransferFrom {
            caller,
            from,
            to,
            amount,
        } => {
            cli::cmd_transfer_from(&mut state, &caller, &from, &to, &amount)?;
        }

        Commands::SetMintAmount { caller, amount } => {
            cli::cmd_set_mint_amount(&mut state, &caller, &amount)?;
        }

        Commands::Mint { caller } => cli::cmd_mint(&mut state, &caller, &clock)?,

        Commands::MintStatus { account } => cli::cmd_mint_status(&state, &account, &clock)?,

        Commands::Holders => cli::cmd_holders(&state)?,

        Commands::Events { account, limit } => {
            cli::cmd_events(&state, account.as_deref(), limit)?;
        }

        Commands::Export { output } => cli::cmd_export(&state, &output)?,

        Commands::Import { input } => cli::cmd_import(&mut state, &input)?,
    }

    Ok(())
}
