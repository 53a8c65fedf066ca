//! CLI commands for the ledger
//!
//! Implements all command handlers for the CLI interface. The `--caller`
//! given to a mutating command is the identity the ledger authorizes
//! against; state is saved only after an operation commits.

use crate::storage::{Storage, StorageConfig};
use crate::token::{
    format_units, parse_units, Clock, LedgerEvent, MintStatus, ProtoCoin, TokenConfig,
};
use alloy_primitives::{Address, U256};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub ledger: ProtoCoin,
    pub storage: Storage,
    pub data_dir: PathBuf,
    /// Amounts on the command line are whole tokens rather than base units
    pub whole_units: bool,
}

impl AppState {
    /// Load application state from an initialized data directory
    pub fn new(data_dir: PathBuf, whole_units: bool) -> CliResult<Self> {
        let storage = open_storage(&data_dir)?;

        if !storage.exists() {
            return Err(format!(
                "No ledger found at {:?}. Run `protocoin init --owner <address>` first.",
                data_dir
            )
            .into());
        }

        let ledger = storage.load()?;
        log::debug!("loaded ledger with {} events", ledger.events().len());

        Ok(Self {
            ledger,
            storage,
            data_dir,
            whole_units,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.ledger)?;
        Ok(())
    }

    /// Parse an amount argument in the configured unit
    pub fn amount(&self, text: &str) -> CliResult<U256> {
        let decimals = if self.whole_units {
            self.ledger.decimals()
        } else {
            0
        };
        Ok(parse_units(text, decimals)?)
    }

    /// Render base units for display
    fn display(&self, amount: U256) -> String {
        format!(
            "{} {}",
            format_units(amount, self.ledger.decimals()),
            self.ledger.symbol()
        )
    }
}

fn open_storage(data_dir: &Path) -> CliResult<Storage> {
    let storage_config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    Ok(Storage::new(storage_config)?)
}

/// Parse a hex account address
pub fn parse_address(text: &str) -> CliResult<Address> {
    text.trim()
        .parse::<Address>()
        .map_err(|e| format!("Invalid address {:?}: {}", text, e).into())
}

/// Create a new ledger with the genesis supply held by `owner`
pub fn cmd_init(
    data_dir: &Path,
    owner: &str,
    cooldown_secs: Option<u64>,
    force: bool,
) -> CliResult<()> {
    let storage = open_storage(data_dir)?;

    if storage.exists() && !force {
        println!("⚠️  Ledger already exists at {:?}", data_dir);
        println!("   Use --force to reinitialize (this will delete existing data)");
        return Ok(());
    }

    let owner = parse_address(owner)?;
    let mut config = TokenConfig::default();
    if let Some(secs) = cooldown_secs {
        config = config.with_cooldown(secs);
    }

    let ledger = ProtoCoin::with_config(owner, config)?;
    storage.save(&ledger)?;

    println!("✅ Ledger initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🪙 Token: {} ({})", ledger.name(), ledger.symbol());
    println!(
        "   💰 Genesis supply: {} to {}",
        format_units(ledger.total_supply(), ledger.decimals()),
        owner
    );
    println!("   ⏱️  Mint cooldown: {}s", ledger.mint_cooldown());

    Ok(())
}

/// Display token information
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let ledger = &state.ledger;
    let mint_amount = ledger.mint_amount();

    println!("🪙 {} ({})", ledger.name(), ledger.symbol());
    println!("   ├─ Decimals: {}", ledger.decimals());
    println!("   ├─ Total supply: {}", state.display(ledger.total_supply()));
    println!("   ├─ Owner: {}", ledger.owner());
    println!("   ├─ Holders: {}", ledger.holder_count());
    if mint_amount.is_zero() {
        println!("   ├─ Minting: disabled");
    } else {
        println!("   ├─ Minting: {} per claim", state.display(mint_amount));
    }
    println!("   ├─ Mint cooldown: {}s", ledger.mint_cooldown());
    println!("   └─ Events: {}", ledger.events().len());

    Ok(())
}

/// Show the balance of an account
pub fn cmd_balance(state: &AppState, account: &str) -> CliResult<()> {
    let account = parse_address(account)?;
    let balance = state.ledger.balance_of(&account);

    println!("💰 Balance for {}", account);
    println!("   {} ({} base units)", state.display(balance), balance);

    Ok(())
}

/// Show how much `spender` may draw from `owner`
pub fn cmd_allowance(state: &AppState, owner: &str, spender: &str) -> CliResult<()> {
    let owner = parse_address(owner)?;
    let spender = parse_address(spender)?;
    let allowance = state.ledger.allowance(&owner, &spender);

    println!("🔓 Allowance {} -> {}", owner, spender);
    println!("   {} ({} base units)", state.display(allowance), allowance);

    Ok(())
}

/// Transfer tokens from the caller
pub fn cmd_transfer(state: &mut AppState, caller: &str, to: &str, amount: &str) -> CliResult<()> {
    let caller = parse_address(caller)?;
    let to = parse_address(to)?;
    let amount = state.amount(amount)?;

    let event = state.ledger.transfer(caller, to, amount)?;
    state.save()?;

    println!("📤 Transfer committed");
    print_event(state, &event);

    Ok(())
}

/// Set an allowance for a spender
pub fn cmd_approve(
    state: &mut AppState,
    caller: &str,
    spender: &str,
    amount: &str,
) -> CliResult<()> {
    let caller = parse_address(caller)?;
    let spender = parse_address(spender)?;
    let amount = state.amount(amount)?;

    let event = state.ledger.approve(caller, spender, amount);
    state.save()?;

    println!("🔓 Approval committed");
    print_event(state, &event);

    Ok(())
}

/// Spend from another account using the caller's allowance
pub fn cmd_transfer_from(
    state: &mut AppState,
    caller: &str,
    from: &str,
    to: &str,
    amount: &str,
) -> CliResult<()> {
    let caller = parse_address(caller)?;
    let from = parse_address(from)?;
    let to = parse_address(to)?;
    let amount = state.amount(amount)?;

    let event = state.ledger.transfer_from(caller, from, to, amount)?;
    state.save()?;

    println!("📤 Delegated transfer committed");
    print_event(state, &event);
    println!(
        "   Remaining allowance: {}",
        state.display(state.ledger.allowance(&from, &caller))
    );

    Ok(())
}

/// Configure the mint amount (owner only)
pub fn cmd_set_mint_amount(state: &mut AppState, caller: &str, amount: &str) -> CliResult<()> {
    let caller = parse_address(caller)?;
    let amount = state.amount(amount)?;

    state.ledger.set_mint_amount(caller, amount)?;
    state.save()?;

    if amount.is_zero() {
        println!("⛔ Minting disabled");
    } else {
        println!("✅ Mint amount set to {}", state.display(amount));
    }

    Ok(())
}

/// Mint the configured amount to the caller
pub fn cmd_mint(state: &mut AppState, caller: &str, clock: &dyn Clock) -> CliResult<()> {
    let caller = parse_address(caller)?;

    let event = state.ledger.mint(caller, clock.now())?;
    state.save()?;

    println!("🪙 Mint committed");
    print_event(state, &event);
    println!(
        "   New balance: {}",
        state.display(state.ledger.balance_of(&caller))
    );

    Ok(())
}

/// Show whether an account can mint right now
pub fn cmd_mint_status(state: &AppState, account: &str, clock: &dyn Clock) -> CliResult<()> {
    let account = parse_address(account)?;

    println!("⏱️  Mint status for {}", account);
    if state.ledger.mint_amount().is_zero() {
        println!("   Minting is not enabled.");
        return Ok(());
    }

    match state.ledger.mint_status(&account, clock.now()) {
        MintStatus::NeverMinted => println!("   Never minted, can mint now"),
        MintStatus::CooledDown => println!("   Cooldown elapsed, can mint now"),
        MintStatus::Cooling { remaining } => {
            println!("   Cooling down, {}s remaining", remaining)
        }
    }

    Ok(())
}

/// List accounts with a non-zero balance
pub fn cmd_holders(state: &AppState) -> CliResult<()> {
    let mut holders = state.ledger.holders();
    holders.sort_by(|a, b| b.1.cmp(a.1));

    println!("📋 Holders ({}):", holders.len());
    for (account, balance) in holders {
        println!("   {} - {}", account, state.display(*balance));
    }

    Ok(())
}

/// Print the event log, optionally filtered to one account
pub fn cmd_events(state: &AppState, account: Option<&str>, limit: usize) -> CliResult<()> {
    let events: Vec<&LedgerEvent> = match account {
        Some(account) => {
            let account = parse_address(account)?;
            state.ledger.events_for(account).collect()
        }
        None => state.ledger.events().iter().collect(),
    };

    let skip = events.len().saturating_sub(limit);
    println!("📜 Events ({} of {}):", events.len() - skip, events.len());
    for event in events.into_iter().skip(skip) {
        print_event(state, event);
    }

    Ok(())
}

/// Export ledger to file
pub fn cmd_export(state: &AppState, path: &Path) -> CliResult<()> {
    crate::storage::save_to_file(&state.ledger, path)?;
    println!("📦 Ledger exported to {:?}", path);
    Ok(())
}

/// Import ledger from file
pub fn cmd_import(state: &mut AppState, path: &Path) -> CliResult<()> {
    state.ledger = crate::storage::load_from_file(path)?;
    state.save()?;

    println!("📥 Ledger imported from {:?}", path);
    println!("   Events: {}", state.ledger.events().len());

    Ok(())
}

/// List backups, or replace the saved ledger with one of them
///
/// Works on the data directory directly so a ledger that no longer loads
/// can still be recovered.
pub fn cmd_restore(data_dir: &Path, backup: Option<usize>) -> CliResult<()> {
    let storage = open_storage(data_dir)?;

    let Some(index) = backup else {
        let backups = storage.list_backups();
        println!("🗄️  Backups ({}):", backups.len());
        for index in backups {
            match storage.restore_backup(index) {
                Ok(ledger) => println!("   [{}] {} events", index, ledger.events().len()),
                Err(e) => println!("   [{}] unusable: {}", index, e),
            }
        }
        return Ok(());
    };

    let ledger = storage.restore_backup(index)?;
    storage.save(&ledger)?;
    log::warn!("ledger replaced by backup {}", index);

    println!("♻️  Restored backup {}", index);
    println!("   Events: {}", ledger.events().len());
    println!(
        "   Total supply: {}",
        format_units(ledger.total_supply(), ledger.decimals())
    );

    Ok(())
}

fn print_event(state: &AppState, event: &LedgerEvent) {
    match event {
        LedgerEvent::Transfer { from, to, amount } => {
            let side = |account: &Option<Address>| match account {
                Some(account) => account.to_string(),
                None => "(none)".to_string(),
            };
            println!(
                "   └─ Transfer {} -> {}: {}",
                side(from),
                side(to),
                state.display(*amount)
            );
        }
        LedgerEvent::Approval {
            owner,
            spender,
            amount,
        } => {
            println!(
                "   └─ Approval {} -> {}: {}",
                owner,
                spender,
                state.display(*amount)
            );
        }
    }
}
