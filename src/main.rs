use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use pokt_hd::commands::{self, Target};
use pokt_hd::{CommandResult, WordlistRegistry};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pokt-hd")]
#[command(about = "pokt-hd - BIP-39 mnemonics and ed25519 HD keys for POKT", long_about = None)]
struct Cli {
    /// Wordlist locale (en, es, fr, it, ja, ko, cz, pt, zh_cn, zh_tw)
    #[arg(long, global = true, env = "POKT_HD_LOCALE", default_value = "en")]
    locale: String,

    /// Log filter when RUST_LOG is unset (e.g. debug, or pokt_hd=trace)
    #[arg(long, global = true, env = "POKT_HD_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PhraseArgs {
    /// Mnemonic phrase (prefer the environment variable over the command line)
    #[arg(long, env = "POKT_HD_MNEMONIC", hide_env_values = true)]
    mnemonic: String,
}

#[derive(Args)]
struct PassphraseArgs {
    /// Optional BIP-39 passphrase
    #[arg(long, env = "POKT_HD_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    // ========================================================================
    // Mnemonic Commands
    // ========================================================================
    /// Generate a new random mnemonic
    Generate {
        /// Number of words (12, 15, 18, 21 or 24)
        #[arg(long, default_value = "24")]
        words: usize,
    },

    /// Check a mnemonic's words and checksum
    Validate {
        #[command(flatten)]
        phrase: PhraseArgs,
    },

    /// Decode a mnemonic to hex entropy
    ToEntropy {
        #[command(flatten)]
        phrase: PhraseArgs,
    },

    /// Encode hex entropy (16 to 32 bytes) as a mnemonic
    FromEntropy {
        /// Entropy in hex
        #[arg(long)]
        entropy: String,
    },

    /// Derive the 64-byte BIP-39 seed
    Seed {
        #[command(flatten)]
        phrase: PhraseArgs,

        #[command(flatten)]
        passphrase: PassphraseArgs,
    },

    // ========================================================================
    // Key Tree Commands
    // ========================================================================
    /// Derive a key from a mnemonic (account 0 unless --path or --account is given)
    Derive {
        #[command(flatten)]
        phrase: PhraseArgs,

        #[command(flatten)]
        passphrase: PassphraseArgs,

        /// Derivation path (e.g. m/44'/635'/0'/0) or bare child index
        #[arg(long, conflicts_with = "account")]
        path: Option<String>,

        /// Account index, derived at m/44'/635'/<account>'/0/0
        #[arg(long)]
        account: Option<u32>,

        /// Include the private key and xprv in the result
        #[arg(long, default_value = "false")]
        show_private: bool,
    },

    /// Decode an extended key (xprv or xpub)
    Inspect {
        /// Extended key string
        #[arg(long)]
        key: String,

        /// Include the private key when the input is an xprv
        #[arg(long, default_value = "false")]
        show_private: bool,
    },

    /// Convert an xprv into its xpub
    Neuter {
        /// Extended private key
        #[arg(long)]
        key: String,
    },

    /// Print the account path for an account index
    AccountPath {
        /// Account index
        #[arg(long, default_value = "0")]
        index: u32,
    },
}

/// A bare word must be a level name. Anything with `=` or `,` is a
/// directive list and goes to `EnvFilter` as is.
fn parse_log_filter(log_level: &str) -> Result<EnvFilter> {
    if !log_level.contains(['=', ',']) {
        log_level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("Invalid log level '{}'", log_level))?;
    }
    EnvFilter::try_new(log_level).with_context(|| format!("Invalid log filter '{}'", log_level))
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_log_filter(log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
    Ok(())
}

fn print_result(cmd_result: CommandResult) {
    println!("{}", cmd_result.output);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("JSON result:");
    println!("{}", cmd_result.result);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let registry = WordlistRegistry::default();
    let locale = cli.locale.as_str();

    let cmd_result = match cli.command {
        Commands::Generate { words } => commands::generate_core(&registry, words, locale)?,
        Commands::Validate { phrase } => {
            commands::validate_core(&registry, &phrase.mnemonic, locale)?
        }
        Commands::ToEntropy { phrase } => {
            commands::to_entropy_core(&registry, &phrase.mnemonic, locale)?
        }
        Commands::FromEntropy { entropy } => {
            commands::from_entropy_core(&registry, &entropy, locale)?
        }
        Commands::Seed { phrase, passphrase } => commands::seed_core(
            &registry,
            &phrase.mnemonic,
            passphrase.passphrase.as_deref(),
            locale,
        )?,
        Commands::Derive {
            phrase,
            passphrase,
            path,
            account,
            show_private,
        } => {
            let target = match (path, account) {
                (Some(path), _) => Target::Path(path),
                (None, account) => Target::Account(account.unwrap_or(0)),
            };
            commands::derive_core(
                &registry,
                &phrase.mnemonic,
                passphrase.passphrase.as_deref(),
                locale,
                target,
                show_private,
            )?
        }
        Commands::Inspect { key, show_private } => commands::inspect_core(&key, show_private)?,
        Commands::Neuter { key } => commands::neuter_core(&key)?,
        Commands::AccountPath { index } => commands::account_path_core(index)?,
    };

    print_result(cmd_result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_filter() {
        for accepted in ["warn", "DEBUG", "off", "info,pokt_hd=trace", "pokt_hd=debug"] {
            assert!(parse_log_filter(accepted).is_ok(), "{}", accepted);
        }
        for rejected in ["debgu", "verbose", "pokt_hd=loud"] {
            assert!(parse_log_filter(rejected).is_err(), "{:?}", rejected);
        }
    }
}
