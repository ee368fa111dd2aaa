use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use tresor_core::crypto::CipherScheme;
use tresor_core::VERSION;

/// Tresor - per-user secrets encrypted under a password-derived key
#[derive(Parser)]
#[command(name = "tresor")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the secret store database
    #[arg(short, long, global = true, env = "TRESOR_DB")]
    pub db: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, env = "TRESOR_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Cipher used for new secrets (aes-gcm, aes-ecb)
    #[arg(long, value_name = "CIPHER")]
    pub cipher: Option<CipherScheme>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Owning user id
    #[arg(short, long)]
    pub user: i64,

    /// Secret content (read from stdin when omitted)
    #[arg(long)]
    pub content: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Owning user id
    #[arg(short, long)]
    pub user: i64,

    /// Decrypt and show content (prompts for the password)
    #[arg(long)]
    pub reveal: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Secret id
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Secret id
    #[arg(value_name = "ID")]
    pub id: i64,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new secret store and config
    Init(InitArgs),

    /// Encrypt and store a new secret
    Add(AddArgs),

    /// List a user's secrets
    List(ListArgs),

    /// Decrypt and show a secret
    Show(ShowArgs),

    /// Delete a secret
    Delete(DeleteArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_globals() {
        let cli = Cli::try_parse_from([
            "tresor", "add", "--user", "7", "--content", "hello", "--db", "/tmp/x.db", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.db.as_deref(), Some("/tmp/x.db"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.user, 7);
                assert_eq!(args.content.as_deref(), Some("hello"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_init_cipher() {
        let cli = Cli::try_parse_from(["tresor", "init", "--cipher", "aes-ecb"]).unwrap();
        match cli.command {
            Commands::Init(args) => assert_eq!(args.cipher, Some(CipherScheme::AesEcb)),
            _ => panic!("expected init"),
        }
        assert!(Cli::try_parse_from(["tresor", "init", "--cipher", "rot13"]).is_err());
    }

    #[test]
    fn test_show_requires_numeric_id() {
        assert!(Cli::try_parse_from(["tresor", "show", "abc"]).is_err());
    }
}
