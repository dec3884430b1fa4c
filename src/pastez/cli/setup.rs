use clap::{CommandFactory, Parser, Subcommand};

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "pastez",
    bin_name = "pastez",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Command-line client for hastebin-style paste servers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Paste server base URL (overrides config and PASTEZ_SERVER)
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub server: Option<String>,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Document,
    Link,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Document => "Document Commands:",
            CommandGroup::Link => "Link Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "new" | "get" | "dup" => Some(CommandGroup::Document),
            "raw" | "share" => Some(CommandGroup::Link),
            "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Document, CommandGroup::Link, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("pastez {version}\n"));
    output.push_str("Command-line client for hastebin-style paste servers\n");
    output.push('\n');
    output.push_str("Usage: pastez [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --server <URL>  Paste server base URL\n");
    output.push_str("      --no-color      Disable colored output\n");
    output.push_str("  -v, --verbose       Verbose output\n");
    output.push_str("  -h, --help          Print help\n");
    output.push_str("  -V, --version       Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Document(c)) => match c {
            DocumentCommands::New { .. } => "new",
            DocumentCommands::Get { .. } => "get",
            DocumentCommands::Dup { .. } => "dup",
        },
        Some(Commands::Link(c)) => match c {
            LinkCommands::Raw { .. } => "raw",
            LinkCommands::Share { .. } => "share",
        },
        Some(Commands::Misc(MiscCommands::Config { .. })) => "config",
        None => {
            print_grouped_help();
            return;
        }
    };

    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Document(DocumentCommands),

    #[command(flatten)]
    Link(LinkCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// Save a new document (from FILE, stdin, or the editor)
    #[command(alias = "n", display_order = 1)]
    New {
        /// File to read the text from
        file: Option<std::path::PathBuf>,
    },

    /// Show a document with highlighting
    #[command(alias = "v", display_order = 2)]
    Get {
        /// Document key, optionally with an extension (e.g. abc123.py)
        key: String,
    },

    /// Edit a copy of a document and save it as a new one
    #[command(alias = "d", display_order = 3)]
    Dup {
        /// Document key, optionally with an extension
        key: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum LinkCommands {
    /// Print the raw text URL of a document
    #[command(display_order = 10)]
    Raw {
        key: String,

        /// Open the URL in the browser
        #[arg(long)]
        open: bool,
    },

    /// Print the share link of a document
    #[command(display_order = 11)]
    Share {
        key: String,

        /// Open the link in the browser
        #[arg(long)]
        open: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (e.g., server)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
