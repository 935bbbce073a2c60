use clap::{Parser, Subcommand, ValueEnum};

/// Install dojoup and the Dojo toolchain in a CI job
#[derive(Parser, Debug)]
#[command(
    name = "setup-dojo",
    about = "Install dojoup and the Dojo toolchain in a CI job",
    version,
    long_about = "setup-dojo downloads the dojoup installer, installs the requested Dojo \
                  toolchain, adds ~/.dojo/dojoup and ~/.dojo/bin to PATH for later steps, \
                  and reports the installed version as the `version` output."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Subcommand to run; a bare invocation installs the latest (or
    /// `INPUT_VERSION`) toolchain
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Install(InstallArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        about = "Install dojoup and the Dojo toolchain (default)",
        long_about = "Downloads and runs the dojoup installer, then runs `dojoup install`.\n\n\
                      The version comes from --dojo-version, else the INPUT_VERSION \
                      environment variable, else the latest release.\n\n\
                      Examples:\n  \
                      setup-dojo\n  \
                      setup-dojo install --dojo-version 1.4.0\n  \
                      setup-dojo install --fallback-to-path --format json"
    )]
    Install(InstallArgs),

    #[command(about = "Print the installed Dojo toolchain version")]
    Show(ShowArgs),

    #[command(
        about = "Check the installed version against an expected one",
        long_about = "Exits with status 0 when `dojoup show` reports exactly EXPECTED, \
                      1 otherwise. No normalization is applied (`v1.0.0` != `1.0.0`)."
    )]
    Verify(VerifyArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct InstallArgs {
    #[arg(
        long,
        value_name = "VERSION",
        help = "Toolchain version to install, surrounding whitespace trimmed \
                (defaults to INPUT_VERSION, then latest)"
    )]
    pub dojo_version: Option<String>,

    #[arg(long, value_name = "URL", help = "Override the installer URL")]
    pub installer_url: Option<String>,

    #[arg(long, help = "Download the installer in-process instead of with curl")]
    pub native_download: bool,

    #[arg(
        long,
        conflicts_with = "strict",
        help = "Run `dojoup` from PATH when the installed binary is missing"
    )]
    pub fallback_to_path: bool,

    #[arg(long, help = "Fail when the installed binary is missing (default)")]
    pub strict: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct VerifyArgs {
    #[arg(value_name = "EXPECTED", help = "Exact version string to compare against")]
    pub expected: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    #[default]
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
