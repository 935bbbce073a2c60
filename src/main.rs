use setup_dojo::cli::commands::{CliArgs, Commands};
use setup_dojo::cli::handlers::{handle_install, handle_show, handle_verify};
use setup_dojo::util::logging::{config_from_env, init_logging, parse_level};
use setup_dojo::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("setup-dojo v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command_or_default() {
        Commands::Install(install_args) => handle_install(install_args),
        Commands::Show(show_args) => handle_show(show_args),
        Commands::Verify(verify_args) => handle_verify(verify_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        Some(parse_level(level_str))
    } else if args.verbose {
        Some(Level::DEBUG)
    } else if args.quiet {
        Some(Level::ERROR)
    } else {
        None
    };

    init_logging(config_from_env(level));
}
