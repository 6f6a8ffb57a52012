use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "cnf-wizard",
    version,
    about = "Build SEP<MAC>.cnf.xml provisioning files for Cisco 8945 SIP phones"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Directory the provisioning file is written into
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write field values verbatim instead of XML-escaping them
    #[arg(long, global = true)]
    pub no_escape: bool,
}

#[derive(Subcommand, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Run the interactive form (default)
    #[default]
    Run,
    /// Print the field catalog: sections, labels, XML keys and options
    Fields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_is_the_default_command() {
        let cli = Cli::parse_from(["cnf-wizard"]);
        assert_eq!(cli.cmd.unwrap_or_default(), Cmd::Run);
        assert!(!cli.no_escape);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cnf-wizard", "fields", "--no-escape", "--output-dir", "out"]);
        assert_eq!(cli.cmd, Some(Cmd::Fields));
        assert!(cli.no_escape);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
    }
}
