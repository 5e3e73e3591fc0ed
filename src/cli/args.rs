use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI arguments for the gentype binary.
#[derive(Parser, Debug)]
#[command(
    name = "gentype",
    version,
    about = "Check values and types against parameterized type descriptors"
)]
pub struct CliArgs {
    /// Declare a user class, optionally with bases: `NAME` or `NAME:BASE,...`.
    /// Classes are declared in order, so bases must come first.
    #[arg(long = "class", value_name = "NAME[:BASE,...]", global = true)]
    pub classes: Vec<ClassDecl>,

    /// Output format for the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Does VALUE conform to TYPE?
    Check {
        value: String,
        #[arg(value_name = "TYPE")]
        ty: String,
        /// Read VALUE as JSON instead of literal syntax.
        #[arg(long)]
        json_value: bool,
    },
    /// Is SUB a subtype of SUP?
    Subtype { sub: String, sup: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A `--class` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub bases: Vec<String>,
}

impl FromStr for ClassDecl {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (name, bases) = match spec.split_once(':') {
            Some((name, bases)) => (name.trim(), bases),
            None => (spec.trim(), ""),
        };
        if name.is_empty() {
            return Err(format!("missing class name in `{spec}`"));
        }
        let bases: Vec<String> = bases
            .split(',')
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(ClassDecl {
            name: name.to_owned(),
            bases,
        })
    }
}
