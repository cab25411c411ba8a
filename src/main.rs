// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use clap::{Parser, Subcommand};
use jdkwatch::commands::config_init::ConfigInitCommand;
use jdkwatch::commands::javafx::JavaFxCommand;
use jdkwatch::commands::scan::ScanCommand;
use jdkwatch::commands::sysinfo::SysInfoCommand;
use jdkwatch::commands::updates::UpdatesCommand;
use jdkwatch::config::new_watch_config;
use jdkwatch::error::{Result, format_error_with_color, get_exit_code};
use jdkwatch::logging;
use std::io::{self, IsTerminal};

#[derive(Parser)]
#[command(name = "jdkwatch")]
#[command(author, version, long_about = None)]
#[command(about = "Find installed JDKs and the updates available for them")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List JDK distributions found under the search paths
    #[command(visible_alias = "ls")]
    Scan {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show newer packages available for the installed distributions
    #[command(visible_alias = "u")]
    Updates {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check unpacked OpenJFX SDKs for newer releases
    Javafx {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the detected host platform and search paths
    Sysinfo {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Write the current configuration to the config file
    ConfigInit {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    // Load configuration once at startup
    let config = match new_watch_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_with_color(&e, io::stderr().is_terminal()));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Scan { json } => ScanCommand::new(&config)?.execute(json),
        Commands::Updates { json } => UpdatesCommand::new(&config)?.execute(json),
        Commands::Javafx { json } => JavaFxCommand::new(&config)?.execute(json),
        Commands::Sysinfo { json } => SysInfoCommand::new(&config)?.execute(json),
        Commands::ConfigInit { force } => ConfigInitCommand::new(&config)?.execute(force),
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_with_color(&e, io::stderr().is_terminal()));
        std::process::exit(get_exit_code(&e));
    }
}
