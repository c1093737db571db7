// Copyright 2024 Meridian Industrial
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
use meridian_api::{init_tracing, serve, Config};
use meridian_security::hash_password;
use std::net::SocketAddr;

/// Backend for the Meridian Industrial website.
#[derive(Parser)]
#[command(name = "meridian", version, about = "Meridian Industrial website backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override MERIDIAN_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Ignore DATABASE_URL and keep content in memory
        #[arg(long)]
        memory: bool,
    },
    /// Print a hash suitable for MERIDIAN_ADMIN_PASSWORD_HASH
    HashPassword {
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve {
        bind: None,
        memory: false,
    }) {
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
            Ok(())
        }
        Command::Serve { bind, memory } => {
            init_tracing();
            let mut config = Config::from_env()?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve(config, memory).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["meridian"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["meridian", "serve", "--memory", "--bind", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Some(Command::Serve { bind, memory }) => {
                assert!(memory);
                assert_eq!(bind.unwrap().port(), 9000);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_hash_password_subcommand() {
        let cli = Cli::try_parse_from(["meridian", "hash-password", "s3cret"]).unwrap();
        assert!(matches!(cli.command, Some(Command::HashPassword { password }) if password == "s3cret"));
    }
}
