//Copyright 2025 Loquax Authors
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};

mod args;
mod config;
mod constants;
mod logging;

pub use args::LoquaxArgs;

use crate::config::Configs;
use crate::router::{Response, Router};

pub fn exec_args(args: LoquaxArgs) -> ExitCode {
    if args.generate_example_config {
        let example = constants::create_example_config();
        return match serde_json::to_string_pretty(&example)
            .map_err(std::io::Error::other)
            .and_then(|raw| std::fs::write("loquax.json", raw))
        {
            Ok(()) => {
                println!("Wrote the example config to ./loquax.json");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("Failed to write the example config: {error}");
                ExitCode::FAILURE
            }
        };
    }

    let loaded = match &args.config {
        Some(path) => config::try_load_from_path(path),
        None => config::discover_or_default(),
    };
    let mut configs = match loaded {
        Ok(configs) => configs,
        Err(error) => {
            eprintln!("Failed to load the config: {error}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = args.override_log_level {
        configs.system.log_level = level;
    }
    if args.log_to_file {
        configs.system.log_to_file = true;
    }

    // The file appender and the record store both live under the root.
    if let Err(error) = std::fs::create_dir_all(configs.paths.root_path()) {
        eprintln!(
            "Failed to create the data dir {}: {error}",
            configs.paths.root_path()
        );
        return ExitCode::FAILURE;
    }
    logging::configure_logging(&configs);

    execute(configs, args.command)
}

fn execute(configs: Configs, one_shot: Vec<String>) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            log::error!("Failed to start the runtime: {error}");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let router = match Router::new(configs) {
            Ok(router) => router,
            Err(error) => {
                log::error!("Failed to initialize: {error}");
                return ExitCode::FAILURE;
            }
        };

        if !one_shot.is_empty() {
            let line = one_shot.join(" ");
            print_response(router.handle(&line).await);
            return ExitCode::SUCCESS;
        }

        println!("{}", constants::LOQUAX_WELCOME);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Shutting down.");
                    break;
                }
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        print_response(router.handle(&line).await);
                    }
                    Ok(None) => break,
                    Err(error) => {
                        log::error!("Failed to read from stdin: {error}");
                        break;
                    }
                },
            }
        }
        log::info!("Exit application.");
        ExitCode::SUCCESS
    })
}

fn print_response(response: Response) {
    for message in response.messages {
        println!("{message}");
        println!();
    }
    for image in response.images {
        println!("[image] {image}");
    }
}
