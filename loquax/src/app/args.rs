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

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
/// Welcome to Loquax
pub struct LoquaxArgs {
    /// A command to initialize an exemplary config
    #[arg(long)]
    pub generate_example_config: bool,

    /// The folder containing the required configs.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the log level from the config.
    #[arg(long)]
    pub override_log_level: Option<log::LevelFilter>,

    /// Log to file
    #[arg(long)]
    pub log_to_file: bool,

    /// A single command to answer before exiting. Without it, commands
    /// are read line by line from stdin.
    #[arg(trailing_var_arg = true)]
    pub command: Vec<String>,
}
