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

use camino::Utf8Path;
use config::Config;

use crate::config::Configs;

/// Try to load the config from the [`path`]
pub fn try_load_from_path<P: AsRef<Utf8Path>>(path: P) -> Result<Configs, config::ConfigError> {
    Config::builder()
        .add_source(config::File::with_name("./config").required(false))
        .add_source(config::File::with_name("./loquax").required(false))
        .add_source(config::File::with_name(path.as_ref().join("loquax").as_str()).required(false))
        .add_source(config::File::with_name(path.as_ref().join("config").as_str()).required(false))
        .add_source(config::Environment::with_prefix("LOQUAX").separator("."))
        .build()?
        .try_deserialize()
}

/// Tries to find a config at the default paths, falling back to the
/// defaults when nothing can be read.
pub fn discover_or_default() -> Result<Configs, config::ConfigError> {
    match Config::builder()
        .add_source(config::File::with_name("./config").required(false))
        .add_source(config::File::with_name("./loquax").required(false))
        .add_source(config::File::with_name("loquax_data/config").required(false))
        .add_source(config::File::with_name("loquax_data/loquax").required(false))
        .add_source(config::Environment::with_prefix("LOQUAX").separator("."))
        .build()
    {
        Ok(value) => value.try_deserialize(),
        Err(_) => Ok(Default::default()),
    }
}
