// Copyright 2025 The Rectifier Gateway Authors.
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

//! Environment variable interpolation for configuration files.
//!
//! Supported forms:
//! - `${VAR_NAME}` - replaced by the variable, error if unset or empty
//! - `${VAR_NAME:-default}` - replaced by the variable, or `default`
//!
//! Names follow POSIX rules. `$${` is an escape producing a literal `${`,
//! which route mapping targets need for named capture references
//! (`target: "/api/v1/$${rest}"`). Numbered references such as `$1` are
//! never interpolated.

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the size of an interpolated document.
const MAX_INTERPOLATED_LENGTH: usize = 10_000_000;

lazy_static! {
    static ref ENV_REFERENCE: Regex =
        Regex::new(r"\$\$\{|\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("Invalid regex pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Environment variable '{name}' is not valid Unicode")]
    NotUnicode { name: String },

    #[error("Interpolated result exceeds maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

fn resolve(caps: &Captures<'_>) -> Result<String, InterpolationError> {
    let name = &caps[1];
    let default = caps.get(2).map(|m| m.as_str());

    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(env::VarError::NotPresent) => {
            default
                .map(str::to_string)
                .ok_or_else(|| InterpolationError::MissingVariable {
                    name: name.to_string(),
                })
        }
        Err(env::VarError::NotUnicode(_)) => Err(InterpolationError::NotUnicode {
            name: name.to_string(),
        }),
    }
}

/// Replace every environment variable reference in `input`.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;
    let mut names = Vec::new();

    for caps in ENV_REFERENCE.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };

        output.push_str(&input[cursor..whole.start()]);
        cursor = whole.end();

        let Some(name) = caps.get(1) else {
            output.push_str("${");
            continue;
        };
        output.push_str(&resolve(&caps)?);
        names.push(name.as_str().to_string());

        if output.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }
    output.push_str(&input[cursor..]);

    if !names.is_empty() {
        debug!("Interpolated environment variables: {}", names.join(", "));
    }
    Ok(output)
}
