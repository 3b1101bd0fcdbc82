use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::lexer;
use crate::rename::{NameGenerator, RenameTable};

/// Toggles for the naive pipeline stages, all enabled by default, plus the
/// option surface of the delegated heavy engine. Field names deserialize
/// from the camelCase form clients send.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObfuscationOptions {
    pub rename_variables: bool,
    pub encode_strings: bool,
    pub add_noise_variables: bool,
    pub wrap_scope: bool,
    /// Declarations prepended by the noise stage.
    pub noise_count: usize,
    #[serde(flatten)]
    pub delegated: DelegatedOptions,
}

impl Default for ObfuscationOptions {
    fn default() -> Self {
        Self {
            rename_variables: true,
            encode_strings: true,
            add_noise_variables: true,
            wrap_scope: true,
            noise_count: 5,
            delegated: DelegatedOptions::default(),
        }
    }
}

impl ObfuscationOptions {
    /// Every naive stage switched off; the engine becomes the identity
    /// function.
    pub fn disabled() -> Self {
        Self {
            rename_variables: false,
            encode_strings: false,
            add_noise_variables: false,
            wrap_scope: false,
            ..Self::default()
        }
    }
}

/// Configuration accepted for a transformation-library-backed engine.
/// Carried and forwarded verbatim; none of these behaviors are implemented
/// by the naive pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DelegatedOptions {
    pub compact: bool,
    pub control_flow_flattening: bool,
    pub control_flow_flattening_threshold: f64,
    pub dead_code_injection: bool,
    pub dead_code_injection_threshold: f64,
    pub debug_protection: bool,
    pub debug_protection_interval: u64,
    pub disable_console_output: bool,
    pub identifier_names_generator: String,
    pub log: bool,
    pub rename_globals: bool,
    pub rotate_string_array: bool,
    pub self_defending: bool,
    pub string_array: bool,
    pub string_array_encoding: Vec<String>,
    pub string_array_threshold: f64,
    pub unicode_escape_sequence: bool,
}

impl Default for DelegatedOptions {
    fn default() -> Self {
        Self {
            compact: true,
            control_flow_flattening: true,
            control_flow_flattening_threshold: 0.75,
            dead_code_injection: true,
            dead_code_injection_threshold: 0.4,
            debug_protection: true,
            debug_protection_interval: 2000,
            disable_console_output: true,
            identifier_names_generator: "hexadecimal".to_string(),
            log: false,
            rename_globals: false,
            rotate_string_array: true,
            self_defending: true,
            string_array: true,
            string_array_encoding: vec!["base64".to_string()],
            string_array_threshold: 0.75,
            unicode_escape_sequence: false,
        }
    }
}

/// Runs the pipeline with a fresh rename table and entropy-seeded names.
pub fn obfuscate(source: &str, options: &ObfuscationOptions) -> String {
    let mut names = NameGenerator::new();
    let mut table = RenameTable::new();
    obfuscate_with(source, options, &mut table, &mut names)
}

/// Runs the pipeline against a caller-supplied rename table and name
/// generator. The batch coordinator uses this to choose between a fresh
/// table per file and one table shared across a batch.
///
/// Stage order is fixed: rename, encode strings, inject noise, wrap scope.
pub fn obfuscate_with(
    source: &str,
    options: &ObfuscationOptions,
    table: &mut RenameTable,
    names: &mut NameGenerator,
) -> String {
    let mut code = source.to_string();

    if options.rename_variables {
        let declared = lexer::declared_identifiers(&code);
        for name in declared {
            table.assign(name, names);
        }
        code = table.apply(&code);
    }

    if options.encode_strings {
        code = lexer::rewrite_string_literals(&code, |lit| {
            format!("atob('{}')", BASE64.encode(lit.inner))
        });
    }

    if options.add_noise_variables {
        code = prepend_noise(&code, options.noise_count, names);
    }

    if options.wrap_scope {
        code = format!("(function () {{\n{}\n}})();", code);
    }

    code
}

/// Prepends `count` inert declarations. Names come from the shared
/// generation scheme but live in their own namespace; a draw already present
/// anywhere in the unit is rejected.
fn prepend_noise(code: &str, count: usize, names: &mut NameGenerator) -> String {
    let mut taken: HashSet<String> = HashSet::new();
    let mut noise = String::new();
    for _ in 0..count {
        let name = loop {
            let candidate = names.next_name();
            if !code.contains(&candidate) && !taken.contains(&candidate) {
                break candidate;
            }
        };
        noise.push_str(&format!("var {} = {};\n", name, names.next_noise_value()));
        taken.insert(name);
    }
    format!("{}{}", noise, code)
}
