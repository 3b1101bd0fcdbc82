use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub batches_total: IntCounter,
    pub files_obfuscated: IntCounter,
    pub files_skipped: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let batches_total =
            IntCounter::new("batches_total", "Number of obfuscation batches received").unwrap();
        let files_obfuscated =
            IntCounter::new("files_obfuscated_total", "Number of files obfuscated").unwrap();
        let files_skipped =
            IntCounter::new("files_skipped_total", "Number of files skipped due to per-file errors")
                .unwrap();
        registry.register(Box::new(batches_total.clone())).unwrap();
        registry.register(Box::new(files_obfuscated.clone())).unwrap();
        registry.register(Box::new(files_skipped.clone())).unwrap();
        Self {
            registry,
            batches_total,
            files_obfuscated,
            files_skipped,
        }
    }

    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
