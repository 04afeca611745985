use crate::domain::model::IdentifierSpec;
use crate::domain::ports::{Clock, IdentifierSource};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces mock resource identifiers: a fixed prefix followed by a random
/// suffix drawn uniformly from the spec's charset. Identifiers are fresh per
/// invocation and carry no uniqueness guarantee; nothing looks them up later.
pub struct IdentifierGenerator {
    rng: StdRng,
}

impl IdentifierGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant so tests get a reproducible identifier stream.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierSource for IdentifierGenerator {
    fn generate(&mut self, spec: &IdentifierSpec) -> String {
        let chars = spec.charset.chars();
        let mut id = String::with_capacity(spec.prefix.len() + spec.length);
        id.push_str(&spec.prefix);
        for _ in 0..spec.length {
            let idx = self.rng.gen_range(0..chars.len());
            id.push(chars[idx] as char);
        }
        id
    }
}

/// Strict ISO-8601 UTC with millisecond precision: `YYYY-MM-DDTHH:mm:ss.sssZ`.
pub fn iso_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Charset;
    use chrono::TimeZone;
    use regex::Regex;

    fn spec(prefix: &str, length: usize, charset: Charset) -> IdentifierSpec {
        IdentifierSpec {
            field: "id".to_string(),
            prefix: prefix.to_string(),
            length,
            charset,
        }
    }

    #[test]
    fn test_generated_id_has_prefix_and_length() {
        let mut generator = IdentifierGenerator::with_seed(7);
        let id = generator.generate(&spec("i-", 17, Charset::Hex));

        assert_eq!(id.len(), 2 + 17);
        assert!(id.starts_with("i-"));
        assert!(Regex::new(r"^i-[0-9a-f]{17}$").unwrap().is_match(&id));
    }

    #[test]
    fn test_charsets_constrain_suffix() {
        let mut generator = IdentifierGenerator::with_seed(7);

        let digits = generator.generate(&spec("", 12, Charset::Digits));
        assert!(digits.chars().all(|c| c.is_ascii_digit()));

        let lower = generator.generate(&spec("", 24, Charset::LowerAlnum));
        assert!(lower
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

        let upper = generator.generate(&spec("", 24, Charset::UpperAlnum));
        assert!(upper
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let spec = spec("vol-", 17, Charset::Hex);
        let mut a = IdentifierGenerator::with_seed(42);
        let mut b = IdentifierGenerator::with_seed(42);

        assert_eq!(a.generate(&spec), b.generate(&spec));
        assert_eq!(a.generate(&spec), b.generate(&spec));
    }

    #[test]
    fn test_iso_timestamp_format() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 4, 9, 15, 22).unwrap();
        let stamp = iso_timestamp(instant);

        assert_eq!(stamp, "2026-08-04T09:15:22.000Z");
        let iso = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").unwrap();
        assert!(iso.is_match(&stamp));
    }
}
