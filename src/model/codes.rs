use rand::Rng;
use std::collections::HashSet;

/// Issuer of opaque identifiers such as `s-qwerty`, never handing out
/// the same one twice.
#[derive(Debug, Default)]
pub struct Codes {
    issued: HashSet<String>,
}

impl Codes {
    pub fn new() -> Codes {
        Codes::default()
    }

    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, prefix: &str, len: usize) -> String {
        loop {
            let suffix = (0..len)
                .map(|_| char::from(rng.random_range(b'a'..=b'z')))
                .collect::<String>();
            let code = format!("{prefix}-{suffix}");
            if self.issued.insert(code.clone()) {
                return code;
            }
        }
    }

    #[cfg(test)]
    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut codes = Codes::new();
        let code = codes.generate(&mut rng, "s", 6);
        assert_eq!(code.len(), 8);
        assert!(code.starts_with("s-"));
        assert!(code[2..].chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_unique() {
        // With a single letter, only 26 codes exist: all of them must come out.
        let mut rng = StdRng::seed_from_u64(7);
        let mut codes = Codes::new();
        let all = (0..26)
            .map(|_| codes.generate(&mut rng, "a", 1))
            .collect::<HashSet<_>>();
        assert_eq!(all.len(), 26);
        assert_eq!(codes.issued(), 26);
    }
}
