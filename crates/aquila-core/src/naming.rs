use std::collections::{HashMap, HashSet};

use crate::error::NamingError;

/// Issues unique instance names for a single generation session.
///
/// This is the only mutable state in the core. It is owned by the session
/// object (never ambient): construct a fresh authority per session, or per
/// test, and results are fully deterministic. Single-writer by design; a
/// concurrent caller wraps it in its own mutex.
#[derive(Debug, Default)]
pub struct NamingAuthority {
    /// Next unused numeric suffix per name prefix.
    counters: HashMap<String, u64>,
    /// Every name issued so far, auto- or caller-assigned.
    issued: HashSet<String>,
}

impl NamingAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a name. An explicit name bypasses the counter but still claims
    /// the name; otherwise the name is `prefix + counter [+ suffix]` with
    /// the per-prefix counter starting at 0.
    ///
    /// A collision with any previously issued name fails with
    /// [`NamingError::Conflict`] and leaves the authority unchanged — the
    /// counter is not consumed.
    pub fn assign(
        &mut self,
        prefix: &str,
        suffix: Option<&str>,
        explicit: Option<&str>,
    ) -> Result<String, NamingError> {
        if let Some(name) = explicit {
            self.claim(name)?;
            return Ok(name.to_string());
        }

        let index = self.counters.get(prefix).copied().unwrap_or(0);
        let mut name = format!("{prefix}{index}");
        if let Some(suffix) = suffix {
            name.push_str(suffix);
        }
        self.claim(&name)?;
        self.counters.insert(prefix.to_string(), index + 1);
        Ok(name)
    }

    /// Whether a name has already been issued in this session.
    pub fn is_issued(&self, name: &str) -> bool {
        self.issued.contains(name)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    fn claim(&mut self, name: &str) -> Result<(), NamingError> {
        if self.issued.contains(name) {
            return Err(NamingError::Conflict(name.to_string()));
        }
        self.issued.insert(name.to_string());
        log::debug!("issued component name {name}");
        Ok(())
    }
}
