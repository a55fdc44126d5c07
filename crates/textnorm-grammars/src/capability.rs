// Transducer engine capability token.
//
// The engine is checked once per process. Every grammar constructor takes an
// `&Engine`, so no grammar can be built without a passing self-test.

use std::sync::OnceLock;

use textnorm_fst::VectorFst;
use textnorm_fst::ops::cross;

use crate::error::GrammarError;

/// Proof that the transducer engine passed its self-test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    _private: (),
}

static ENGINE: OnceLock<Result<Engine, String>> = OnceLock::new();

/// The process-wide engine, checked on first use.
///
/// A failed check is cached too: later calls fail with the same
/// [`GrammarError::CapabilityUnavailable`] without re-running it.
pub fn engine() -> Result<Engine, GrammarError> {
    ENGINE
        .get_or_init(|| match self_test() {
            Ok(()) => {
                log::info!("transducer engine available");
                Ok(Engine { _private: () })
            }
            Err(reason) => {
                log::error!("transducer engine self-test failed: {reason}");
                Err(reason)
            }
        })
        .clone()
        .map_err(GrammarError::CapabilityUnavailable)
}

impl Engine {
    /// Run `check` and return an engine token if it succeeds. Not cached.
    pub fn check_with<F>(check: F) -> Result<Engine, GrammarError>
    where
        F: FnOnce() -> Result<(), String>,
    {
        check().map_err(GrammarError::CapabilityUnavailable)?;
        Ok(Engine { _private: () })
    }

    /// Compile a finished grammar graph: epsilon removal, determinization
    /// and minimization.
    pub fn optimize(&self, fst: &VectorFst) -> VectorFst {
        fst.optimize()
    }
}

/// Exercises composition, optimization, lookup and serialization.
fn self_test() -> Result<(), String> {
    let fst = cross("1", "one").compose(&cross("one", "один")).optimize();
    match fst.transduce("1") {
        Some(out) if out == "один" => {}
        other => return Err(format!("composition self-test produced {other:?}")),
    }
    let loaded = VectorFst::from_bytes(&fst.to_bytes()).map_err(|e| e.to_string())?;
    if loaded != fst {
        return Err("serialization self-test failed".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_is_available() {
        assert!(engine().is_ok());
        // Cached: the second call returns the same token.
        assert_eq!(engine().unwrap(), engine().unwrap());
    }

    #[test]
    fn failed_check_is_capability_error() {
        let err = Engine::check_with(|| Err("no backend".to_string())).unwrap_err();
        assert!(matches!(err, GrammarError::CapabilityUnavailable(ref m) if m == "no backend"));
        assert_eq!(err.to_string(), "transducer engine unavailable: no backend");
    }

    #[test]
    fn optimize_through_engine() {
        let engine = engine().unwrap();
        let fst = cross("1", "one").union(&cross("1", "one"));
        let compiled = engine.optimize(&fst);
        assert_eq!(compiled, fst.optimize());
        assert_eq!(compiled.transduce("1").as_deref(), Some("one"));
    }

    #[test]
    fn self_test_passes() {
        assert_eq!(self_test(), Ok(()));
    }
}
